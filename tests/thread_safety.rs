mod common;

use common::fixture_records;
use song_stats::{Pipeline, PipelineConfig, Track, ViewName, Views};
use std::sync::Arc;
use std::thread;

/// Pipelines and their results can be shared across threads.
#[test]
fn test_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Pipeline>();
    assert_send_sync::<Views>();
    assert_send_sync::<Track>();
}

/// Views computed on separate threads from one shared track collection are
/// identical to the ones computed in a single pass.
#[test_log::test]
fn test_views_computed_on_threads_match() {
    let pipeline = Arc::new(Pipeline::new(PipelineConfig::default()).unwrap());
    let tracks: Arc<Vec<Track>> = Arc::new(song_stats::normalize(&fixture_records()));
    let expected = pipeline.compute_views_from_tracks(&tracks);

    let handles: Vec<_> = ViewName::ALL
        .into_iter()
        .map(|name| {
            let pipeline = Arc::clone(&pipeline);
            let tracks = Arc::clone(&tracks);
            thread::spawn(move || (name, pipeline.compute_view(name, &tracks)))
        })
        .collect();

    for handle in handles {
        let (name, view) = handle.join().unwrap();
        assert_eq!(expected.get(name), Some(&view), "{name}");
    }
}

#[test_log::test]
fn test_parallel_config_matches_sequential() {
    let records = fixture_records();
    let sequential = Pipeline::new(PipelineConfig::default())
        .unwrap()
        .compute_views(&records);
    let parallel = Pipeline::new(PipelineConfig::default().with_parallel(true))
        .unwrap()
        .compute_views(&records);
    assert_eq!(sequential, parallel);
}
