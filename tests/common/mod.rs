#![allow(dead_code)]
use song_stats::{PipelineConfig, RawRecord, SongDump};
use std::path::PathBuf;

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Raw records of the sample dump
pub fn fixture_records() -> Vec<RawRecord> {
    let field = PipelineConfig::default().records_field;
    SongDump::from_path(fixture_path("dump.json"), &field)
        .expect("fixture dump should load")
        .records
}

pub fn raw(artist: &str, date: &str) -> RawRecord {
    RawRecord::new().with("artist", artist).with("date", date)
}

pub fn raw_with_album(artist: &str, date: &str, album: &str) -> RawRecord {
    raw(artist, date).with("album", album)
}
