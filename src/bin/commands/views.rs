use super::utils::load_records;
use song_stats::{Pipeline, ViewName};
use std::path::Path;

/// Handle the views command
pub fn handle_views_command(
    pipeline: &Pipeline,
    dump: &Path,
    names: &[ViewName],
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records(pipeline, dump)?;

    let views = if names.is_empty() {
        pipeline.compute_views(&records)
    } else {
        pipeline.compute_selected(&records, names)
    };

    let json = if pretty {
        serde_json::to_string_pretty(&views)?
    } else {
        serde_json::to_string(&views)?
    };
    println!("{json}");

    Ok(())
}
