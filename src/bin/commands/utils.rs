use song_stats::{Pipeline, RawRecord, SongDump};
use std::path::Path;

/// Initialize logging: `--verbose` forces debug output, otherwise `RUST_LOG`
/// applies with `info` as the default.
pub fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Read the raw records of a dump, using the pipeline's configured records field.
pub fn load_records(
    pipeline: &Pipeline,
    path: &Path,
) -> Result<Vec<RawRecord>, Box<dyn std::error::Error>> {
    let dump = SongDump::from_path(path, &pipeline.config().records_field)?;
    Ok(dump.records)
}
