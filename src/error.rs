use thiserror::Error;

/// Error types for loading track dumps and building pipelines.
///
/// Malformed individual records are never reported here: normalization drops
/// them silently (see [`NormalizeReport`](crate::NormalizeReport) for counts).
/// An empty collection is not an error either, every view is simply empty.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use song_stats::{PipelineConfig, SongDump, SongStatsError};
///
/// let config = PipelineConfig::default();
/// match SongDump::from_path("dump.json", &config.records_field) {
///     Ok(dump) => println!("{} raw records", dump.records.len()),
///     Err(SongStatsError::MissingRecords { field }) => {
///         eprintln!("No '{}' array in the document", field)
///     }
///     Err(e) => eprintln!("Could not read dump: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SongStatsError {
    /// File system I/O errors.
    ///
    /// Raised when the dump or a configuration file cannot be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input document or configuration file is not valid JSON, or does
    /// not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level records field is absent or is not an array.
    #[error("Document has no '{field}' array of records")]
    MissingRecords {
        /// Name of the field that was looked up
        field: String,
    },

    /// The pipeline configuration cannot be used.
    ///
    /// # Common Causes
    /// - An artist rewrite rule with an invalid regular expression
    /// - An empty singles album marker
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
