use serde::{Deserialize, Serialize};
use song_stats::{NormalizeReport, ViewName};

/// Events emitted by the summary command (JSON output to stdout)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SummaryEvent {
    /// Raw records read from the dump
    Loaded { path: String, records: usize },
    /// Result of normalization
    Normalized { report: NormalizeReport },
    /// One computed view
    ViewComputed {
        view: ViewName,
        title: String,
        size: usize,
    },
    /// Total number of songs, as shown in the page header
    Finished { songs: usize },
}

/// Output a summary event as JSON to stdout
pub fn output_event(event: &SummaryEvent) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    } else {
        log::error!("Failed to serialize event to JSON");
    }
}
