use crate::types::{NormalizeReport, RawRecord, Track};
use serde_json::Value;

/// Turn raw records into tracks, silently dropping the ones that cannot be used.
///
/// A record is kept when its `date` is an integer (a JSON integer, or a string
/// that parses as one after trimming) and its `artist` is a non-blank string.
/// A missing or non-string `album` becomes the empty string.
///
/// Input order is preserved.
pub fn normalize(records: &[RawRecord]) -> Vec<Track> {
    normalize_with_report(records).0
}

/// Same as [`normalize`], additionally counting what was dropped and why.
pub fn normalize_with_report(records: &[RawRecord]) -> (Vec<Track>, NormalizeReport) {
    let mut report = NormalizeReport::default();
    let mut tracks = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let Some(year) = parse_year(record.date()) else {
            log::debug!("Dropping record {index}: date {:?} is not a year", record.date());
            report.dropped_invalid_year += 1;
            continue;
        };

        let artist = record.artist().map(str::trim).unwrap_or_default();
        if artist.is_empty() {
            log::debug!("Dropping record {index}: no artist");
            report.dropped_missing_artist += 1;
            continue;
        }

        let album = record.album().map(str::trim).unwrap_or_default();
        tracks.push(Track::new(artist, album, year));
    }

    report.accepted = tracks.len();
    log::info!(
        "Normalized {} of {} records ({} without a year, {} without an artist)",
        report.accepted,
        records.len(),
        report.dropped_invalid_year,
        report.dropped_missing_artist
    );

    (tracks, report)
}

/// Parse the year out of a `date` field.
fn parse_year(date: Option<&Value>) -> Option<i32> {
    match date? {
        Value::String(text) => text.trim().parse().ok(),
        Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    }
}
