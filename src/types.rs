//! Data types for track dumps and the views derived from them.
//!
//! This module contains the core data structures used throughout the crate:
//! raw and normalized track records, chart labels and series, the view
//! catalogue, and pipeline configuration.

use crate::pivot::GroupingTable;
use crate::{Result, SongStatsError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ================================================================================================
// RAW INPUT
// ================================================================================================

/// A track record exactly as found in the input document.
///
/// Nothing about the shape is guaranteed: fields may be missing, have the
/// wrong JSON type, or hold text that does not parse. [`normalize`](crate::normalize)
/// turns these into [`Track`]s and drops whatever cannot be used.
///
/// # Examples
///
/// ```rust
/// use song_stats::RawRecord;
///
/// let record = RawRecord::new()
///     .with("artist", "Massive Attack")
///     .with("date", "1998")
///     .with("album", "Mezzanine");
///
/// assert_eq!(record.artist(), Some("Massive Attack"));
/// assert_eq!(record.album(), Some("Mezzanine"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    /// All fields of the record, untyped
    pub fields: serde_json::Map<String, Value>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the record for chaining
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// The `artist` field, if it is a string
    pub fn artist(&self) -> Option<&str> {
        self.fields.get("artist").and_then(Value::as_str)
    }

    /// The `album` field, if it is a string
    pub fn album(&self) -> Option<&str> {
        self.fields.get("album").and_then(Value::as_str)
    }

    /// The `date` field in whatever JSON form it was supplied
    pub fn date(&self) -> Option<&Value> {
        self.fields.get("date")
    }
}

impl From<Value> for RawRecord {
    /// Objects keep their fields; any other JSON value becomes an empty record,
    /// which normalization drops.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

/// A fully loaded input document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SongDump {
    /// The records found under the configured top-level field
    pub records: Vec<RawRecord>,
}

impl SongDump {
    /// Extract the records array stored under `field` from a parsed document.
    pub fn from_value(document: Value, field: &str) -> Result<Self> {
        let records = match document {
            Value::Object(mut top) => match top.remove(field) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(SongStatsError::MissingRecords {
                        field: field.to_string(),
                    })
                }
            },
            _ => {
                return Err(SongStatsError::MissingRecords {
                    field: field.to_string(),
                })
            }
        };

        Ok(Self {
            records: records.into_iter().map(RawRecord::from).collect(),
        })
    }

    pub fn from_json_str(json: &str, field: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_value(document, field)
    }

    pub fn from_path(path: impl AsRef<Path>, field: &str) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let dump = Self::from_json_str(&json, field)?;
        log::debug!(
            "Loaded {} raw records from {}",
            dump.records.len(),
            path.display()
        );
        Ok(dump)
    }
}

// ================================================================================================
// NORMALIZED TRACKS
// ================================================================================================

/// A validated track record.
///
/// `artist` is trimmed and never empty; `album` is trimmed and empty when the
/// record had none. Case folding happens in the key extractors, so the
/// original spelling is kept here for display.
///
/// # Examples
///
/// ```rust
/// use song_stats::Track;
///
/// let track = Track::new("Portishead", "Dummy", 1994);
/// assert_eq!(format!("{track}"), "Portishead - Dummy (1994)");
///
/// let single = Track::new("Portishead", "", 1994);
/// assert_eq!(format!("{single}"), "Portishead (1994)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// The artist name, possibly with a featuring clause
    pub artist: String,
    /// The album name, empty when unknown
    pub album: String,
    /// Release year
    pub year: i32,
}

impl Track {
    pub fn new(artist: impl Into<String>, album: impl Into<String>, year: i32) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            year,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.album.is_empty() {
            write!(f, "{} ({})", self.artist, self.year)
        } else {
            write!(f, "{} - {} ({})", self.artist, self.album, self.year)
        }
    }
}

/// Counts collected while normalizing; purely informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// Records that became tracks
    pub accepted: usize,
    /// Records whose date is missing or not an integer
    pub dropped_invalid_year: usize,
    /// Records with a usable year but no artist
    pub dropped_missing_artist: usize,
}

impl NormalizeReport {
    pub fn dropped(&self) -> usize {
        self.dropped_invalid_year + self.dropped_missing_artist
    }
}

// ================================================================================================
// CHART OUTPUT
// ================================================================================================

/// The x value of a chart point, or the heading of a table row.
///
/// Serializes untagged, so years become JSON numbers and decades strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Year(i32),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Year(year) => write!(f, "{year}"),
            Label::Text(text) => f.write_str(text),
        }
    }
}

impl From<i32> for Label {
    fn from(year: i32) -> Self {
        Label::Year(year)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label::Text(text)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label::Text(text.to_string())
    }
}

/// One bar (or slice) of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: Label,
    pub y: u64,
}

impl ChartPoint {
    pub fn new(x: impl Into<Label>, y: u64) -> Self {
        Self { x: x.into(), y }
    }
}

/// Ordered chart data; the order is the one chosen by the formatter.
pub type ChartSeries = Vec<ChartPoint>;

/// Output of a single view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum View {
    /// x/y pairs for a bar or pie chart
    Series(ChartSeries),
    /// label to members, for a list renderer
    Table(GroupingTable),
}

impl View {
    pub fn as_series(&self) -> Option<&ChartSeries> {
        match self {
            View::Series(series) => Some(series),
            View::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&GroupingTable> {
        match self {
            View::Table(table) => Some(table),
            View::Series(_) => None,
        }
    }

    /// Number of points in a series, or number of members in a table
    pub fn size(&self) -> usize {
        match self {
            View::Series(series) => series.len(),
            View::Table(table) => table.total_members(),
        }
    }
}

/// The named views computed by the pipeline.
///
/// Serializes (and parses) as the kebab-case slug, e.g. `songs-by-year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewName {
    SongsByYear,
    SongsByYearSorted,
    SongsByDecade,
    NewArtistsByYear,
    NewArtistsTable,
    AlbumsByYear,
    AlbumsTable,
    SinglesByYear,
    SinglesByYearSorted,
}

impl ViewName {
    pub const ALL: [ViewName; 9] = [
        ViewName::SongsByYear,
        ViewName::SongsByYearSorted,
        ViewName::SongsByDecade,
        ViewName::NewArtistsByYear,
        ViewName::NewArtistsTable,
        ViewName::AlbumsByYear,
        ViewName::AlbumsTable,
        ViewName::SinglesByYear,
        ViewName::SinglesByYearSorted,
    ];

    /// Heading shown above the rendered view
    pub fn title(&self) -> &'static str {
        match self {
            ViewName::SongsByYear => "Songs per year",
            ViewName::SongsByYearSorted => "Songs per sorted year",
            ViewName::SongsByDecade => "Songs per decade",
            ViewName::NewArtistsByYear | ViewName::NewArtistsTable => "New artists per year",
            ViewName::AlbumsByYear | ViewName::AlbumsTable => "Albums per year",
            ViewName::SinglesByYear => "Singles per year",
            ViewName::SinglesByYearSorted => "Singles per sorted year",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ViewName::SongsByYear => "songs-by-year",
            ViewName::SongsByYearSorted => "songs-by-year-sorted",
            ViewName::SongsByDecade => "songs-by-decade",
            ViewName::NewArtistsByYear => "new-artists-by-year",
            ViewName::NewArtistsTable => "new-artists-table",
            ViewName::AlbumsByYear => "albums-by-year",
            ViewName::AlbumsTable => "albums-table",
            ViewName::SinglesByYear => "singles-by-year",
            ViewName::SinglesByYearSorted => "singles-by-year-sorted",
        }
    }

    /// Anchor id derived from the title: lower-cased, whitespace replaced by `-`
    pub fn anchor(&self) -> String {
        self.title()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn is_table(&self) -> bool {
        matches!(self, ViewName::NewArtistsTable | ViewName::AlbumsTable)
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ViewName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ViewName::ALL
            .into_iter()
            .find(|name| name.slug() == s)
            .ok_or_else(|| format!("unknown view '{s}'"))
    }
}

// ================================================================================================
// CONFIGURATION
// ================================================================================================

/// A regex rewrite applied to lower-cased artist names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Regular expression, matched against the lower-cased artist
    pub pattern: String,
    /// Replacement, may reference capture groups as `$1`
    pub replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Rewrites `"x, y"` into `"x-y"`
    pub fn comma_suffix_to_dash() -> Self {
        Self::new(r"\s*,\s*", "-")
    }
}

/// How artist identities are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistConfig {
    /// Remove a trailing "feat..." clause
    pub strip_featuring: bool,
    /// Extra rewrites, applied in order after the featuring clause is removed
    pub rewrites: Vec<RewriteRule>,
}

impl Default for ArtistConfig {
    fn default() -> Self {
        Self {
            strip_featuring: true,
            rewrites: vec![],
        }
    }
}

/// Configuration for a [`Pipeline`](crate::Pipeline).
///
/// Every field has a default, so a configuration file only needs the fields
/// it changes.
///
/// # Examples
///
/// ```rust
/// use song_stats::{PipelineConfig, RewriteRule};
///
/// let config = PipelineConfig::new()
///     .with_artist_rewrite(RewriteRule::comma_suffix_to_dash())
///     .with_parallel(true);
///
/// assert_eq!(config.records_field, "songs");
/// assert_eq!(config.artist.rewrites.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Top-level field of the input document holding the records array
    pub records_field: String,
    /// Artist identity rules
    pub artist: ArtistConfig,
    /// Album identity marking a track as a single
    pub singles_album: String,
    /// Compute views concurrently
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            records_field: "songs".to_string(),
            artist: ArtistConfig::default(),
            singles_album: "singles".to_string(),
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records_field(mut self, field: impl Into<String>) -> Self {
        self.records_field = field.into();
        self
    }

    /// Enable/disable stripping of "featuring" clauses
    pub fn with_strip_featuring(mut self, enabled: bool) -> Self {
        self.artist.strip_featuring = enabled;
        self
    }

    /// Append an artist rewrite rule
    pub fn with_artist_rewrite(mut self, rule: RewriteRule) -> Self {
        self.artist.rewrites.push(rule);
        self
    }

    pub fn with_singles_album(mut self, album: impl Into<String>) -> Self {
        self.singles_album = album.into();
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}

// ================================================================================================
// TESTS
// ================================================================================================
