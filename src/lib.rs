pub mod aggregate;
pub mod config;
pub mod error;
pub mod format;
pub mod keys;
pub mod normalize;
pub mod pipeline;
pub mod pivot;
pub mod types;

pub use aggregate::{
    count_by, first_occurrence, try_count_by, try_first_occurrence, AggregateMapping,
};
pub use config::ConfigStore;
pub use error::SongStatsError;
pub use format::{to_series, SeriesOrder};
pub use keys::{ArtistRules, Decade};
pub use normalize::{normalize, normalize_with_report};
pub use pipeline::{compute_views, Pipeline, Views};
pub use pivot::{pivot, GroupingTable};
pub use types::{
    ArtistConfig, ChartPoint, ChartSeries, Label, NormalizeReport, PipelineConfig, RawRecord,
    RewriteRule, SongDump, Track, View, ViewName,
};

pub type Result<T> = std::result::Result<T, SongStatsError>;
