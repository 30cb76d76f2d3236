//! Composition of the normalizer, key extractors, aggregator, pivot and
//! formatter into the named views.
//!
//! Every view is a pure function of the normalized track collection, so views
//! can be computed in any order, or concurrently.

use crate::aggregate::{count_by, first_occurrence, AggregateMapping};
use crate::format::{count, length, to_series, SeriesOrder};
use crate::keys::{album_identity, decade_key, year_key, ArtistRules};
use crate::normalize::normalize_with_report;
use crate::pivot::{pivot, GroupingTable};
use crate::types::{
    ChartSeries, Label, NormalizeReport, PipelineConfig, RawRecord, Track, View, ViewName,
};
use crate::{Result, SongStatsError};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use std::collections::BTreeMap;

/// All views computed from one track collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Views {
    /// Number of tracks that survived normalization
    pub track_count: usize,
    /// Normalization counters
    pub report: NormalizeReport,
    /// Each view, keyed by name
    pub views: BTreeMap<ViewName, View>,
}

impl Views {
    pub fn get(&self, name: ViewName) -> Option<&View> {
        self.views.get(&name)
    }

    pub fn series(&self, name: ViewName) -> Option<&ChartSeries> {
        self.get(name).and_then(View::as_series)
    }

    pub fn table(&self, name: ViewName) -> Option<&GroupingTable> {
        self.get(name).and_then(View::as_table)
    }
}

/// A configured aggregation pipeline.
///
/// # Examples
///
/// ```rust
/// use song_stats::{ChartPoint, Pipeline, PipelineConfig, RawRecord, ViewName};
///
/// let records = vec![
///     RawRecord::new().with("artist", "A").with("date", "1999"),
///     RawRecord::new().with("artist", "A feat. B").with("date", "2001"),
///     RawRecord::new().with("artist", "C").with("date", "1999"),
/// ];
///
/// let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
/// let views = pipeline.compute_views(&records);
///
/// assert_eq!(
///     views.series(ViewName::NewArtistsByYear).unwrap(),
///     &vec![ChartPoint::new(1999, 2)]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    artist_rules: ArtistRules,
    singles_album: String,
}

impl Pipeline {
    /// Validate `config` and compile its artist rules.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let artist_rules = ArtistRules::new(&config.artist)?;
        let singles_album = config.singles_album.trim().to_lowercase();
        if singles_album.is_empty() {
            return Err(SongStatsError::InvalidConfiguration(
                "singles album marker must not be empty".to_string(),
            ));
        }

        Ok(Self {
            config,
            artist_rules,
            singles_album,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn artist_rules(&self) -> &ArtistRules {
        &self.artist_rules
    }

    /// Normalize `records` and compute every view.
    pub fn compute_views(&self, records: &[RawRecord]) -> Views {
        let (tracks, report) = normalize_with_report(records);
        self.views_for(&tracks, report, &ViewName::ALL)
    }

    /// Compute every view over already normalized tracks.
    pub fn compute_views_from_tracks(&self, tracks: &[Track]) -> Views {
        let report = NormalizeReport {
            accepted: tracks.len(),
            ..Default::default()
        };
        self.views_for(tracks, report, &ViewName::ALL)
    }

    /// Normalize `records` and compute only the requested views.
    pub fn compute_selected(&self, records: &[RawRecord], names: &[ViewName]) -> Views {
        let (tracks, report) = normalize_with_report(records);
        self.views_for(&tracks, report, names)
    }

    fn views_for(&self, tracks: &[Track], report: NormalizeReport, names: &[ViewName]) -> Views {
        if tracks.is_empty() {
            log::warn!("No usable tracks, all views will be empty");
        }

        let views: BTreeMap<ViewName, View> = if self.config.parallel {
            names
                .to_vec()
                .into_par_iter()
                .map(|name| (name, self.compute_view(name, tracks)))
                .collect()
        } else {
            names
                .iter()
                .map(|&name| (name, self.compute_view(name, tracks)))
                .collect()
        };

        log::info!(
            "Computed {} views over {} tracks",
            views.len(),
            tracks.len()
        );

        Views {
            track_count: tracks.len(),
            report,
            views,
        }
    }

    /// Compute a single view.
    pub fn compute_view(&self, name: ViewName, tracks: &[Track]) -> View {
        log::debug!("Computing view '{name}'");
        match name {
            ViewName::SongsByYear => View::Series(year_series(tracks, SeriesOrder::Insertion)),
            ViewName::SongsByYearSorted => {
                View::Series(year_series(tracks, SeriesOrder::SortByValue))
            }
            ViewName::SongsByDecade => View::Series(to_series(
                count_by(tracks, decade_key).iter(),
                |decade| decade.label(),
                count,
                SeriesOrder::SortByKey,
            )),
            ViewName::NewArtistsByYear => {
                View::Series(members_series(self.new_artists_by_year(tracks)))
            }
            ViewName::NewArtistsTable => {
                View::Table(members_table(self.new_artists_by_year(tracks)))
            }
            ViewName::AlbumsByYear => View::Series(members_series(self.albums_by_year(tracks))),
            ViewName::AlbumsTable => View::Table(members_table(self.albums_by_year(tracks))),
            ViewName::SinglesByYear => {
                View::Series(year_series(&self.singles(tracks), SeriesOrder::Insertion))
            }
            ViewName::SinglesByYearSorted => {
                View::Series(year_series(&self.singles(tracks), SeriesOrder::SortByValue))
            }
        }
    }

    /// Debut year to the artists first seen that year, in ascending year order.
    pub fn new_artists_by_year(&self, tracks: &[Track]) -> AggregateMapping<i32, Vec<String>> {
        let debuts = first_occurrence(tracks, |t| self.artist_rules.identity(t), year_key);
        pivot(&debuts).sorted_by_key()
    }

    /// First year to the albums first seen that year; tracks without an album
    /// are left out.
    pub fn albums_by_year(&self, tracks: &[Track]) -> AggregateMapping<i32, Vec<String>> {
        let with_album: Vec<Track> = tracks
            .iter()
            .filter(|track| !album_identity(track).is_empty())
            .cloned()
            .collect();
        let debuts = first_occurrence(&with_album, album_identity, year_key);
        pivot(&debuts).sorted_by_key()
    }

    /// Tracks whose album identity is the singles marker.
    pub fn singles(&self, tracks: &[Track]) -> Vec<Track> {
        tracks
            .iter()
            .filter(|track| album_identity(track) == self.singles_album)
            .cloned()
            .collect()
    }
}

/// Normalize with the default configuration and compute every view.
pub fn compute_views(records: &[RawRecord]) -> Result<Views> {
    Ok(Pipeline::new(PipelineConfig::default())?.compute_views(records))
}

/// Counts per year in chronological order, then re-ordered by `order`.
fn year_series(tracks: &[Track], order: SeriesOrder) -> ChartSeries {
    to_series(
        count_by(tracks, year_key).sorted_by_key().iter(),
        |year| Label::Year(*year),
        count,
        order,
    )
}

fn members_series(mapping: AggregateMapping<i32, Vec<String>>) -> ChartSeries {
    to_series(
        mapping.iter(),
        |year| Label::Year(*year),
        length,
        SeriesOrder::Insertion,
    )
}

fn members_table(mapping: AggregateMapping<i32, Vec<String>>) -> GroupingTable {
    GroupingTable::from_mapping(mapping, |year| Label::Year(*year))
}
