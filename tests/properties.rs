mod common;

use common::raw_with_album;
use proptest::prelude::*;
use proptest::test_runner::Config;
use song_stats::keys::{album_identity, decade_key, year_key};
use song_stats::{
    compute_views, count_by, first_occurrence, pivot, to_series, ArtistConfig, ArtistRules, Label,
    Pipeline, PipelineConfig, RawRecord, SeriesOrder, Track, ViewName,
};

fn artist() -> impl Strategy<Value = String> {
    "[A-Ca-c]{1,3}"
}

fn album() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("singles".to_string()),
        Just("Singles".to_string()),
        "[a-c]{1,4}",
    ]
}

fn tracks() -> impl Strategy<Value = Vec<Track>> {
    let track = (artist(), album(), 1960..2025_i32)
        .prop_map(|(artist, album, year)| Track::new(artist, album, year));
    proptest::collection::vec(track, 0..40)
}

/// A track list together with a random permutation of it
fn shuffled_tracks() -> impl Strategy<Value = (Vec<Track>, Vec<Track>)> {
    tracks().prop_flat_map(|tracks| (Just(tracks.clone()), Just(tracks).prop_shuffle()))
}

fn valid_record() -> impl Strategy<Value = RawRecord> {
    (artist(), album(), 1960..2025_i32)
        .prop_map(|(artist, album, year)| raw_with_album(&artist, &year.to_string(), &album))
}

fn ghost_album() -> impl Strategy<Value = String> {
    prop_oneof![Just("Ghost Album".to_string()), Just("singles".to_string())]
}

/// Records normalization must drop: bad dates, blank artists, no artist at all
fn dropped_record() -> impl Strategy<Value = RawRecord> {
    let bad_date = (
        prop_oneof![
            Just("unknown".to_string()),
            Just(String::new()),
            Just("1999-05-01".to_string()),
            "[g-z]{1,6}",
        ],
        ghost_album(),
    )
        .prop_map(|(date, album)| raw_with_album("Ghost", &date, &album));
    let blank_artist = (
        prop_oneof![Just(String::new()), Just("   ".to_string())],
        1960..2025_i32,
        ghost_album(),
    )
        .prop_map(|(artist, year, album)| raw_with_album(&artist, &year.to_string(), &album));
    let absent_artist = (1960..2025_i32, ghost_album()).prop_map(|(year, album)| {
        RawRecord::new()
            .with("date", year.to_string())
            .with("album", album)
    });
    prop_oneof![bad_date, blank_artist, absent_artist]
}

fn rules() -> ArtistRules {
    ArtistRules::new(&ArtistConfig::default()).unwrap()
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn first_occurrence_is_the_minimum_in_any_order((tracks, shuffled) in shuffled_tracks()) {
        let rules = rules();
        let firsts = first_occurrence(&tracks, |t| rules.identity(t), year_key);
        let reordered = first_occurrence(&shuffled, |t| rules.identity(t), year_key);

        prop_assert_eq!(firsts.len(), reordered.len());
        for (artist, year) in firsts.iter() {
            let earliest = tracks
                .iter()
                .filter(|t| &rules.identity(t) == artist)
                .map(year_key)
                .min();
            prop_assert_eq!(Some(*year), earliest);
            prop_assert_eq!(reordered.get(artist), Some(year));
        }
    }

    #[test]
    fn debut_tables_ignore_input_order((tracks, shuffled) in shuffled_tracks()) {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let pairs = [
            (pipeline.new_artists_by_year(&tracks), pipeline.new_artists_by_year(&shuffled)),
            (pipeline.albums_by_year(&tracks), pipeline.albums_by_year(&shuffled)),
        ];

        for (original, reordered) in pairs {
            prop_assert_eq!(original.len(), reordered.len());
            for (year, members) in original.iter() {
                let mut want = members.clone();
                let mut got = reordered.get(year).cloned().unwrap_or_default();
                want.sort();
                got.sort();
                prop_assert_eq!(got, want, "year {}", year);
            }
        }
    }

    #[test]
    fn pivot_places_every_key_exactly_once(tracks in tracks()) {
        let firsts = first_occurrence(&tracks, album_identity, year_key);
        let by_year = pivot(&firsts);

        let total: usize = by_year.values().map(Vec::len).sum();
        prop_assert_eq!(total, firsts.len());
        for (album, year) in firsts.iter() {
            let members = by_year.get(year).unwrap();
            prop_assert_eq!(members.iter().filter(|m| *m == album).count(), 1);
        }
    }

    #[test]
    fn counts_sum_to_track_count(tracks in tracks()) {
        prop_assert_eq!(count_by(&tracks, year_key).values().sum::<usize>(), tracks.len());
        prop_assert_eq!(count_by(&tracks, decade_key).values().sum::<usize>(), tracks.len());

        let views = Pipeline::new(PipelineConfig::default())
            .unwrap()
            .compute_views_from_tracks(&tracks);
        for name in [ViewName::SongsByYear, ViewName::SongsByYearSorted, ViewName::SongsByDecade] {
            let total: u64 = views.series(name).unwrap().iter().map(|p| p.y).sum();
            prop_assert_eq!(total as usize, tracks.len(), "{}", name);
        }
    }

    #[test]
    fn sort_by_value_is_non_decreasing_and_stable(values in proptest::collection::vec(0_u8..5, 0..30)) {
        // Keys record the source position, so ties must come out in ascending key order.
        let series = to_series(
            values.iter().copied().enumerate(),
            |position| Label::Year(position as i32),
            u64::from,
            SeriesOrder::SortByValue,
        );

        prop_assert_eq!(series.len(), values.len());
        for pair in series.windows(2) {
            prop_assert!(pair[0].y <= pair[1].y);
            if pair[0].y == pair[1].y {
                prop_assert!(pair[0].x < pair[1].x);
            }
        }
    }

    #[test]
    fn dropped_records_never_reach_a_view(
        valid in proptest::collection::vec(valid_record(), 0..30),
        dropped in proptest::collection::vec(dropped_record(), 1..10),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(valid.len() + 1);
        let mut mixed = valid[..at].to_vec();
        mixed.extend(dropped.iter().cloned());
        mixed.extend_from_slice(&valid[at..]);

        let clean = compute_views(&valid).unwrap();
        let views = compute_views(&mixed).unwrap();

        prop_assert_eq!(views.track_count, valid.len());
        prop_assert_eq!(views.report.dropped(), dropped.len());
        prop_assert_eq!(&views.views, &clean.views);

        let json = serde_json::to_string(&views.views).unwrap().to_lowercase();
        prop_assert!(!json.contains("ghost"), "{}", json);
    }
}
