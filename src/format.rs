use crate::types::{ChartPoint, ChartSeries, Label};
use serde::{Deserialize, Serialize};

/// Ordering policy applied by [`to_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesOrder {
    /// Keep the order of the source
    #[default]
    Insertion,
    /// Ascending by raw key, e.g. chronological for years
    SortByKey,
    /// Ascending by raw value; equal values keep their source order
    SortByValue,
}

/// Convert key/value pairs into chart points.
///
/// `source` is any sequence of pairs: the iterator of an
/// [`AggregateMapping`](crate::AggregateMapping), or an already ordered `Vec`.
/// Sorting looks at the raw keys and values, before `label_fn` and `value_fn`
/// are applied. Exactly one point is emitted per pair.
///
/// [`SeriesOrder::SortByValue`] compares values with their own `Ord`, not by
/// the plotted number. For member-list values that is lexicographic order of
/// the lists, not their length; sort such a source by length before calling.
///
/// # Examples
///
/// ```rust
/// use song_stats::{count_by, keys::year_key, to_series, ChartPoint, Label, SeriesOrder, Track};
///
/// let tracks = vec![
///     Track::new("a", "", 2001),
///     Track::new("b", "", 1999),
///     Track::new("c", "", 2001),
/// ];
/// let series = to_series(
///     count_by(&tracks, year_key).iter(),
///     |year| Label::Year(*year),
///     |count| *count as u64,
///     SeriesOrder::SortByKey,
/// );
///
/// assert_eq!(series, vec![ChartPoint::new(1999, 1), ChartPoint::new(2001, 2)]);
/// ```
pub fn to_series<K, V, I, L, M>(
    source: I,
    label_fn: L,
    value_fn: M,
    order: SeriesOrder,
) -> ChartSeries
where
    I: IntoIterator<Item = (K, V)>,
    K: Ord,
    V: Ord,
    L: Fn(K) -> Label,
    M: Fn(V) -> u64,
{
    let mut pairs: Vec<(K, V)> = source.into_iter().collect();
    match order {
        SeriesOrder::Insertion => {}
        SeriesOrder::SortByKey => pairs.sort_by(|(a, _), (b, _)| a.cmp(b)),
        SeriesOrder::SortByValue => pairs.sort_by(|(_, a), (_, b)| a.cmp(b)),
    }

    pairs
        .into_iter()
        .map(|(key, value)| ChartPoint {
            x: label_fn(key),
            y: value_fn(value),
        })
        .collect()
}

/// Value transform for count mappings
pub fn count(value: &usize) -> u64 {
    *value as u64
}

/// Value transform for member-list mappings: the number of members
#[allow(clippy::ptr_arg)]
pub fn length<T>(members: &Vec<T>) -> u64 {
    members.len() as u64
}
