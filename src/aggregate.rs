//! Single-pass reductions over a track collection.

use crate::types::Track;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;

/// A key to value mapping that remembers the order in which keys first appeared.
///
/// Keys are unique. Iteration follows first-insertion order; use
/// [`AggregateMapping::sorted_by_key`] for a natural ordering.
#[derive(Clone)]
pub struct AggregateMapping<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for AggregateMapping<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AggregateMapping<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for AggregateMapping<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AggregateMapping<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl<K: Eq + Hash + Clone, V> AggregateMapping<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value at `key`, returning the previous one. New keys go last.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Mutable access to the value at `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(key.clone(), position);
                self.entries.push((key, default()));
                position
            }
        };
        &mut self.entries[position].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Reorder entries by ascending key.
    pub fn sorted_by_key(mut self) -> Self
    where
        K: Ord,
    {
        self.entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        self.reindex();
        self
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, (key, _))| (key.clone(), position))
            .collect();
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for AggregateMapping<K, V> {
    /// Later values for a repeated key replace earlier ones; the key keeps its
    /// first position.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl<K, V> IntoIterator for AggregateMapping<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Count tracks per key.
///
/// Every track is counted exactly once, so the values always sum to
/// `tracks.len()`.
pub fn count_by<K, F>(tracks: &[Track], key_fn: F) -> AggregateMapping<K, usize>
where
    K: Eq + Hash + Clone,
    F: Fn(&Track) -> K,
{
    match try_count_by(tracks, |track| Ok::<_, Infallible>(key_fn(track))) {
        Ok(counts) => counts,
        Err(never) => match never {},
    }
}

/// [`count_by`] with a fallible key function; the first error aborts the count.
pub fn try_count_by<K, E, F>(
    tracks: &[Track],
    key_fn: F,
) -> Result<AggregateMapping<K, usize>, E>
where
    K: Eq + Hash + Clone,
    F: Fn(&Track) -> Result<K, E>,
{
    let mut counts = AggregateMapping::new();
    for track in tracks {
        *counts.get_or_insert_with(key_fn(track)?, || 0) += 1;
    }
    Ok(counts)
}

/// Smallest `order_fn` value per `identity_fn` key.
///
/// Only the minimum is kept, so the result does not depend on the order of
/// `tracks` (beyond the iteration order of the mapping, which follows the
/// first appearance of each identity).
pub fn first_occurrence<I, O, FI, FO>(
    tracks: &[Track],
    identity_fn: FI,
    order_fn: FO,
) -> AggregateMapping<I, O>
where
    I: Eq + Hash + Clone,
    O: Ord + Clone,
    FI: Fn(&Track) -> I,
    FO: Fn(&Track) -> O,
{
    let result = try_first_occurrence(
        tracks,
        |track| Ok::<_, Infallible>(identity_fn(track)),
        |track| Ok(order_fn(track)),
    );
    match result {
        Ok(firsts) => firsts,
        Err(never) => match never {},
    }
}

/// [`first_occurrence`] with fallible extractors; the first error aborts.
pub fn try_first_occurrence<I, O, E, FI, FO>(
    tracks: &[Track],
    identity_fn: FI,
    order_fn: FO,
) -> Result<AggregateMapping<I, O>, E>
where
    I: Eq + Hash + Clone,
    O: Ord + Clone,
    FI: Fn(&Track) -> Result<I, E>,
    FO: Fn(&Track) -> Result<O, E>,
{
    let mut firsts = AggregateMapping::new();
    for track in tracks {
        let identity = identity_fn(track)?;
        let order = order_fn(track)?;
        let current = firsts.get_or_insert_with(identity, || order.clone());
        if order < *current {
            *current = order;
        }
    }
    Ok(firsts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{decade_key, year_key, Decade};

    fn tracks() -> Vec<Track> {
        vec![
            Track::new("A", "", 2001),
            Track::new("B", "", 1999),
            Track::new("A", "", 1999),
            Track::new("C", "", 2001),
            Track::new("A", "", 1995),
        ]
    }

    #[test]
    fn test_mapping_keeps_first_insertion_order() {
        let mut mapping = AggregateMapping::new();
        *mapping.get_or_insert_with("b", || 0) += 1;
        *mapping.get_or_insert_with("a", || 0) += 1;
        *mapping.get_or_insert_with("b", || 0) += 1;

        assert_eq!(mapping.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(mapping.get(&"b"), Some(&2));
        assert_eq!(mapping.get(&"c"), None);

        let sorted = mapping.sorted_by_key();
        assert_eq!(sorted.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(sorted.get(&"b"), Some(&2));
    }

    #[test]
    fn test_mapping_from_iter_last_value_wins() {
        let mapping: AggregateMapping<&str, i32> =
            vec![("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(
            mapping.into_iter().collect::<Vec<_>>(),
            vec![("a", 3), ("b", 2)]
        );
    }

    #[test]
    fn test_count_by_year() {
        let counts = count_by(&tracks(), year_key);
        assert_eq!(
            counts.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
            vec![(2001, 2), (1999, 2), (1995, 1)]
        );
        assert_eq!(counts.values().sum::<usize>(), tracks().len());
    }

    #[test]
    fn test_count_by_decade() {
        let counts = count_by(&tracks(), decade_key).sorted_by_key();
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![(Decade(199), 3), (Decade(200), 2)]
        );
    }

    #[test]
    fn test_count_by_empty() {
        assert!(count_by(&[], year_key).is_empty());
    }

    #[test]
    fn test_try_count_by_propagates_error() {
        let result = try_count_by(&tracks(), |track| {
            if track.artist == "C" {
                Err(format!("cannot key {track}"))
            } else {
                Ok(track.year)
            }
        });
        assert_eq!(result, Err("cannot key C (2001)".to_string()));
    }

    #[test]
    fn test_first_occurrence_keeps_minimum() {
        let firsts = first_occurrence(&tracks(), |t| t.artist.clone(), year_key);
        assert_eq!(firsts.get(&"A".to_string()), Some(&1995));
        assert_eq!(firsts.get(&"B".to_string()), Some(&1999));
        assert_eq!(firsts.get(&"C".to_string()), Some(&2001));
        assert_eq!(firsts.len(), 3);
    }

    #[test]
    fn test_try_first_occurrence_propagates_error() {
        let result: Result<AggregateMapping<String, i32>, &str> = try_first_occurrence(
            &tracks(),
            |t| Ok(t.artist.clone()),
            |t| if t.year < 1996 { Err("too old") } else { Ok(t.year) },
        );
        assert_eq!(result, Err("too old"));
    }
}
