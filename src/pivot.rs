use crate::aggregate::AggregateMapping;
use crate::types::Label;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::hash::Hash;

/// Invert a many-to-one mapping into a one-to-many mapping.
///
/// Each distinct value becomes a key whose members are the original keys that
/// mapped to it, in the order they were encountered. Every input key lands in
/// exactly one member list.
///
/// # Examples
///
/// ```rust
/// use song_stats::{pivot, AggregateMapping};
///
/// let debuts: AggregateMapping<&str, i32> =
///     vec![("a", 1999), ("b", 2001), ("c", 1999)].into_iter().collect();
/// let by_year = pivot(&debuts);
///
/// assert_eq!(by_year.get(&1999), Some(&vec!["a", "c"]));
/// assert_eq!(by_year.get(&2001), Some(&vec!["b"]));
/// ```
pub fn pivot<K, V>(mapping: &AggregateMapping<K, V>) -> AggregateMapping<V, Vec<K>>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    let mut inverted = AggregateMapping::new();
    for (key, value) in mapping.iter() {
        inverted
            .get_or_insert_with(value.clone(), Vec::new)
            .push(key.clone());
    }
    inverted
}

/// Rows of label to member identities, consumed by list renderers.
///
/// Serializes as a JSON object keyed by the label text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupingTable {
    rows: Vec<(Label, Vec<String>)>,
}

impl GroupingTable {
    pub fn new(rows: Vec<(Label, Vec<String>)>) -> Self {
        Self { rows }
    }

    /// Build a table from a pivoted mapping, converting each key to a label.
    pub fn from_mapping<K, F>(mapping: AggregateMapping<K, Vec<String>>, label_fn: F) -> Self
    where
        F: Fn(&K) -> Label,
    {
        Self {
            rows: mapping
                .into_iter()
                .map(|(key, members)| (label_fn(&key), members))
                .collect(),
        }
    }

    pub fn rows(&self) -> &[(Label, Vec<String>)] {
        &self.rows
    }

    pub fn members(&self, label: &Label) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|(row_label, _)| row_label == label)
            .map(|(_, members)| members.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of members across all rows
    pub fn total_members(&self) -> usize {
        self.rows.iter().map(|(_, members)| members.len()).sum()
    }
}

impl fmt::Display for GroupingTable {
    /// One line per row: the label, a space, then the members joined by `", "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, members) in &self.rows {
            writeln!(f, "{} {}", label, members.join(", "))?;
        }
        Ok(())
    }
}

impl Serialize for GroupingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (label, members) in &self.rows {
            map.serialize_entry(&label.to_string(), members)?;
        }
        map.end()
    }
}
