//! Cross-region duplicate detection.
//!
//! Titles are grouped by series key (the leading characters of their
//! identifier). A series holding more than one title is a duplicate group:
//! typically the same game dumped once per region, e.g. `RMCE01` (USA) and
//! `RMCP01` (Europe) both land in series `RMC`.
//!
//! The key is a plain prefix, so unrelated titles whose identifiers happen
//! to share a prefix are also reported together.

use std::collections::BTreeMap;

use crate::identifier::series_key;
use crate::records::{DuplicateEntry, TitleRecord};

/// All titles of a run, grouped by series key.
#[derive(Debug, Clone, Default)]
pub struct SeriesGroups {
    groups: BTreeMap<String, Vec<TitleRecord>>,
}

impl SeriesGroups {
    /// Every series, singletons included, in key order.
    pub fn all(&self) -> &BTreeMap<String, Vec<TitleRecord>> {
        &self.groups
    }

    /// Series with more than one member, in key order.
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[TitleRecord])> {
        self.groups
            .iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(key, members)| (key.as_str(), members.as_slice()))
    }

    /// Number of duplicate groups.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates().count()
    }

    /// Returns true if any series has more than one member.
    pub fn has_duplicates(&self) -> bool {
        self.duplicates().next().is_some()
    }

    /// One entry per member of every duplicate group.
    pub fn duplicate_entries(&self) -> Vec<DuplicateEntry> {
        self.duplicates()
            .flat_map(|(key, members)| {
                members
                    .iter()
                    .map(move |title| DuplicateEntry::from_title(key, title))
            })
            .collect()
    }
}

/// Group titles by the first `key_len` characters of their identifier.
///
/// Members keep the order they were accumulated in. Nothing is merged:
/// two titles with the same full identifier are both kept.
pub fn detect_duplicates(titles: &[TitleRecord], key_len: usize) -> SeriesGroups {
    let mut groups: BTreeMap<String, Vec<TitleRecord>> = BTreeMap::new();
    for title in titles {
        let key = series_key(&title.identifier, key_len);
        groups.entry(key.to_string()).or_default().push(title.clone());
    }
    SeriesGroups { groups }
}

#[cfg(test)]
#[path = "tests/duplicates_tests.rs"]
mod tests;
