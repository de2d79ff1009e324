//! In-memory identifier index over the title list.
//!
//! Built once per run and read-only afterwards. Used to resolve the
//! identifier read from a disc header to a display name and region.

use std::collections::HashMap;
use std::path::Path;

use disc_forge_core::{Region, normalize_identifier};

use crate::error::DatError;
use crate::titledb::{self, TitleDbEntry};

/// Placeholder name for identifiers missing from the index.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Region and display name for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleInfo {
    pub region: Region,
    pub name: String,
}

/// Result of resolving an identifier against the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTitle<'a> {
    pub region: Region,
    pub name: &'a str,
}

impl ResolvedTitle<'_> {
    /// Returns true if the identifier was not in the index.
    pub fn is_unknown(&self) -> bool {
        self.region == Region::Unknown && self.name == UNKNOWN_NAME
    }
}

/// An index of title list entries, keyed by normalized identifier.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    entries: HashMap<String, TitleInfo>,
}

impl MetadataIndex {
    /// Build an index from parsed entries.
    ///
    /// When an identifier appears more than once, the last entry wins.
    pub fn from_entries(entries: Vec<TitleDbEntry>) -> Self {
        let mut map = HashMap::with_capacity(entries.len());
        for entry in entries {
            map.insert(
                entry.identifier,
                TitleInfo {
                    region: entry.region,
                    name: entry.name,
                },
            );
        }
        Self { entries: map }
    }

    /// Build an index from title list content.
    pub fn parse(content: &str) -> Self {
        Self::from_entries(titledb::parse_titledb(content))
    }

    /// Load an index from a title list file.
    pub fn load(path: &Path) -> Result<Self, DatError> {
        titledb::parse_titledb_file(path).map(Self::from_entries)
    }

    /// Load an index, falling back to an empty one if the file can't be read.
    ///
    /// Every lookup against the empty index resolves to `Unknown`.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(index) => {
                log::info!(
                    "Loaded {} titles from {}",
                    index.len(),
                    path.display()
                );
                index
            }
            Err(e) => {
                log::error!("{e}");
                log::warn!("Continuing without title metadata; all titles resolve to Unknown");
                Self::default()
            }
        }
    }

    /// Resolve an identifier to its region and name.
    ///
    /// The identifier is normalized first. Missing identifiers resolve to
    /// `Unknown` for both fields.
    pub fn resolve(&self, identifier: &str) -> ResolvedTitle<'_> {
        match self.entries.get(&normalize_identifier(identifier)) {
            Some(info) => ResolvedTitle {
                region: info.region,
                name: &info.name,
            },
            None => ResolvedTitle {
                region: Region::Unknown,
                name: UNKNOWN_NAME,
            },
        }
    }

    /// Look up the raw entry for an identifier.
    pub fn get(&self, identifier: &str) -> Option<&TitleInfo> {
        self.entries.get(&normalize_identifier(identifier))
    }

    /// Returns the number of indexed titles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/index_tests.rs"]
mod tests;
