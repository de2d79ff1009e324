//! GameTDB title list parser.
//!
//! Parses the flat `wiitdb.txt` export from GameTDB, one title per line:
//!
//! ```text
//! TITLES = https://www.gametdb.com (type: Wii language: ORIG version: 20240101)
//! RMCE01 = Mario Kart Wii
//! RMCP01 = Mario Kart Wii
//! ```
//!
//! Source: <https://www.gametdb.com/wiitdb.txt?LANG=ORIG>

use std::path::Path;

use disc_forge_core::{Region, normalize_identifier};

use crate::error::DatError;

/// Separator between the identifier and the display name.
pub const SEPARATOR: char = '=';

/// A single entry parsed from the title list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleDbEntry {
    /// Normalized identifier (trimmed, uppercase)
    pub identifier: String,
    /// Display name as listed, trimmed
    pub name: String,
    /// Region derived from the identifier's region code
    pub region: Region,
}

/// Parse one line of the title list.
///
/// Returns `None` for lines without a separator and for lines whose
/// identifier is empty after trimming.
pub fn parse_line(line: &str) -> Option<TitleDbEntry> {
    let (raw_id, raw_name) = line.split_once(SEPARATOR)?;
    let identifier = normalize_identifier(raw_id);
    if identifier.is_empty() {
        return None;
    }
    let region = Region::from_identifier(&identifier);
    Some(TitleDbEntry {
        identifier,
        name: raw_name.trim().to_string(),
        region,
    })
}

/// Parse title list content from a string, skipping lines that don't parse.
pub fn parse_titledb(content: &str) -> Vec<TitleDbEntry> {
    content.lines().filter_map(parse_line).collect()
}

/// Parse a title list file.
///
/// Invalid UTF-8 is replaced rather than rejected so one bad line does not
/// cost the whole file.
pub fn parse_titledb_file(path: &Path) -> Result<Vec<TitleDbEntry>, DatError> {
    let bytes = std::fs::read(path).map_err(|e| DatError::load(path, e))?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(parse_titledb(&content))
}

#[cfg(test)]
#[path = "tests/titledb_tests.rs"]
mod tests;
