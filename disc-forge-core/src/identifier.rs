//! Title identifier helpers.
//!
//! Identifiers are the short codes embedded at the start of a disc image
//! header (e.g., `RMCE01`). The first three characters name the game
//! series, the fourth is the region code and the last two are the maker.

/// Number of bytes the identifier occupies at the start of a disc header.
pub const IDENTIFIER_LEN: usize = 6;

/// Default number of leading characters shared by regional variants of a title.
pub const SERIES_KEY_LEN: usize = 3;

/// Normalize an identifier for lookups: trim whitespace and uppercase.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Return the series key: the first `len` characters of the identifier.
///
/// Identifiers shorter than `len` are returned whole.
pub fn series_key(identifier: &str, len: usize) -> &str {
    match identifier.char_indices().nth(len) {
        Some((end, _)) => &identifier[..end],
        None => identifier,
    }
}
