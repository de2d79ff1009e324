use serde::{Deserialize, Serialize};

/// Geographic regions a disc release can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// USA / North America
    Us,
    /// Europe (PAL regions)
    Eu,
    /// Japan
    Jp,
    /// Unknown region
    Unknown,
}

impl Region {
    /// Returns the short code stored in the process log (e.g., `"US"`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Eu => "EU",
            Self::Jp => "JP",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the full name of this region.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Us => "USA",
            Self::Eu => "Europe",
            Self::Jp => "Japan",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a region from the code character used in disc identifiers.
    ///
    /// The comparison is exact: identifiers are normalized to uppercase
    /// before they get here, so a lowercase code is not a region code.
    pub fn from_code_char(c: char) -> Self {
        match c {
            'E' => Self::Us,
            'P' => Self::Eu,
            'J' => Self::Jp,
            _ => Self::Unknown,
        }
    }

    /// Derive the region from the 4th character of an identifier.
    ///
    /// Identifiers shorter than 4 characters have no region code and map
    /// to [`Region::Unknown`].
    pub fn from_identifier(identifier: &str) -> Self {
        identifier
            .chars()
            .nth(3)
            .map(Self::from_code_char)
            .unwrap_or(Self::Unknown)
    }

    /// Parse a stored region code back into a region.
    ///
    /// Anything unrecognized maps to [`Region::Unknown`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "US" => Self::Us,
            "EU" => Self::Eu,
            "JP" => Self::Jp,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
#[path = "tests/region_tests.rs"]
mod tests;
