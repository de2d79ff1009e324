//! Domain types shared across the disc-forge crates.
//!
//! Regions, identifiers, the records a pipeline run produces, header
//! identifier extraction and cross-region duplicate detection.

pub mod duplicates;
pub mod error;
pub mod header;
pub mod identifier;
pub mod records;
pub mod region;

pub use duplicates::{SeriesGroups, detect_duplicates};
pub use error::HeaderError;
pub use header::{read_identifier, read_identifier_from_path};
pub use identifier::{IDENTIFIER_LEN, SERIES_KEY_LEN, normalize_identifier, series_key};
pub use records::{DuplicateEntry, OutcomeStatus, ProcessOutcome, TitleRecord};
pub use region::Region;
