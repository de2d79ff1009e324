//! Records produced by a pipeline run.
//!
//! [`TitleRecord`] lives only in memory for the duration of a run;
//! [`ProcessOutcome`] and [`DuplicateEntry`] are the two shapes written to
//! the append-only process log.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::region::Region;

/// A title that made it through every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    /// Identifier read from the disc header (e.g., "RMCE01")
    pub identifier: String,
    /// Region resolved from the lookup file
    pub region: Region,
    /// Display name resolved from the lookup file, or "Unknown"
    pub name: String,
    /// Source image the title was converted from
    pub source_path: PathBuf,
}

/// Final status of one archive processing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Success,
    Failed,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
        }
    }

    /// Parse a stored status. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("success") {
            Some(Self::Success)
        } else if s.eq_ignore_ascii_case("failed") {
            Some(Self::Failed)
        } else {
            None
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of processing one archive. Written once, never updated.
///
/// Path fields hold whatever the archive produced before it finished or
/// failed; a failure during extraction leaves all of them empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub archive: PathBuf,
    pub extracted_folder: Option<PathBuf>,
    pub source_image: Option<PathBuf>,
    pub intermediate_image: Option<PathBuf>,
    pub final_image: Option<PathBuf>,
    pub region: Option<Region>,
    pub status: OutcomeStatus,
    pub error: Option<String>,
}

impl ProcessOutcome {
    /// An outcome for `archive` with no artifacts recorded yet.
    pub fn new(archive: impl Into<PathBuf>, status: OutcomeStatus) -> Self {
        Self {
            archive: archive.into(),
            extracted_folder: None,
            source_image: None,
            intermediate_image: None,
            final_image: None,
            region: None,
            status,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// One member of a detected duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateEntry {
    /// Leading characters of the identifier shared by the group
    pub series_key: String,
    pub identifier: String,
    pub region: Region,
    pub name: String,
    pub source_path: PathBuf,
}

impl DuplicateEntry {
    pub fn from_title(series_key: &str, title: &TitleRecord) -> Self {
        Self {
            series_key: series_key.to_string(),
            identifier: title.identifier.clone(),
            region: title.region,
            name: title.name.clone(),
            source_path: title.source_path.clone(),
        }
    }
}
