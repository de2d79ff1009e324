//! Where per-archive outcomes and duplicate entries are recorded.

use std::path::{Path, PathBuf};

use disc_forge_core::{DuplicateEntry, ProcessOutcome};
use rusqlite::Connection;

use crate::error::SinkError;

/// Append-only record store for a pipeline run.
pub trait LogSink {
    fn record_outcome(&mut self, outcome: &ProcessOutcome) -> Result<(), SinkError>;
    fn record_duplicate(&mut self, entry: &DuplicateEntry) -> Result<(), SinkError>;
}

/// The SQLite process log.
///
/// Each append opens its own connection so a crash mid-run never holds the
/// database open; the schema is created once at construction.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    path: PathBuf,
}

impl SqliteSink {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        disc_forge_db::open_database(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, SinkError> {
        Ok(disc_forge_db::open_database(&self.path)?)
    }
}

impl LogSink for SqliteSink {
    fn record_outcome(&mut self, outcome: &ProcessOutcome) -> Result<(), SinkError> {
        let conn = self.connect()?;
        disc_forge_db::insert_process_outcome(&conn, outcome)?;
        Ok(())
    }

    fn record_duplicate(&mut self, entry: &DuplicateEntry) -> Result<(), SinkError> {
        let conn = self.connect()?;
        disc_forge_db::insert_duplicate_entry(&conn, entry)?;
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub outcomes: Vec<ProcessOutcome>,
    pub duplicates: Vec<DuplicateEntry>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for MemorySink {
    fn record_outcome(&mut self, outcome: &ProcessOutcome) -> Result<(), SinkError> {
        self.outcomes.push(outcome.clone());
        Ok(())
    }

    fn record_duplicate(&mut self, entry: &DuplicateEntry) -> Result<(), SinkError> {
        self.duplicates.push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/sink_tests.rs"]
mod tests;
