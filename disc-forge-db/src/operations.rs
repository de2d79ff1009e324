//! Append operations for the process log.
//!
//! Both tables are append-only: there are no update or delete operations.

use std::path::Path;

use disc_forge_core::{DuplicateEntry, ProcessOutcome};
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid stored value in {table}.{column}: '{value}'")]
    InvalidValue {
        table: &'static str,
        column: &'static str,
        value: String,
    },
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn opt_path_str(path: Option<&Path>) -> Option<String> {
    path.map(path_str)
}

/// Append one archive outcome. Returns the new row id.
pub fn insert_process_outcome(
    conn: &Connection,
    outcome: &ProcessOutcome,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO process_log (archive_path, extracted_folder, source_image,
                                  intermediate_image, final_image, region, status, error_message)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            path_str(&outcome.archive),
            opt_path_str(outcome.extracted_folder.as_deref()),
            opt_path_str(outcome.source_image.as_deref()),
            opt_path_str(outcome.intermediate_image.as_deref()),
            opt_path_str(outcome.final_image.as_deref()),
            outcome.region.map(|r| r.code()),
            outcome.status.as_str(),
            outcome.error,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Append one duplicate group member. Returns the new row id.
pub fn insert_duplicate_entry(
    conn: &Connection,
    entry: &DuplicateEntry,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO duplicate_games (series_key, identifier, region, display_name, source_path)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.series_key,
            entry.identifier,
            entry.region.code(),
            entry.name,
            path_str(&entry.source_path),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
