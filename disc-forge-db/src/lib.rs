//! SQLite persistence for the process log.
//!
//! Two append-only tables: `process_log` (one row per archive attempt) and
//! `duplicate_games` (one row per member of a cross-region duplicate
//! group). Backed by SQLite via rusqlite with the bundled feature.

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{OperationError, insert_duplicate_entry, insert_process_outcome};
pub use queries::{
    DuplicateRow, OutcomeCounts, ProcessLogRow, list_duplicates, list_process_log,
    outcome_counts,
};
pub use rusqlite::Connection;
pub use schema::{SchemaError, open_database, open_memory};
