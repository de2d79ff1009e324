//! SQLite schema creation and version checks.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Version written by this build.
pub const CURRENT_VERSION: i32 = 1;

/// Create both log tables and their indexes if missing, and stamp the
/// current version.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    record_version(conn, CURRENT_VERSION)
}

/// Open the process log at `path`, creating it if needed.
///
/// A log written by a newer build is rejected rather than modified.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    match stored_version(&conn)? {
        0 => create_schema(&conn)?,
        v if v > CURRENT_VERSION => {
            return Err(SchemaError::VersionMismatch {
                expected: CURRENT_VERSION,
                found: v,
            });
        }
        _ => {}
    }
    Ok(conn)
}

/// In-memory log with the full schema, for tests.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Highest recorded version; 0 for a fresh file.
fn stored_version(conn: &Connection) -> Result<i32, SchemaError> {
    let has_table: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
        [],
        |row| row.get(0),
    )?;
    if has_table == 0 {
        return Ok(0);
    }
    Ok(conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?)
}

fn record_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Applied schema versions
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- One row per archive processing attempt (append-only)
CREATE TABLE IF NOT EXISTS process_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    archive_path TEXT NOT NULL,
    extracted_folder TEXT,
    source_image TEXT,
    intermediate_image TEXT,
    final_image TEXT,
    region TEXT,
    status TEXT NOT NULL,
    error_message TEXT,
    recorded_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_process_log_status ON process_log(status);

-- One row per member of a cross-region duplicate group (append-only)
CREATE TABLE IF NOT EXISTS duplicate_games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    series_key TEXT NOT NULL,
    identifier TEXT NOT NULL,
    region TEXT NOT NULL,
    display_name TEXT NOT NULL,
    source_path TEXT NOT NULL,
    recorded_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_duplicate_games_series ON duplicate_games(series_key);
"#;
