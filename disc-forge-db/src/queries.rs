//! Read queries for post-hoc inspection of the process log.

use std::path::PathBuf;

use disc_forge_core::{DuplicateEntry, OutcomeStatus, ProcessOutcome, Region};
use rusqlite::{Connection, Row, params};

use crate::operations::OperationError;

/// A stored process log row.
#[derive(Debug, Clone)]
pub struct ProcessLogRow {
    pub id: i64,
    pub recorded_at: String,
    pub outcome: ProcessOutcome,
}

/// A stored duplicate group member.
#[derive(Debug, Clone)]
pub struct DuplicateRow {
    pub id: i64,
    pub recorded_at: String,
    pub entry: DuplicateEntry,
}

/// Totals per outcome status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub success: u64,
    pub failed: u64,
}

impl OutcomeCounts {
    pub fn total(&self) -> u64 {
        self.success + self.failed
    }
}

/// List process log rows, newest first.
///
/// `status` restricts to one outcome; `limit` caps the number of rows.
pub fn list_process_log(
    conn: &Connection,
    status: Option<OutcomeStatus>,
    limit: Option<usize>,
) -> Result<Vec<ProcessLogRow>, OperationError> {
    let limit = limit.map(|n| n as i64).unwrap_or(-1);
    let mut stmt = conn.prepare(
        "SELECT id, archive_path, extracted_folder, source_image, intermediate_image,
                final_image, region, status, error_message, recorded_at
         FROM process_log
         WHERE ?1 IS NULL OR status = ?1
         ORDER BY id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![status.map(|s| s.as_str()), limit], row_to_process_log)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row??);
    }
    Ok(result)
}

/// List all stored duplicate rows ordered by series key, then insertion.
pub fn list_duplicates(conn: &Connection) -> Result<Vec<DuplicateRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, series_key, identifier, region, display_name, source_path, recorded_at
         FROM duplicate_games
         ORDER BY series_key, id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(DuplicateRow {
            id: row.get(0)?,
            entry: DuplicateEntry {
                series_key: row.get(1)?,
                identifier: row.get(2)?,
                region: Region::from_code(&row.get::<_, String>(3)?),
                name: row.get(4)?,
                source_path: PathBuf::from(row.get::<_, String>(5)?),
            },
            recorded_at: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Count process log rows per status.
pub fn outcome_counts(conn: &Connection) -> Result<OutcomeCounts, OperationError> {
    let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM process_log GROUP BY status")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut counts = OutcomeCounts::default();
    for row in rows {
        let (status, count) = row?;
        match OutcomeStatus::parse(&status) {
            Some(OutcomeStatus::Success) => counts.success += count as u64,
            Some(OutcomeStatus::Failed) => counts.failed += count as u64,
            None => {
                return Err(OperationError::InvalidValue {
                    table: "process_log",
                    column: "status",
                    value: status,
                });
            }
        }
    }
    Ok(counts)
}

fn row_to_process_log(row: &Row<'_>) -> rusqlite::Result<Result<ProcessLogRow, OperationError>> {
    let status: String = row.get(7)?;
    let Some(parsed_status) = OutcomeStatus::parse(&status) else {
        return Ok(Err(OperationError::InvalidValue {
            table: "process_log",
            column: "status",
            value: status,
        }));
    };
    let opt_path = |i: usize| -> rusqlite::Result<Option<PathBuf>> {
        Ok(row.get::<_, Option<String>>(i)?.map(PathBuf::from))
    };

    Ok(Ok(ProcessLogRow {
        id: row.get(0)?,
        outcome: ProcessOutcome {
            archive: PathBuf::from(row.get::<_, String>(1)?),
            extracted_folder: opt_path(2)?,
            source_image: opt_path(3)?,
            intermediate_image: opt_path(4)?,
            final_image: opt_path(5)?,
            region: row
                .get::<_, Option<String>>(6)?
                .map(|code| Region::from_code(&code)),
            status: parsed_status,
            error: row.get(8)?,
        },
        recorded_at: row.get(9)?,
    }))
}
