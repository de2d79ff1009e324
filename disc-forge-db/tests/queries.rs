use std::path::PathBuf;

use disc_forge_core::{DuplicateEntry, OutcomeStatus, ProcessOutcome, Region};
use disc_forge_db::*;

fn outcome(archive: &str, status: OutcomeStatus) -> ProcessOutcome {
    let mut outcome = ProcessOutcome::new(archive, status);
    if status == OutcomeStatus::Success {
        outcome.extracted_folder = Some(PathBuf::from(archive.trim_end_matches(".zip")));
        outcome.region = Some(Region::Jp);
    } else {
        outcome.error = Some("boom".to_string());
    }
    outcome
}

fn entry(series_key: &str, identifier: &str, region: Region) -> DuplicateEntry {
    DuplicateEntry {
        series_key: series_key.to_string(),
        identifier: identifier.to_string(),
        region,
        name: format!("Game {identifier}"),
        source_path: PathBuf::from(format!("games/{identifier}.rvz")),
    }
}

fn setup_log() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    insert_process_outcome(&conn, &outcome("games/a.zip", OutcomeStatus::Success)).unwrap();
    insert_process_outcome(&conn, &outcome("games/b.zip", OutcomeStatus::Failed)).unwrap();
    insert_process_outcome(&conn, &outcome("games/c.zip", OutcomeStatus::Success)).unwrap();
    conn
}

#[test]
fn list_process_log_newest_first() {
    let conn = setup_log();
    let rows = list_process_log(&conn, None, None).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].outcome.archive, PathBuf::from("games/c.zip"));
    assert_eq!(rows[2].outcome.archive, PathBuf::from("games/a.zip"));
    assert!(!rows[0].recorded_at.is_empty());
}

#[test]
fn list_process_log_roundtrips_fields() {
    let conn = setup_log();
    let rows = list_process_log(&conn, None, None).unwrap();
    let a = &rows[2].outcome;
    assert_eq!(*a, outcome("games/a.zip", OutcomeStatus::Success));
    let b = &rows[1].outcome;
    assert_eq!(*b, outcome("games/b.zip", OutcomeStatus::Failed));
}

#[test]
fn list_process_log_filters_by_status() {
    let conn = setup_log();
    let failed = list_process_log(&conn, Some(OutcomeStatus::Failed), None).unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].outcome.error.as_deref(), Some("boom"));

    let success = list_process_log(&conn, Some(OutcomeStatus::Success), None).unwrap();
    assert_eq!(success.len(), 2);
}

#[test]
fn list_process_log_respects_limit() {
    let conn = setup_log();
    let rows = list_process_log(&conn, None, Some(2)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].outcome.archive, PathBuf::from("games/c.zip"));
}

#[test]
fn list_process_log_rejects_unknown_status() {
    let conn = open_memory().unwrap();
    conn.execute(
        "INSERT INTO process_log (archive_path, status) VALUES ('x.zip', 'Weird')",
        [],
    )
    .unwrap();
    let err = list_process_log(&conn, None, None).unwrap_err();
    assert!(matches!(err, OperationError::InvalidValue { .. }));
}

#[test]
fn outcome_counts_per_status() {
    let conn = setup_log();
    let counts = outcome_counts(&conn).unwrap();
    assert_eq!(counts.success, 2);
    assert_eq!(counts.failed, 1);
    assert_eq!(counts.total(), 3);
}

#[test]
fn outcome_counts_empty() {
    let conn = open_memory().unwrap();
    assert_eq!(outcome_counts(&conn).unwrap(), OutcomeCounts::default());
}

#[test]
fn list_duplicates_grouped_by_series() {
    let conn = open_memory().unwrap();
    insert_duplicate_entry(&conn, &entry("XYZ", "XYZE01", Region::Us)).unwrap();
    insert_duplicate_entry(&conn, &entry("ABC", "ABCP01", Region::Eu)).unwrap();
    insert_duplicate_entry(&conn, &entry("XYZ", "XYZJ01", Region::Jp)).unwrap();
    insert_duplicate_entry(&conn, &entry("ABC", "ABCE01", Region::Us)).unwrap();

    let rows = list_duplicates(&conn).unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r.entry.identifier.as_str()).collect();
    assert_eq!(ids, ["ABCP01", "ABCE01", "XYZE01", "XYZJ01"]);
    assert_eq!(rows[0].entry, entry("ABC", "ABCP01", Region::Eu));
}
