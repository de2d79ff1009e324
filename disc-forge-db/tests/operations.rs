use std::path::PathBuf;

use disc_forge_core::{DuplicateEntry, OutcomeStatus, ProcessOutcome, Region};
use disc_forge_db::*;

fn success_outcome() -> ProcessOutcome {
    ProcessOutcome {
        archive: PathBuf::from("games/Mario Kart Wii (USA).zip"),
        extracted_folder: Some(PathBuf::from("games/Mario Kart Wii (USA)")),
        source_image: Some(PathBuf::from("games/Mario Kart Wii (USA)/game.rvz")),
        intermediate_image: Some(PathBuf::from("games/Mario Kart Wii (USA)/game.iso")),
        final_image: Some(PathBuf::from("games/Mario Kart Wii (USA)/game.wbfs")),
        region: Some(Region::Us),
        status: OutcomeStatus::Success,
        error: None,
    }
}

fn failed_outcome() -> ProcessOutcome {
    let mut outcome = ProcessOutcome::new("games/broken.zip", OutcomeStatus::Failed);
    outcome.error = Some("Invalid zip archive".to_string());
    outcome
}

#[test]
fn insert_process_outcome_stores_all_columns() {
    let conn = open_memory().unwrap();
    let id = insert_process_outcome(&conn, &success_outcome()).unwrap();
    assert_eq!(id, 1);

    let (archive, iso, region, status, error): (String, Option<String>, Option<String>, String, Option<String>) = conn
        .query_row(
            "SELECT archive_path, intermediate_image, region, status, error_message
             FROM process_log WHERE id = ?1",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .unwrap();
    assert_eq!(archive, "games/Mario Kart Wii (USA).zip");
    assert_eq!(iso.as_deref(), Some("games/Mario Kart Wii (USA)/game.iso"));
    assert_eq!(region.as_deref(), Some("US"));
    assert_eq!(status, "Success");
    assert_eq!(error, None);
}

#[test]
fn insert_failed_outcome_leaves_paths_null() {
    let conn = open_memory().unwrap();
    let id = insert_process_outcome(&conn, &failed_outcome()).unwrap();

    let (folder, region, status, error): (Option<String>, Option<String>, String, Option<String>) = conn
        .query_row(
            "SELECT extracted_folder, region, status, error_message FROM process_log WHERE id = ?1",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();
    assert_eq!(folder, None);
    assert_eq!(region, None);
    assert_eq!(status, "Failed");
    assert_eq!(error.as_deref(), Some("Invalid zip archive"));
}

#[test]
fn ids_autoincrement() {
    let conn = open_memory().unwrap();
    let a = insert_process_outcome(&conn, &success_outcome()).unwrap();
    let b = insert_process_outcome(&conn, &failed_outcome()).unwrap();
    assert!(b > a);
}

#[test]
fn repeated_outcomes_are_appended() {
    let conn = open_memory().unwrap();
    insert_process_outcome(&conn, &failed_outcome()).unwrap();
    insert_process_outcome(&conn, &failed_outcome()).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM process_log", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn insert_duplicate_entry_stores_all_columns() {
    let conn = open_memory().unwrap();
    let entry = DuplicateEntry {
        series_key: "RMC".to_string(),
        identifier: "RMCP01".to_string(),
        region: Region::Eu,
        name: "Mario Kart Wii".to_string(),
        source_path: PathBuf::from("games/mkw-eu/game.rvz"),
    };
    let id = insert_duplicate_entry(&conn, &entry).unwrap();

    let row: (String, String, String, String, String) = conn
        .query_row(
            "SELECT series_key, identifier, region, display_name, source_path
             FROM duplicate_games WHERE id = ?1",
            [id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
        )
        .unwrap();
    assert_eq!(
        row,
        (
            "RMC".to_string(),
            "RMCP01".to_string(),
            "EU".to_string(),
            "Mario Kart Wii".to_string(),
            "games/mkw-eu/game.rvz".to_string(),
        )
    );
}
