use disc_forge_core::DuplicateEntry;
use disc_forge_lib::PipelineConfig;

use crate::CliError;
use crate::summary::print_summary;

/// List recorded cross-region duplicates grouped by series key.
///
/// Every run appends its own rows, so a series found by several runs is
/// listed once per run.
pub(crate) fn run_duplicates(config: &PipelineConfig, json: bool) -> Result<(), CliError> {
    let conn = super::open_log(&config.database)?;
    let rows =
        disc_forge_db::list_duplicates(&conn).map_err(|e| CliError::database(e.to_string()))?;

    if json {
        for row in &rows {
            let value = serde_json::json!({
                "id": row.id,
                "recorded_at": row.recorded_at,
                "entry": row.entry,
            });
            println!("{value}");
        }
        return Ok(());
    }

    let entries: Vec<DuplicateEntry> = rows.into_iter().map(|row| row.entry).collect();
    print_summary(&entries);
    Ok(())
}
