use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use disc_forge_core::{OutcomeStatus, Region};
use disc_forge_lib::PipelineConfig;

use crate::CliError;

/// List recorded archive outcomes, newest first.
pub(crate) fn run_history(
    config: &PipelineConfig,
    status: Option<OutcomeStatus>,
    limit: Option<usize>,
    json: bool,
) -> Result<(), CliError> {
    let conn = super::open_log(&config.database)?;
    let rows = disc_forge_db::list_process_log(&conn, status, limit)
        .map_err(|e| CliError::database(e.to_string()))?;

    if json {
        for row in &rows {
            let value = serde_json::json!({
                "id": row.id,
                "recorded_at": row.recorded_at,
                "outcome": row.outcome,
            });
            println!("{value}");
        }
        return Ok(());
    }

    let counts =
        disc_forge_db::outcome_counts(&conn).map_err(|e| CliError::database(e.to_string()))?;

    for row in &rows {
        let outcome = &row.outcome;
        let status = if outcome.is_success() {
            format!("{}", "Success".if_supports_color(Stdout, |t| t.green()))
        } else {
            format!("{}", "Failed ".if_supports_color(Stdout, |t| t.red()))
        };
        println!(
            "{} {} {}",
            row.recorded_at.if_supports_color(Stdout, |t| t.dimmed()),
            status,
            outcome.archive.display(),
        );
        if let Some(image) = outcome.final_image.as_deref() {
            println!("    -> {}{}", image.display(), region_suffix(outcome.region));
        }
        if let Some(error) = &outcome.error {
            println!("    {}", error.if_supports_color(Stdout, |t| t.red()));
        }
    }
    if rows.is_empty() {
        println!("No matching records in {}", config.database.display());
    }
    println!(
        "{} record(s): {} succeeded, {} failed",
        counts.total(),
        counts.success,
        counts.failed
    );
    Ok(())
}

fn region_suffix(region: Option<Region>) -> String {
    region.map(|r| format!(" ({r})")).unwrap_or_default()
}
