use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use disc_forge_lib::bootstrap;
use disc_forge_lib::{Pipeline, PipelineConfig, SqliteSink};

use crate::CliError;
use crate::progress::ConsoleProgress;
use crate::summary::print_summary;

/// Convert every archive under the configured root.
///
/// Missing prerequisites are downloaded first unless `offline`. Without
/// both converters the run stops before any archive is touched; a missing
/// title list only means every title resolves as unknown.
pub(crate) fn run_pipeline(
    config: &PipelineConfig,
    offline: bool,
    quiet: bool,
) -> Result<(), CliError> {
    ensure_prerequisites(config, offline)?;

    let mut sink =
        SqliteSink::open(&config.database).map_err(|e| CliError::database(e.to_string()))?;

    log::info!(
        "{} {}",
        "Processing archives in".if_supports_color(Stderr, |t| t.bold()),
        config.archive_root.display(),
    );

    let pipeline = Pipeline::from_config(config);

    let progress = ConsoleProgress::new(quiet);
    let report = pipeline
        .run(&mut sink, &progress)
        .map_err(|e| CliError::pipeline(e.to_string()))?;

    print_summary(&report.groups.duplicate_entries());
    Ok(())
}

fn ensure_prerequisites(config: &PipelineConfig, offline: bool) -> Result<(), CliError> {
    for prerequisite in bootstrap::missing_prerequisites(config) {
        let path = prerequisite.path(config);
        if offline {
            log::warn!("{} not found at {}", prerequisite, path.display());
        } else {
            log::warn!(
                "{} not found at {}, downloading",
                prerequisite,
                path.display()
            );
            match bootstrap::fetch(config, prerequisite) {
                Ok(()) => continue,
                Err(e) if prerequisite.is_tool() => {
                    return Err(CliError::bootstrap(format!(
                        "Failed to download {prerequisite}: {e}"
                    )));
                }
                Err(e) => log::error!("Failed to download {}: {}", prerequisite, e),
            }
        }

        if prerequisite.is_tool() {
            return Err(CliError::bootstrap(format!(
                "{prerequisite} not found at {} (run `disc-forge fetch` or set its path in the config)",
                path.display()
            )));
        }
        log::warn!("Continuing without a title list; every title will be Unknown");
    }
    Ok(())
}
