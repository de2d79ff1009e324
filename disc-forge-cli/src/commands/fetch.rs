use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use disc_forge_lib::{PipelineConfig, fetch_prerequisites};

use crate::CliError;

/// Download the converters and the title list.
pub(crate) fn run_fetch(config: &PipelineConfig, force: bool) -> Result<(), CliError> {
    let report =
        fetch_prerequisites(config, force).map_err(|e| CliError::bootstrap(e.to_string()))?;

    for prerequisite in &report.fetched {
        log::info!(
            "  {} {} -> {}",
            "fetched".if_supports_color(Stderr, |t| t.green()),
            prerequisite,
            prerequisite.path(config).display(),
        );
    }
    for prerequisite in &report.skipped {
        log::info!(
            "  {} {} ({})",
            "present".if_supports_color(Stderr, |t| t.dimmed()),
            prerequisite,
            prerequisite.path(config).display(),
        );
    }
    if report.fetched.is_empty() {
        log::info!("Everything is already in place (use --force to download again)");
    }
    Ok(())
}
