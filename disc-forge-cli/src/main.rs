//! disc-forge CLI
//!
//! Batch-converts archived disc images and reports titles found in more
//! than one region.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;
mod summary;

use std::path::PathBuf;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::config::{run_config_init, run_config_path, run_config_show};
use commands::duplicates::run_duplicates;
use commands::fetch::run_fetch;
use commands::history::run_history;
use commands::run::run_pipeline;
pub(crate) use error::CliError;

use disc_forge_lib::{PipelineConfig, resolve_config};

fn main() {
    let cli = Cli::parse();

    let resolved = resolve_config(cli.config.as_deref());
    let logfile = match (&cli.logfile, &resolved) {
        (Some(path), _) => Some(path.clone()),
        (None, Ok((config, _))) if matches!(cli.command, Commands::Run { .. }) => {
            config.log_file.clone()
        }
        _ => None,
    };
    if let Err(e) = logging::init_logging(cli.quiet, cli.verbose, logfile.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
    }

    let result = resolved
        .map_err(|e| CliError::config(e.to_string()))
        .and_then(|(config, source)| dispatch(&cli, apply_overrides(config, &cli), source));

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Command-line paths win over the config file.
fn apply_overrides(mut config: PipelineConfig, cli: &Cli) -> PipelineConfig {
    if let Some(root) = &cli.root {
        config.archive_root = root.clone();
    }
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    if let Some(lookup) = &cli.lookup {
        config.lookup_file = lookup.clone();
    }
    if let Some(logfile) = &cli.logfile {
        config.log_file = Some(logfile.clone());
    }
    config
}

fn dispatch(cli: &Cli, config: PipelineConfig, source: Option<PathBuf>) -> Result<(), CliError> {
    match &cli.command {
        Commands::Run { offline } => run_pipeline(&config, *offline, cli.quiet),
        Commands::Fetch { force } => run_fetch(&config, *force),
        Commands::History {
            status,
            limit,
            json,
        } => run_history(&config, status.map(Into::into), *limit, *json),
        Commands::Duplicates { json } => run_duplicates(&config, *json),
        Commands::Config { action } => match action {
            ConfigAction::Show => run_config_show(&config, source.as_deref()),
            ConfigAction::Path => {
                run_config_path(source.as_deref());
                Ok(())
            }
            ConfigAction::Init => run_config_init(),
        },
    }
}
