use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use disc_forge_lib::PipelineConfig;
use disc_forge_lib::settings::{LOCAL_CONFIG_FILE, user_config_path};

use crate::CliError;

/// Print the effective config (file values plus command-line overrides).
pub(crate) fn run_config_show(config: &PipelineConfig, source: Option<&Path>) -> Result<(), CliError> {
    match source {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# Built-in defaults (no config file found)"),
    }
    let text = config
        .to_toml()
        .map_err(|e| CliError::config(e.to_string()))?;
    print!("{text}");
    Ok(())
}

/// Print the config file in use, or where one would be looked for.
pub(crate) fn run_config_path(source: Option<&Path>) {
    match source {
        Some(path) => {
            println!(
                "{} {}",
                path.display(),
                "(in use)".if_supports_color(Stdout, |t| t.green())
            );
        }
        None => {
            println!(
                "{}",
                "No config file found. Searched:".if_supports_color(Stdout, |t| t.dimmed())
            );
            println!("  {}", LOCAL_CONFIG_FILE);
            match user_config_path() {
                Some(path) => println!("  {}", path.display()),
                None => println!("  (no per-user config directory on this system)"),
            }
        }
    }
}

/// Write the built-in defaults to `./disc-forge.toml`.
pub(crate) fn run_config_init() -> Result<(), CliError> {
    let path = PathBuf::from(LOCAL_CONFIG_FILE);
    PipelineConfig::default()
        .write_new(&path)
        .map_err(|e| CliError::config(e.to_string()))?;
    log::info!(
        "Wrote default config to {}",
        path.display().if_supports_color(Stdout, |t| t.cyan())
    );
    Ok(())
}
