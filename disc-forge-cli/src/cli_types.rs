//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use disc_forge_core::OutcomeStatus;

#[derive(Parser)]
#[command(name = "disc-forge")]
#[command(about = "Batch-convert archived disc images and find titles dumped in several regions", long_about = None)]
pub(crate) struct Cli {
    /// Config file (defaults to ./disc-forge.toml, then the per-user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Folder scanned for archives (overrides the config)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// SQLite process log (overrides the config)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Title list file (overrides the config)
    #[arg(long, global = true)]
    pub lookup: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert every archive under the root folder
    Run {
        /// Do not download missing tools or the title list
        #[arg(long)]
        offline: bool,
    },

    /// Download the converters and the title list
    Fetch {
        /// Download even if already present
        #[arg(short, long)]
        force: bool,
    },

    /// Show recorded archive outcomes, newest first
    History {
        /// Only show this status
        #[arg(short, long)]
        status: Option<StatusFilter>,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,

        /// One JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Show recorded cross-region duplicates
    Duplicates {
        /// One JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print the effective config as TOML
    Show,

    /// Print the config file in use
    Path,

    /// Write the default config to ./disc-forge.toml
    Init,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum StatusFilter {
    Success,
    Failed,
}

impl From<StatusFilter> for OutcomeStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Success => OutcomeStatus::Success,
            StatusFilter::Failed => OutcomeStatus::Failed,
        }
    }
}
