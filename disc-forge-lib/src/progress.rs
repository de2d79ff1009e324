//! Pipeline progress reporting.

use std::path::Path;

use disc_forge_core::{ProcessOutcome, Region};

use crate::convert::ConversionStage;
use crate::pipeline::RunReport;

/// A step inside the processing of one archive.
#[derive(Debug, Clone, Copy)]
pub enum StageEvent<'a> {
    Extracting { archive: &'a Path },
    Extracted { archive: &'a Path, folder: &'a Path },
    Located { image: &'a Path },
    /// Sent before a converter starts; the call blocks until it exits
    Converting {
        stage: ConversionStage,
        input: &'a Path,
        extension: &'a str,
    },
    Converted {
        stage: ConversionStage,
        input: &'a Path,
        output: &'a Path,
    },
    Identified { identifier: &'a str },
    Resolved { region: Region, name: &'a str },
}

/// Trait for receiving pipeline progress updates.
pub trait PipelineProgress {
    /// Called before each archive is processed.
    fn on_archive(&self, current: usize, total: usize, archive: &Path);

    /// Called as the archive moves through its stages.
    fn on_event(&self, event: &StageEvent<'_>);

    /// Called once the archive's outcome is known.
    fn on_archive_done(&self, outcome: &ProcessOutcome);

    /// Called when every archive has been processed.
    fn on_complete(&self, report: &RunReport);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl PipelineProgress for SilentProgress {
    fn on_archive(&self, _current: usize, _total: usize, _archive: &Path) {}
    fn on_event(&self, _event: &StageEvent<'_>) {}
    fn on_archive_done(&self, _outcome: &ProcessOutcome) {}
    fn on_complete(&self, _report: &RunReport) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl PipelineProgress for LogProgress {
    fn on_archive(&self, current: usize, total: usize, archive: &Path) {
        log::info!("[{}/{}] {}", current, total, archive.display());
    }

    fn on_event(&self, event: &StageEvent<'_>) {
        log_event(event);
    }

    fn on_archive_done(&self, outcome: &ProcessOutcome) {
        log::info!("Processing {} - {}", outcome.archive.display(), outcome.status);
    }

    fn on_complete(&self, report: &RunReport) {
        log::info!(
            "Processed {} archive(s): {} succeeded, {} failed",
            report.archives,
            report.succeeded,
            report.failed
        );
    }
}

/// Log one stage event at info level (debug for the chatty ones).
pub fn log_event(event: &StageEvent<'_>) {
    match event {
        StageEvent::Extracting { archive } => log::debug!("Extracting {}", archive.display()),
        StageEvent::Extracted { archive, folder } => {
            log::info!("Unzipped {} to {}", archive.display(), folder.display())
        }
        StageEvent::Located { image } => log::debug!("Found source image {}", image.display()),
        StageEvent::Converting {
            input, extension, ..
        } => log::info!("Converting {} to .{}", input.display(), extension),
        StageEvent::Converted { input, output, .. } => {
            log::info!("Converted {} to {}", input.display(), output.display())
        }
        StageEvent::Identified { identifier } => log::info!("Game ID: {}", identifier),
        StageEvent::Resolved { region, name } => {
            log::info!("Detected game region: {}, game name: {}", region, name)
        }
    }
}
