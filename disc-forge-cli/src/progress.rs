//! Console progress for `run`: colored per-archive lines plus a spinner
//! while a converter is working.

use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use disc_forge_core::ProcessOutcome;
use disc_forge_lib::progress::log_event;
use disc_forge_lib::{PipelineProgress, RunReport, StageEvent};

pub(crate) struct ConsoleProgress {
    quiet: bool,
    spinner: RefCell<Option<ProgressBar>>,
}

impl ConsoleProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            quiet,
            spinner: RefCell::new(None),
        }
    }

    fn start_spinner(&self, msg: String) {
        self.stop_spinner();
        let pb = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg} [{elapsed}]")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.set_message(msg);
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.borrow_mut() = Some(pb);
    }

    fn stop_spinner(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl PipelineProgress for ConsoleProgress {
    fn on_archive(&self, current: usize, total: usize, archive: &Path) {
        self.stop_spinner();
        log::info!(
            "{} {}",
            format!("[{current}/{total}]").if_supports_color(Stderr, |t| t.dimmed()),
            archive
                .display()
                .if_supports_color(Stderr, |t| t.bold()),
        );
    }

    fn on_event(&self, event: &StageEvent<'_>) {
        self.stop_spinner();
        log_event(event);
        if let StageEvent::Converting { stage, input, .. } = event {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.start_spinner(format!("Stage {stage}: {name}"));
        }
    }

    fn on_archive_done(&self, outcome: &ProcessOutcome) {
        self.stop_spinner();
        if outcome.is_success() {
            log::info!(
                "  {} {}",
                "Success".if_supports_color(Stderr, |t| t.green()),
                outcome.archive.display(),
            );
        } else {
            log::warn!(
                "  {} {}: {}",
                "Failed".if_supports_color(Stderr, |t| t.red()),
                outcome.archive.display(),
                outcome.error.as_deref().unwrap_or("unknown error"),
            );
        }
    }

    fn on_complete(&self, report: &RunReport) {
        self.stop_spinner();
        log::info!(
            "Processed {} archive(s): {} succeeded, {} failed",
            report.archives,
            report.succeeded.if_supports_color(Stderr, |t| t.green()),
            report.failed.if_supports_color(Stderr, |t| t.red()),
        );
        if report.sink_errors > 0 {
            log::warn!(
                "{} record(s) could not be written to the process log",
                report.sink_errors
            );
        }
    }
}
