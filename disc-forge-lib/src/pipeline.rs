//! The per-archive conversion pipeline and the run that drives it.
//!
//! Each archive moves through
//! `Pending → Extracted → Located → ConvertedA → IdExtracted → Resolved → ConvertedB`.
//! Any failing step ends that archive as `Failed`; the run always moves on
//! to the next archive. Every archive yields exactly one process-log record,
//! and only fully converted archives contribute a [`TitleRecord`] to
//! duplicate detection.

use std::fmt;
use std::path::{Path, PathBuf};

use disc_forge_core::{
    OutcomeStatus, ProcessOutcome, SeriesGroups, TitleRecord, detect_duplicates,
    read_identifier_from_path,
};
use disc_forge_dat::MetadataIndex;

use crate::convert::{
    ConversionStage, ExternalTool, ImageConverter, convert_to_final, convert_to_intermediate,
};
use crate::error::PipelineError;
use crate::extract::extract_archive;
use crate::locate::locate_image;
use crate::progress::{PipelineProgress, StageEvent};
use crate::scanner::scan_archives;
use crate::settings::PipelineConfig;
use crate::sink::LogSink;

/// How far an archive got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Pending,
    Extracted,
    Located,
    ConvertedA,
    IdExtracted,
    Resolved,
    ConvertedB,
}

impl Stage {
    /// The stage after this one, or `None` once converted.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Pending => Some(Stage::Extracted),
            Stage::Extracted => Some(Stage::Located),
            Stage::Located => Some(Stage::ConvertedA),
            Stage::ConvertedA => Some(Stage::IdExtracted),
            Stage::IdExtracted => Some(Stage::Resolved),
            Stage::Resolved => Some(Stage::ConvertedB),
            Stage::ConvertedB => None,
        }
    }

    /// Description of the work that leads into this stage.
    pub fn action(self) -> &'static str {
        match self {
            Stage::Pending => "pending",
            Stage::Extracted => "extraction",
            Stage::Located => "image lookup",
            Stage::ConvertedA => "conversion A",
            Stage::IdExtracted => "identifier read",
            Stage::Resolved => "title lookup",
            Stage::ConvertedB => "conversion B",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Pending => "Pending",
            Stage::Extracted => "Extracted",
            Stage::Located => "Located",
            Stage::ConvertedA => "ConvertedA",
            Stage::IdExtracted => "IdExtracted",
            Stage::Resolved => "Resolved",
            Stage::ConvertedB => "ConvertedB",
        })
    }
}

/// The two converters a run uses.
pub struct Converters {
    pub to_intermediate: Box<dyn ImageConverter>,
    pub to_final: Box<dyn ImageConverter>,
}

impl Converters {
    pub fn new(
        to_intermediate: impl ImageConverter + 'static,
        to_final: impl ImageConverter + 'static,
    ) -> Self {
        Self {
            to_intermediate: Box::new(to_intermediate),
            to_final: Box::new(to_final),
        }
    }

    /// The external tools named in the config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let (to_intermediate, to_final) = external_tools(config);
        Self::new(to_intermediate, to_final)
    }
}

/// Converter A writing the intermediate format and converter B writing the
/// final format.
fn external_tools(config: &PipelineConfig) -> (ExternalTool, ExternalTool) {
    (
        ExternalTool::from_config(&config.converter_a, &config.extensions.intermediate),
        ExternalTool::from_config(&config.converter_b, &config.extensions.final_image),
    )
}

/// Totals and accumulated titles from one run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub archives: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Records the sink failed to store
    pub sink_errors: usize,
    /// Fully converted titles, in processing order
    pub titles: Vec<TitleRecord>,
    /// Titles grouped by series key, singletons included
    pub groups: SeriesGroups,
}

/// Mutable state of one archive while it is processed.
#[derive(Debug)]
struct ArchiveRun {
    stage: Stage,
    outcome: ProcessOutcome,
}

impl ArchiveRun {
    fn new(archive: &Path) -> Self {
        Self {
            stage: Stage::Pending,
            outcome: ProcessOutcome::new(archive, OutcomeStatus::Failed),
        }
    }

    fn finish(mut self, status: OutcomeStatus, error: Option<String>) -> ProcessOutcome {
        self.outcome.status = status;
        self.outcome.error = error;
        self.outcome
    }
}

/// Drives archives through the stages and records the results.
pub struct Pipeline<'a> {
    config: &'a PipelineConfig,
    index: MetadataIndex,
    converters: Converters,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a PipelineConfig, index: MetadataIndex, converters: Converters) -> Self {
        Self {
            config,
            index,
            converters,
        }
    }

    /// Load the title list (empty if unreadable) and use the configured tools.
    pub fn from_config(config: &'a PipelineConfig) -> Self {
        let index = MetadataIndex::load_or_empty(&config.lookup_file);
        Self::new(config, index, Converters::from_config(config))
    }

    pub fn index(&self) -> &MetadataIndex {
        &self.index
    }

    /// Process every archive under the archive root.
    ///
    /// Only an unreadable archive root is an error; per-archive failures
    /// are recorded and the run continues.
    pub fn run(
        &self,
        sink: &mut dyn LogSink,
        progress: &dyn PipelineProgress,
    ) -> Result<RunReport, PipelineError> {
        let root = &self.config.archive_root;
        let archives = scan_archives(root, &self.config.extensions.archive).map_err(|source| {
            PipelineError::Scan {
                root: root.clone(),
                source,
            }
        })?;
        log::info!("Found {} archive(s) under {}", archives.len(), root.display());
        Ok(self.run_archives(&archives, sink, progress))
    }

    /// Process the given archives in order, then detect duplicates.
    pub fn run_archives(
        &self,
        archives: &[PathBuf],
        sink: &mut dyn LogSink,
        progress: &dyn PipelineProgress,
    ) -> RunReport {
        let mut report = RunReport {
            archives: archives.len(),
            ..Default::default()
        };

        for (i, archive) in archives.iter().enumerate() {
            progress.on_archive(i + 1, archives.len(), archive);
            let (outcome, title) = self.process_archive(archive, progress);

            if outcome.is_success() {
                report.succeeded += 1;
            } else {
                report.failed += 1;
            }
            if let Err(e) = sink.record_outcome(&outcome) {
                log::error!("Failed to record outcome for {}: {}", archive.display(), e);
                report.sink_errors += 1;
            }
            progress.on_archive_done(&outcome);
            report.titles.extend(title);
        }

        report.groups = detect_duplicates(&report.titles, self.config.series_key_len);
        for entry in report.groups.duplicate_entries() {
            if let Err(e) = sink.record_duplicate(&entry) {
                log::error!("Failed to record duplicate {}: {}", entry.identifier, e);
                report.sink_errors += 1;
            }
        }

        progress.on_complete(&report);
        report
    }

    /// Run one archive through every stage.
    ///
    /// Returns its outcome record and, on success, its title.
    pub fn process_archive(
        &self,
        archive: &Path,
        progress: &dyn PipelineProgress,
    ) -> (ProcessOutcome, Option<TitleRecord>) {
        let mut run = ArchiveRun::new(archive);
        match self.advance(&mut run, progress) {
            Ok(title) => (run.finish(OutcomeStatus::Success, None), Some(title)),
            Err(e) => {
                let failed_at = run.stage.next().unwrap_or(run.stage);
                log::error!(
                    "{} failed during {}: {}",
                    archive.display(),
                    failed_at.action(),
                    e
                );
                (run.finish(OutcomeStatus::Failed, Some(e.to_string())), None)
            }
        }
    }

    fn advance(
        &self,
        run: &mut ArchiveRun,
        progress: &dyn PipelineProgress,
    ) -> Result<TitleRecord, PipelineError> {
        let ext = &self.config.extensions;
        let archive = run.outcome.archive.clone();

        progress.on_event(&StageEvent::Extracting { archive: &archive });
        let folder = extract_archive(&archive)?;
        run.outcome.extracted_folder = Some(folder.clone());
        run.stage = Stage::Extracted;
        progress.on_event(&StageEvent::Extracted {
            archive: &archive,
            folder: &folder,
        });

        let source = locate_image(&folder, &ext.source)?;
        run.outcome.source_image = Some(source.clone());
        run.stage = Stage::Located;
        progress.on_event(&StageEvent::Located { image: &source });

        progress.on_event(&StageEvent::Converting {
            stage: ConversionStage::A,
            input: &source,
            extension: &ext.intermediate,
        });
        let intermediate = convert_to_intermediate(
            self.converters.to_intermediate.as_ref(),
            &source,
            &folder,
            &ext.intermediate,
        )?;
        run.outcome.intermediate_image = Some(intermediate.clone());
        run.stage = Stage::ConvertedA;
        progress.on_event(&StageEvent::Converted {
            stage: ConversionStage::A,
            input: &source,
            output: &intermediate,
        });

        let identifier = read_identifier_from_path(&intermediate).map_err(|source| {
            log::error!(
                "Failed to extract Game ID from {}: {}",
                intermediate.display(),
                source
            );
            PipelineError::IdentifierRead {
                path: intermediate.clone(),
                source,
            }
        })?;
        run.stage = Stage::IdExtracted;
        progress.on_event(&StageEvent::Identified {
            identifier: &identifier,
        });

        let resolved = self.index.resolve(&identifier);
        let region = resolved.region;
        run.outcome.region = Some(region);
        run.stage = Stage::Resolved;
        progress.on_event(&StageEvent::Resolved {
            region,
            name: resolved.name,
        });

        progress.on_event(&StageEvent::Converting {
            stage: ConversionStage::B,
            input: &intermediate,
            extension: &ext.final_image,
        });
        let final_image = convert_to_final(
            self.converters.to_final.as_ref(),
            &intermediate,
            &folder,
            &ext.final_image,
        )?;
        run.outcome.final_image = Some(final_image.clone());
        run.stage = Stage::ConvertedB;
        progress.on_event(&StageEvent::Converted {
            stage: ConversionStage::B,
            input: &intermediate,
            output: &final_image,
        });

        Ok(TitleRecord {
            identifier,
            region,
            name: resolved.name.to_string(),
            source_path: source,
        })
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
