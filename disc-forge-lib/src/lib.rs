//! The disc-forge conversion pipeline.
//!
//! Finds archives under a root folder, unpacks each one, converts its disc
//! image through two external tools, identifies the title from the image
//! header and records one outcome per archive. After the last archive,
//! titles sharing a series key are reported as cross-region duplicates.

pub mod bootstrap;
pub mod convert;
pub mod error;
pub mod extract;
pub mod locate;
pub mod pipeline;
pub mod progress;
pub mod scanner;
pub mod settings;
pub mod sink;

pub use bootstrap::{FetchReport, Prerequisite, fetch_prerequisites, missing_prerequisites};
pub use convert::{ConversionStage, ExternalTool, ImageConverter};
pub use error::{
    ArchiveError, BootstrapError, ConfigError, ConversionError, PipelineError, SinkError,
};
pub use pipeline::{Converters, Pipeline, RunReport, Stage};
pub use progress::{LogProgress, PipelineProgress, SilentProgress, StageEvent};
pub use settings::{PipelineConfig, resolve_config};
pub use sink::{LogSink, MemorySink, SqliteSink};
