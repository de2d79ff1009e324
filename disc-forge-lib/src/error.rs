use std::io;
use std::path::PathBuf;

use disc_forge_core::HeaderError;
use disc_forge_dat::DatError;
use disc_forge_db::{OperationError, SchemaError};
use thiserror::Error;

use crate::convert::ConversionStage;

/// A failure while processing one archive.
///
/// Every variant is caught by the orchestrator and turned into a failed
/// process-log record; none of them aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The archive could not be unpacked (or removed after unpacking)
    #[error("Failed to extract {}: {reason}", archive.display())]
    Extraction { archive: PathBuf, reason: String },

    /// No source image with the expected extension was found
    #[error("No .{extension} image found in {}", folder.display())]
    ImageNotFound { folder: PathBuf, extension: String },

    /// A converter could not be started or exited unsuccessfully
    #[error("Conversion stage {stage} failed for {}: {source}", input.display())]
    Conversion {
        stage: ConversionStage,
        input: PathBuf,
        #[source]
        source: ConversionError,
    },

    /// The identifier could not be read from the intermediate image
    #[error("Failed to read identifier from {}: {source}", path.display())]
    IdentifierRead {
        path: PathBuf,
        #[source]
        source: HeaderError,
    },

    /// A temporary image could not be removed after a successful conversion
    #[error("Failed to remove {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The archive root could not be scanned
    #[error("Failed to scan {}: {source}", root.display())]
    Scan {
        root: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub fn extraction(archive: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Extraction {
            archive: archive.into(),
            reason: reason.to_string(),
        }
    }
}

/// A converter subprocess failure.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {diagnostic}")]
    Exit {
        program: String,
        status: String,
        diagnostic: String,
    },

    /// Used by in-process converters
    #[error("{0}")]
    Other(String),
}

impl ConversionError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Errors unpacking zip or 7z archives.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid 7z archive: {0}")]
    SevenZ(String),

    #[error("Unsafe entry path in archive: {0}")]
    UnsafePath(String),
}

/// Errors writing to the process log.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors loading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors fetching the converters or the title list.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Download(#[from] DatError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported tool archive format: {0}")]
    UnsupportedArchive(String),

    #[error("{name} not found in archive downloaded from {url}")]
    ExecutableNotFound { name: String, url: String },
}
