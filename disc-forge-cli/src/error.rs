use thiserror::Error;

/// Errors that stop a command before or outside the per-archive work.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Process log could not be opened or read
    #[error("Database error: {0}")]
    Database(String),

    /// A prerequisite could not be downloaded or is missing
    #[error("Setup error: {0}")]
    Bootstrap(String),

    /// The run could not start
    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn bootstrap(msg: impl Into<String>) -> Self {
        Self::Bootstrap(msg.into())
    }

    pub(crate) fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }
}
