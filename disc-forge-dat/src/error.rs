/// Errors that can occur while loading or fetching the title database.
#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load title database {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Download failed: {0}")]
    Download(String),
}

impl DatError {
    pub fn load(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Load {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }
}
