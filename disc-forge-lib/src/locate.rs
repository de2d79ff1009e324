//! Finding the source image inside an extracted folder.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::PipelineError;
use crate::scanner::has_extension;

/// Return the first file under `folder` with the given extension.
///
/// Traversal is recursive and in file-name order, so the match is stable
/// across runs when a folder holds several images.
pub fn locate_image(folder: &Path, extension: &str) -> Result<PathBuf, PipelineError> {
    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", folder.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            return Ok(entry.into_path());
        }
    }
    Err(PipelineError::ImageNotFound {
        folder: folder.to_path_buf(),
        extension: extension.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/locate_tests.rs"]
mod tests;
