//! Archive discovery under the archive root.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Check if a file has the given extension (case-insensitive, no dot).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Recursively collect every file under `root` with the archive extension,
/// sorted by path.
///
/// Folders left behind by earlier runs hold no archives, so they are simply
/// passed over. A missing root holds no archives. Any other unreadable root
/// is an error; unreadable entries below it are logged and skipped.
pub fn scan_archives(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    if !root.exists() {
        log::warn!("Archive folder {} does not exist", root.display());
        return Ok(archives);
    }
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            archives.push(entry.into_path());
        }
    }
    archives.sort();
    Ok(archives)
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
