//! Archive extraction.
//!
//! Game archives are zip files unpacked next to themselves and then
//! deleted. Tool downloads may also be 7z, handled by [`unpack_7z`].

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ArchiveError, PipelineError};

/// Folder an archive extracts into: the archive path without its extension.
pub fn extraction_folder(archive: &Path) -> PathBuf {
    archive.with_extension("")
}

/// Unpack `archive` into [`extraction_folder`] and delete the archive.
///
/// If unpacking fails the archive is left in place.
pub fn extract_archive(archive: &Path) -> Result<PathBuf, PipelineError> {
    let dest = extraction_folder(archive);
    let files = unpack_zip(archive, &dest).map_err(|e| PipelineError::extraction(archive, e))?;
    log::debug!(
        "Unpacked {} file(s) from {} into {}",
        files,
        archive.display(),
        dest.display()
    );
    fs::remove_file(archive).map_err(|e| PipelineError::extraction(archive, e))?;
    Ok(dest)
}

/// Unpack every entry of a zip file under `dest`. Returns the number of files written.
///
/// Entries whose names would escape `dest` are rejected.
pub fn unpack_zip(archive: &Path, dest: &Path) -> Result<usize, ArchiveError> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    fs::create_dir_all(dest)?;

    let mut files = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ArchiveError::UnsafePath(entry.name().to_string()))?;
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
        files += 1;
    }
    Ok(files)
}

/// Unpack a 7z file under `dest`.
pub fn unpack_7z(archive: &Path, dest: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(dest)?;
    sevenz_rust::decompress_file(archive, dest).map_err(|e| ArchiveError::SevenZ(e.to_string()))
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
