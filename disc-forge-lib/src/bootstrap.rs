//! One-time download of the converters and the title list.
//!
//! Tools ship as release archives (zip or 7z). The archive is downloaded
//! into a staging folder next to the configured tool path, unpacked, the
//! named executable moved into place, and the staging folder removed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::convert::{is_bare_program, resolve_program_in};
use crate::error::BootstrapError;
use crate::extract::{unpack_7z, unpack_zip};
use crate::settings::{PipelineConfig, ToolDownload};

/// Something a run needs before it can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    LookupFile,
    ConverterA,
    ConverterB,
}

impl Prerequisite {
    pub const ALL: [Prerequisite; 3] = [
        Prerequisite::LookupFile,
        Prerequisite::ConverterA,
        Prerequisite::ConverterB,
    ];

    /// Local path of this prerequisite.
    pub fn path(self, config: &PipelineConfig) -> &Path {
        match self {
            Prerequisite::LookupFile => &config.lookup_file,
            Prerequisite::ConverterA => &config.converter_a.path,
            Prerequisite::ConverterB => &config.converter_b.path,
        }
    }

    pub fn is_tool(self) -> bool {
        !matches!(self, Prerequisite::LookupFile)
    }

    /// Whether the prerequisite is already available.
    pub fn is_present(self, config: &PipelineConfig) -> bool {
        let path = self.path(config);
        if self.is_tool() {
            tool_available(path)
        } else {
            path.is_file()
        }
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Prerequisite::LookupFile => "title list",
            Prerequisite::ConverterA => "converter A",
            Prerequisite::ConverterB => "converter B",
        })
    }
}

/// True if the program a converter would spawn for `path` exists.
///
/// Mirrors [`crate::convert::resolve_program`]: a bare name is taken from the working
/// directory when present there, otherwise looked up on `PATH`.
pub fn tool_available(path: &Path) -> bool {
    tool_available_in(path, Path::new("."))
}

fn tool_available_in(path: &Path, dir: &Path) -> bool {
    let program = resolve_program_in(path, dir);
    if !is_bare_program(&program) {
        return program.is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(&program).is_file()))
        .unwrap_or(false)
}

/// Prerequisites that are not available locally.
pub fn missing_prerequisites(config: &PipelineConfig) -> Vec<Prerequisite> {
    Prerequisite::ALL
        .into_iter()
        .filter(|p| !p.is_present(config))
        .collect()
}

/// What a fetch did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub fetched: Vec<Prerequisite>,
    pub skipped: Vec<Prerequisite>,
}

/// Download every missing prerequisite (all of them with `force`).
///
/// Stops at the first failure.
pub fn fetch_prerequisites(
    config: &PipelineConfig,
    force: bool,
) -> Result<FetchReport, BootstrapError> {
    let mut report = FetchReport::default();
    for prerequisite in Prerequisite::ALL {
        if !force && prerequisite.is_present(config) {
            log::debug!(
                "{} present at {}",
                prerequisite,
                prerequisite.path(config).display()
            );
            report.skipped.push(prerequisite);
            continue;
        }
        log::warn!(
            "{} not found at {}",
            prerequisite,
            prerequisite.path(config).display()
        );
        fetch(config, prerequisite)?;
        report.fetched.push(prerequisite);
    }
    Ok(report)
}

/// Download one prerequisite to its configured path.
pub fn fetch(config: &PipelineConfig, prerequisite: Prerequisite) -> Result<(), BootstrapError> {
    let dest = prerequisite.path(config);
    match prerequisite {
        Prerequisite::LookupFile => {
            disc_forge_dat::fetch_titledb(&config.bootstrap.lookup_url, dest)?;
        }
        Prerequisite::ConverterA => fetch_tool(&config.bootstrap.converter_a, dest)?,
        Prerequisite::ConverterB => fetch_tool(&config.bootstrap.converter_b, dest)?,
    }
    Ok(())
}

/// Kind of tool release archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    SevenZ,
}

/// Archive kind from a download URL's file extension (query string ignored).
pub fn archive_kind(url: &str) -> Option<ArchiveKind> {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_ascii_lowercase();
    if path.ends_with(".zip") {
        Some(ArchiveKind::Zip)
    } else if path.ends_with(".7z") {
        Some(ArchiveKind::SevenZ)
    } else {
        None
    }
}

/// Download a tool archive and install its executable at `dest`.
pub fn fetch_tool(download: &ToolDownload, dest: &Path) -> Result<(), BootstrapError> {
    let kind = archive_kind(&download.url)
        .ok_or_else(|| BootstrapError::UnsupportedArchive(download.url.clone()))?;

    log::info!("Downloading {} from {}", download.executable, download.url);
    let bytes = disc_forge_dat::http_get(&download.url)?;

    let staging = staging_dir(dest);
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging)?;

    let archive = staging.join(match kind {
        ArchiveKind::Zip => "download.zip",
        ArchiveKind::SevenZ => "download.7z",
    });
    fs::write(&archive, &bytes)?;
    log::info!("Saved {} ({} bytes)", archive.display(), bytes.len());

    let result = install_tool_archive(&archive, kind, &download.executable, dest);
    let cleanup = fs::remove_dir_all(&staging);
    match result {
        Err(BootstrapError::ExecutableNotFound { name, .. }) => {
            return Err(BootstrapError::ExecutableNotFound {
                name,
                url: download.url.clone(),
            });
        }
        Err(e) => return Err(e),
        Ok(()) => {}
    }
    cleanup?;
    log::info!("Deleted {}", staging.display());
    Ok(())
}

/// Unpack a downloaded tool archive and move `executable` from it to `dest`.
///
/// The archive is unpacked into a sibling `extracted` folder, which is left
/// for the caller to remove.
pub fn install_tool_archive(
    archive: &Path,
    kind: ArchiveKind,
    executable: &str,
    dest: &Path,
) -> Result<(), BootstrapError> {
    let unpacked = archive.with_file_name("extracted");
    match kind {
        ArchiveKind::Zip => {
            unpack_zip(archive, &unpacked)?;
        }
        ArchiveKind::SevenZ => unpack_7z(archive, &unpacked)?,
    }
    log::info!("Extracted {} to {}", archive.display(), unpacked.display());

    let found =
        find_file(&unpacked, executable).ok_or_else(|| BootstrapError::ExecutableNotFound {
            name: executable.to_string(),
            url: archive.display().to_string(),
        })?;

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if fs::rename(&found, dest).is_err() {
        fs::copy(&found, dest)?;
        fs::remove_file(&found)?;
    }
    make_executable(dest)?;
    log::info!("Saved {} to {}", executable, dest.display());
    Ok(())
}

/// First file under `root` named `name` (case-insensitive), in name order.
pub fn find_file(root: &Path, name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| {
            e.file_type().is_file()
                && e.file_name()
                    .to_str()
                    .map(|n| n.eq_ignore_ascii_case(name))
                    .unwrap_or(false)
        })
        .map(|e| e.into_path())
}

fn staging_dir(dest: &Path) -> PathBuf {
    let parent = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tool".to_string());
    parent.join(format!(".{name}-download"))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "tests/bootstrap_tests.rs"]
mod tests;
