//! Pipeline configuration.
//!
//! The CLI resolves one config file (explicit `--config`, then
//! `./disc-forge.toml`, then `~/.config/disc-forge/config.toml`) and falls
//! back to built-in defaults. Every missing key takes its default, so a
//! config file only needs the values it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "disc-forge.toml";

/// Placeholder replaced with the converter's input path.
pub const INPUT_PLACEHOLDER: &str = "{input}";
/// Placeholder replaced with the converter's output path.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";
/// Placeholder replaced with the intermediate image format.
pub const FORMAT_PLACEHOLDER: &str = "{format}";

/// Everything a pipeline run needs: paths, tool locations, file extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Folder scanned recursively for archives
    pub archive_root: PathBuf,
    /// SQLite process log
    pub database: PathBuf,
    /// `IDENTIFIER = Name` title list
    pub lookup_file: PathBuf,
    /// Log file the CLI tees its output to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Number of leading identifier characters that form the series key
    pub series_key_len: usize,
    pub extensions: Extensions,
    /// Source image to intermediate image
    pub converter_a: ToolConfig,
    /// Intermediate image to final image
    pub converter_b: ToolConfig,
    pub bootstrap: BootstrapConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            archive_root: PathBuf::from("games"),
            database: PathBuf::from("file_processing_log.sqlite"),
            lookup_file: PathBuf::from("wiitdb.txt"),
            log_file: Some(PathBuf::from("disc-forge.log")),
            series_key_len: disc_forge_core::SERIES_KEY_LEN,
            extensions: Extensions::default(),
            converter_a: ToolConfig {
                path: tool_path("DolphinTool"),
                args: vec![
                    "convert".into(),
                    "-i".into(),
                    INPUT_PLACEHOLDER.into(),
                    "-o".into(),
                    OUTPUT_PLACEHOLDER.into(),
                    "-f".into(),
                    FORMAT_PLACEHOLDER.into(),
                ],
            },
            converter_b: ToolConfig {
                path: tool_path("wit"),
                args: vec![
                    "COPY".into(),
                    INPUT_PLACEHOLDER.into(),
                    OUTPUT_PLACEHOLDER.into(),
                    "-P".into(),
                    "-B".into(),
                ],
            },
            bootstrap: BootstrapConfig::default(),
        }
    }
}

fn tool_path(stem: &str) -> PathBuf {
    PathBuf::from(format!("{stem}{}", std::env::consts::EXE_SUFFIX))
}

/// File extensions (without the dot) for each kind of file the pipeline touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    pub archive: String,
    pub source: String,
    /// Also passed to converter A as its output format
    pub intermediate: String,
    #[serde(rename = "final")]
    pub final_image: String,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            archive: "zip".into(),
            source: "rvz".into(),
            intermediate: "iso".into(),
            final_image: "wbfs".into(),
        }
    }
}

/// An external converter: executable plus argument template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub path: PathBuf,
    pub args: Vec<String>,
}

/// Where `fetch` downloads the prerequisites from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub lookup_url: String,
    pub converter_a: ToolDownload,
    pub converter_b: ToolDownload,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            lookup_url: disc_forge_dat::DEFAULT_TITLEDB_URL.into(),
            converter_a: ToolDownload {
                url: "https://dl.dolphin-emu.org/releases/2409/dolphin-2409-x64.7z".into(),
                executable: "DolphinTool.exe".into(),
            },
            converter_b: ToolDownload {
                url: "https://wit.wiimm.de/download/wit-v3.05a-r8638-cygwin64.zip".into(),
                executable: "wit.exe".into(),
            },
        }
    }
}

/// A tool release archive and the executable to take from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDownload {
    pub url: String,
    /// File name of the executable inside the archive
    pub executable: String,
}

impl PipelineConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents, path)
    }

    /// Pretty-printed TOML for `config show` and `config init`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write this config to `path`, refusing to overwrite an existing file.
    pub fn write_new(&self, path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

/// Per-user config file: `~/.config/disc-forge/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("disc-forge").join("config.toml"))
}

/// Find the config file to use, in priority order:
///
/// 1. Explicit path (returned even if missing, so loading reports the error)
/// 2. `./disc-forge.toml`
/// 3. The per-user config file
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    user_config_path().filter(|p| p.is_file())
}

/// Load the effective config and report which file it came from.
///
/// With no config file anywhere the built-in defaults are returned.
pub fn resolve_config(
    explicit: Option<&Path>,
) -> Result<(PipelineConfig, Option<PathBuf>), ConfigError> {
    match find_config_file(explicit) {
        Some(path) => {
            let config = PipelineConfig::load(&path)?;
            log::debug!("Loaded config from {}", path.display());
            Ok((config, Some(path)))
        }
        None => Ok((PipelineConfig::default(), None)),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
