//! External disc-image converters.
//!
//! Converter A turns the compressed source image into an uncompressed
//! intermediate image; converter B turns that into the final format. Both
//! run as blocking subprocesses with an argument template from the config.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::{ConversionError, PipelineError};
use crate::settings::{FORMAT_PLACEHOLDER, INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER, ToolConfig};

/// Which of the two conversions failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    /// Source image to intermediate image
    A,
    /// Intermediate image to final image
    B,
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionStage::A => f.write_str("A"),
            ConversionStage::B => f.write_str("B"),
        }
    }
}

/// Converts one image file into another.
pub trait ImageConverter {
    /// Write `output` from `input`. Success means the tool reported success.
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError>;

    /// Short name used in log messages.
    fn name(&self) -> String;
}

/// A converter backed by an external command-line tool.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: PathBuf,
    args: Vec<String>,
    format: String,
}

impl ExternalTool {
    pub fn new(program: impl AsRef<Path>, args: Vec<String>) -> Self {
        Self {
            program: resolve_program(program.as_ref()),
            args,
            format: String::new(),
        }
    }

    /// Build from a configured tool; `format` fills the `{format}` placeholder.
    pub fn from_config(tool: &ToolConfig, format: &str) -> Self {
        Self {
            format: format.to_string(),
            ..Self::new(&tool.path, tool.args.clone())
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Expand the argument template for one conversion.
    ///
    /// An argument that is exactly a path placeholder is passed through as
    /// the raw path; placeholders embedded in longer arguments are replaced
    /// textually.
    pub fn command_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| match arg.as_str() {
                INPUT_PLACEHOLDER => input.as_os_str().to_owned(),
                OUTPUT_PLACEHOLDER => output.as_os_str().to_owned(),
                _ => arg
                    .replace(FORMAT_PLACEHOLDER, &self.format)
                    .replace(INPUT_PLACEHOLDER, &input.to_string_lossy())
                    .replace(OUTPUT_PLACEHOLDER, &output.to_string_lossy())
                    .into(),
            })
            .collect()
    }
}

impl ImageConverter for ExternalTool {
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError> {
        let args = self.command_args(input, output);
        log::debug!("Running {} {:?}", self.program.display(), args);

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ConversionError::Spawn {
                program: self.name(),
                source,
            })?;

        if result.status.success() {
            let stdout = String::from_utf8_lossy(&result.stdout);
            if !stdout.trim().is_empty() {
                log::debug!("{}: {}", self.name(), stdout.trim());
            }
            Ok(())
        } else {
            Err(ConversionError::Exit {
                program: self.name(),
                status: result.status.to_string(),
                diagnostic: diagnostic(&result),
            })
        }
    }

    fn name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

/// True for a plain program name such as `wit`, which `Command` looks up
/// on `PATH` only.
pub fn is_bare_program(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// The program `Command` should spawn for a configured tool path.
///
/// A bare name that exists in the working directory becomes `./<name>`,
/// since `Command` never searches the working directory.
pub fn resolve_program(path: &Path) -> PathBuf {
    resolve_program_in(path, Path::new("."))
}

pub(crate) fn resolve_program_in(path: &Path, dir: &Path) -> PathBuf {
    let local = dir.join(path);
    if is_bare_program(path) && local.is_file() {
        local
    } else {
        path.to_path_buf()
    }
}

/// Stderr if the tool wrote any, otherwise stdout.
fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        "no output".to_string()
    } else {
        stdout.trim().to_string()
    }
}

/// `<folder>/<stem of image>.<extension>`.
///
/// Only the last extension of `image` is replaced, so dotted titles such as
/// `Game v1.1.rvz` keep their full stem.
pub fn output_path(image: &Path, folder: &Path, extension: &str) -> PathBuf {
    let mut name = image.file_stem().unwrap_or(image.as_os_str()).to_os_string();
    name.push(".");
    name.push(extension);
    folder.join(name)
}

/// Run converter A on the source image, writing the intermediate image into `folder`.
pub fn convert_to_intermediate(
    converter: &dyn ImageConverter,
    source: &Path,
    folder: &Path,
    extension: &str,
) -> Result<PathBuf, PipelineError> {
    let output = output_path(source, folder, extension);
    converter
        .convert(source, &output)
        .map_err(|e| PipelineError::Conversion {
            stage: ConversionStage::A,
            input: source.to_path_buf(),
            source: e,
        })?;
    Ok(output)
}

/// Run converter B on the intermediate image, then delete the intermediate.
///
/// The intermediate is only removed once the converter has succeeded.
pub fn convert_to_final(
    converter: &dyn ImageConverter,
    intermediate: &Path,
    folder: &Path,
    extension: &str,
) -> Result<PathBuf, PipelineError> {
    let output = output_path(intermediate, folder, extension);
    converter
        .convert(intermediate, &output)
        .map_err(|e| PipelineError::Conversion {
            stage: ConversionStage::B,
            input: intermediate.to_path_buf(),
            source: e,
        })?;
    fs::remove_file(intermediate).map_err(|source| PipelineError::Cleanup {
        path: intermediate.to_path_buf(),
        source,
    })?;
    log::debug!("Removed {}", intermediate.display());
    Ok(output)
}

#[cfg(test)]
#[path = "tests/convert_tests.rs"]
mod tests;
