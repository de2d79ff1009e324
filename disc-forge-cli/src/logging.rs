//! Log setup: `<timestamp> - LEVEL - message` to stderr, teed to a log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use log::LevelFilter;

/// Writes every log line to stderr and, if open, to a file without ANSI codes.
struct TeeWriter {
    file: Option<File>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Install the global logger.
///
/// `--quiet` and `--verbose` pick the level; otherwise `RUST_LOG` applies,
/// defaulting to info. The log file is appended to, never truncated.
pub(crate) fn init_logging(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let file = match logfile {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    let mut builder = if quiet || verbose {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(if quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Debug
        });
        builder
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    };

    builder
        // HTTP internals are noisy at debug level
        .filter_module("hyper_util", LevelFilter::Warn)
        .filter_module("reqwest", LevelFilter::Info)
        .filter_module("rustls", LevelFilter::Warn)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(TeeWriter { file })))
        .try_init()
        .map_err(io::Error::other)
}
