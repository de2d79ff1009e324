pub(crate) mod config;
pub(crate) mod duplicates;
pub(crate) mod fetch;
pub(crate) mod history;
pub(crate) mod run;

use std::path::Path;

use disc_forge_db::Connection;

use crate::CliError;

/// Open an existing process log for the inspection commands.
pub(crate) fn open_log(path: &Path) -> Result<Connection, CliError> {
    if !path.is_file() {
        return Err(CliError::database(format!(
            "No process log at {} (run `disc-forge run` first)",
            path.display()
        )));
    }
    disc_forge_db::open_database(path).map_err(|e| CliError::database(e.to_string()))
}
