//! Title list download.
//!
//! The title list is fetched once when missing; steady-state runs only read
//! the local copy.

use std::fs;
use std::path::Path;

use crate::error::DatError;
use crate::titledb;

/// Default download URL for the GameTDB Wii title list (original-language names).
pub const DEFAULT_TITLEDB_URL: &str = "https://www.gametdb.com/wiitdb.txt?LANG=ORIG";

/// Some mirrors reject requests without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0";

/// Download `url` into memory.
pub fn http_get(url: &str) -> Result<Vec<u8>, DatError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DatError::download(format!("Failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| DatError::download(format!("Failed to download {url}: {e}")))?;

    log::info!("Response: {} ({url})", response.status());
    if !response.status().is_success() {
        return Err(DatError::download(format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .map_err(|e| DatError::download(format!("Failed to read response from {url}: {e}")))?;
    Ok(bytes.to_vec())
}

/// Download the title list to `dest`. Returns the number of titles it holds.
pub fn fetch_titledb(url: &str, dest: &Path) -> Result<usize, DatError> {
    log::info!("Downloading title database from {url}");
    let bytes = http_get(url)?;

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Write atomically so an interrupted download never leaves a partial list
    let tmp = dest.with_extension("txt.tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, dest)?;

    let count = titledb::parse_titledb(&String::from_utf8_lossy(&bytes)).len();
    log::info!("Saved {} titles to {}", count, dest.display());
    Ok(count)
}
