//! Disc header identifier extraction.
//!
//! GameCube and Wii disc images start with a six-character ASCII game
//! code. Only uncompressed images (ISO) expose it at offset 0, which is why
//! the pipeline reads it from the intermediate image rather than the
//! compressed source.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::HeaderError;
use crate::identifier::IDENTIFIER_LEN;

/// Read the identifier from the first [`IDENTIFIER_LEN`] bytes of `reader`.
///
/// Every byte must be printable ASCII (0x20..=0x7E). A reader that ends
/// before six bytes yields [`HeaderError::TooSmall`].
pub fn read_identifier(reader: &mut dyn Read) -> Result<String, HeaderError> {
    let mut buf = [0u8; IDENTIFIER_LEN];
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    if filled < IDENTIFIER_LEN {
        return Err(HeaderError::TooSmall {
            expected: IDENTIFIER_LEN as u64,
            actual: filled as u64,
        });
    }
    decode_identifier(&buf)
}

/// Open `path` and read its identifier.
pub fn read_identifier_from_path(path: &Path) -> Result<String, HeaderError> {
    let mut file = File::open(path)?;
    read_identifier(&mut file)
}

/// Decode identifier bytes as printable ASCII.
pub fn decode_identifier(bytes: &[u8]) -> Result<String, HeaderError> {
    if let Some((offset, &byte)) = bytes
        .iter()
        .enumerate()
        .find(|&(_, &b)| !(0x20..0x7F).contains(&b))
    {
        return Err(HeaderError::NotPrintable { offset, byte });
    }
    Ok(bytes.iter().map(|&b| b as char).collect())
}

#[cfg(test)]
#[path = "tests/header_tests.rs"]
mod tests;
