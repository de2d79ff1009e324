use thiserror::Error;

/// Errors that can occur while reading the identifier from a disc header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// I/O error while reading the image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image is too small to contain an identifier
    #[error("image too small: expected at least {expected} bytes, got {actual}")]
    TooSmall { expected: u64, actual: u64 },

    /// The header bytes are not printable ASCII
    #[error("non-printable byte 0x{byte:02X} at offset {offset} in identifier")]
    NotPrintable { offset: usize, byte: u8 },
}
