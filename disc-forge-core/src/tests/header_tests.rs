use super::*;
use std::io::Cursor;

/// A reader that hands out one byte per call.
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.0.split_first() {
            Some((&b, rest)) if !buf.is_empty() => {
                buf[0] = b;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn reads_first_six_bytes() {
    let mut data = b"RMCE01".to_vec();
    data.extend_from_slice(&[0u8; 64]);
    let id = read_identifier(&mut Cursor::new(data)).unwrap();
    assert_eq!(id, "RMCE01");
}

#[test]
fn ignores_bytes_after_identifier() {
    let id = read_identifier(&mut Cursor::new(b"ABCP01\xFF\xFFjunk".to_vec())).unwrap();
    assert_eq!(id, "ABCP01");
}

#[test]
fn handles_short_reads() {
    let id = read_identifier(&mut Trickle(b"GALE01rest")).unwrap();
    assert_eq!(id, "GALE01");
}

#[test]
fn too_small_image_fails() {
    let err = read_identifier(&mut Cursor::new(b"RMC".to_vec())).unwrap_err();
    match err {
        HeaderError::TooSmall { expected, actual } => {
            assert_eq!(expected, 6);
            assert_eq!(actual, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_image_fails() {
    let err = read_identifier(&mut Cursor::new(Vec::new())).unwrap_err();
    assert!(matches!(err, HeaderError::TooSmall { actual: 0, .. }));
}

#[test]
fn non_printable_bytes_fail() {
    let err = read_identifier(&mut Cursor::new(b"RM\x00E01".to_vec())).unwrap_err();
    match err {
        HeaderError::NotPrintable { offset, byte } => {
            assert_eq!(offset, 2);
            assert_eq!(byte, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_ascii_bytes_fail() {
    assert!(decode_identifier(&[b'R', b'M', 0xC3, 0xA9, b'0', b'1']).is_err());
    assert!(decode_identifier(&[b'R', b'M', b'C', 0x7F, b'0', b'1']).is_err());
}

#[test]
fn missing_file_is_io_error() {
    let err = read_identifier_from_path(Path::new("/nonexistent/disc-forge/image.iso"))
        .unwrap_err();
    assert!(matches!(err, HeaderError::Io(_)));
}
