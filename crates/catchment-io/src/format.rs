//! Grid file format detection
//!
//! Detects grid formats by examining magic numbers in the file header.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// On-disk formats a grid can be read from or written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridFormat {
    /// Portable graymap (`P2` ASCII or `P5` binary)
    Pnm,
    /// Grayscale PNG
    Png,
}

impl GridFormat {
    /// Conventional file extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            GridFormat::Pnm => "pgm",
            GridFormat::Png => "png",
        }
    }
}

/// Magic numbers for format detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// PGM formats
    pub const PGM_ASCII: &[u8] = b"P2";
    pub const PGM_BINARY: &[u8] = b"P5";
}

/// Detect grid format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<GridFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 8];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect grid format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<GridFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    // Check PNG (needs 8 bytes)
    if data.len() >= 8 && data.starts_with(magic::PNG) {
        return Ok(GridFormat::Png);
    }

    let first_two = &data[..2];
    if first_two == magic::PGM_ASCII || first_two == magic::PGM_BINARY {
        return Ok(GridFormat::Pnm);
    }

    Err(IoError::UnsupportedFormat(
        "unknown grid format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let data = [
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), GridFormat::Png);
    }

    #[test]
    fn test_detect_pgm() {
        assert_eq!(
            detect_format_from_bytes(b"P5\n100 100\n255\n").unwrap(),
            GridFormat::Pnm
        );
        assert_eq!(
            detect_format_from_bytes(b"P2\n3 1\n9\n0 1 2\n").unwrap(),
            GridFormat::Pnm
        );
    }

    #[test]
    fn test_colour_pnm_is_unknown() {
        // PPM carries RGB triples, not intensities
        assert!(matches!(
            detect_format_from_bytes(b"P6\n1 1\n255\n"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_too_short() {
        assert!(matches!(
            detect_format_from_bytes(b"P"),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_extension() {
        assert_eq!(GridFormat::Pnm.extension(), "pgm");
        assert_eq!(GridFormat::Png.extension(), "png");
    }
}
