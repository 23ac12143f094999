//! catchment-io - Grid I/O for catchment
//!
//! Reads intensity grids from and writes label or line grids to:
//!
//! - PGM (`P2` ASCII and `P5` binary, up to 16 bits per sample)
//! - PNG (grayscale, 1 to 16 bits per sample)
//!
//! Decoded grids are `Grid<i32>`, ready for the watershed engines. Any grid
//! whose samples convert into `u32` can be written, as long as every sample
//! fits in 16 bits.
//!
//! # Examples
//!
//! ```
//! use catchment_core::Grid;
//! use catchment_io::{GridFormat, read_grid_mem, write_grid_mem};
//!
//! let lines = Grid::from_rows(&[[255u8, 0, 255]]).unwrap();
//! let bytes = write_grid_mem(&lines, GridFormat::Pnm).unwrap();
//! let back = read_grid_mem(&bytes).unwrap();
//! assert_eq!(back.data(), &[255, 0, 255]);
//! ```

pub mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{GridFormat, detect_format, detect_format_from_bytes};

use catchment_core::Grid;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Bytes per encoded sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SampleWidth {
    Eight,
    Sixteen,
}

/// Flatten a grid into big-endian samples of the narrowest width that fits.
pub(crate) fn encode_samples<T: Copy + Into<u32>>(
    grid: &Grid<T>,
    format: &'static str,
) -> IoResult<(Vec<u8>, SampleWidth)> {
    let mut max = 0u32;
    for &v in grid.data() {
        let v: u32 = v.into();
        if v > u16::MAX as u32 {
            return Err(IoError::SampleOutOfRange { value: v, format });
        }
        max = max.max(v);
    }

    let to_u32 = |&v: &T| -> u32 { v.into() };
    if max <= u8::MAX as u32 {
        let data = grid.data().iter().map(|v| to_u32(v) as u8).collect();
        Ok((data, SampleWidth::Eight))
    } else {
        let data = grid
            .data()
            .iter()
            .flat_map(|v| (to_u32(v) as u16).to_be_bytes())
            .collect();
        Ok((data, SampleWidth::Sixteen))
    }
}

/// Read an intensity grid from a file, detecting the format from its header
pub fn read_grid<P: AsRef<Path>>(path: P) -> IoResult<Grid<i32>> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    read_grid_format(reader, format)
}

/// Read an intensity grid from memory, detecting the format from its header
pub fn read_grid_mem(data: &[u8]) -> IoResult<Grid<i32>> {
    let format = detect_format_from_bytes(data)?;
    read_grid_format(std::io::Cursor::new(data), format)
}

fn read_grid_format<R>(reader: R, format: GridFormat) -> IoResult<Grid<i32>>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "pnm")]
        GridFormat::Pnm => pnm::read_pnm(reader),
        #[cfg(feature = "png-format")]
        GridFormat::Png => png::read_png(reader),
        #[cfg(not(all(feature = "pnm", feature = "png-format")))]
        _ => {
            drop(reader);
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                format
            )))
        }
    }
}

/// Write a grid to a file in the given format
pub fn write_grid<T, P>(grid: &Grid<T>, path: P, format: GridFormat) -> IoResult<()>
where
    T: Copy + Into<u32>,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    write_grid_format(grid, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode a grid into an in-memory buffer in the given format
pub fn write_grid_mem<T: Copy + Into<u32>>(grid: &Grid<T>, format: GridFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_grid_format(grid, &mut buffer, format)?;
    Ok(buffer)
}

fn write_grid_format<T, W>(grid: &Grid<T>, writer: W, format: GridFormat) -> IoResult<()>
where
    T: Copy + Into<u32>,
    W: Write,
{
    match format {
        #[cfg(feature = "pnm")]
        GridFormat::Pnm => pnm::write_pnm(grid, writer),
        #[cfg(feature = "png-format")]
        GridFormat::Png => png::write_png(grid, writer),
        #[cfg(not(all(feature = "pnm", feature = "png-format")))]
        _ => {
            drop((grid, writer));
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                format
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(all(feature = "pnm", feature = "png-format"))]
    #[test]
    fn test_mem_roundtrip_both_formats() {
        let labels = Grid::from_rows(&[[1u32, 1, 0], [2, 2, 0]]).unwrap();
        for format in [GridFormat::Pnm, GridFormat::Png] {
            let bytes = write_grid_mem(&labels, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            let back = read_grid_mem(&bytes).unwrap();
            assert_eq!(back.data(), &[1, 1, 0, 2, 2, 0]);
        }
    }

    #[cfg(not(feature = "png-format"))]
    #[test]
    fn test_png_needs_its_feature() {
        let grid = Grid::from_rows(&[[1u8, 2]]).unwrap();
        let err = write_grid_mem(&grid, GridFormat::Png).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[cfg(all(feature = "pnm", feature = "png-format"))]
    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join("catchment-io-test");
        std::fs::create_dir_all(&dir).unwrap();
        let grid = Grid::from_rows(&[[0u16, 500], [1000, 7]]).unwrap();

        for format in [GridFormat::Pnm, GridFormat::Png] {
            let path = dir.join(format!("roundtrip.{}", format.extension()));
            write_grid(&grid, &path, format).unwrap();
            let back = read_grid(&path).unwrap();
            assert_eq!(back, grid.map(|v| v as i32));
        }
    }

    #[test]
    fn test_encode_samples_width() {
        let narrow = Grid::from_rows(&[[0u32, 255]]).unwrap();
        let (bytes, width) = encode_samples(&narrow, "test").unwrap();
        assert_eq!(width, SampleWidth::Eight);
        assert_eq!(bytes, vec![0, 255]);

        let wide = Grid::from_rows(&[[1u32, 256]]).unwrap();
        let (bytes, width) = encode_samples(&wide, "test").unwrap();
        assert_eq!(width, SampleWidth::Sixteen);
        assert_eq!(bytes, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_read_unknown_bytes() {
        assert!(matches!(
            read_grid_mem(b"GIF89a......"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
