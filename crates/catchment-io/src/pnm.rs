//! PGM (portable graymap) support
//!
//! Reads ASCII (`P2`) and binary (`P5`) graymaps with any maxval up to
//! 65535 and writes binary `P5`. Samples wider than 8 bits are stored
//! big-endian, two bytes per sample.

use crate::{IoError, IoResult, SampleWidth, encode_samples};
use catchment_core::Grid;
use std::io::{Read, Write};

const MAX_MAXVAL: u32 = 65_535;

/// Cursor over the header and ASCII body of a graymap
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while let Some(&b) = self.data.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'#' {
                break;
            }
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.data[start..self.pos])
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        let token = self
            .next_token()
            .ok_or_else(|| IoError::InvalidData(format!("PGM: missing {}", what)))?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| {
                IoError::InvalidData(format!(
                    "PGM: {} is not an unsigned integer: {:?}",
                    what,
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

/// Read a PGM grid (`P2` or `P5`) from a reader.
///
/// Returns the samples as intensities in `[0, maxval]`.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Grid<i32>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut tokens = Tokens::new(&bytes);
    let binary = match tokens.next_token() {
        Some(b"P2") => false,
        Some(b"P5") => true,
        Some(other) => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {} is not a graymap",
                String::from_utf8_lossy(other)
            )));
        }
        None => return Err(IoError::InvalidData("PGM: empty input".to_string())),
    };
    let width = tokens.next_u32("width")? as usize;
    let height = tokens.next_u32("height")? as usize;
    let maxval = tokens.next_u32("maxval")?;
    if maxval == 0 || maxval > MAX_MAXVAL {
        return Err(IoError::InvalidData(format!(
            "PGM: maxval {} outside 1..={}",
            maxval, MAX_MAXVAL
        )));
    }

    let count = width
        .checked_mul(height)
        .ok_or_else(|| IoError::InvalidData("PGM: dimensions overflow".to_string()))?;

    let samples: Vec<u32> = if binary {
        // Exactly one whitespace byte separates the header from the raster
        let start = tokens.pos + 1;
        let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
        let raster = count
            .checked_mul(bytes_per_sample)
            .and_then(|len| start.checked_add(len))
            .and_then(|end| bytes.get(start..end))
            .ok_or_else(|| IoError::InvalidData("PGM: truncated raster".to_string()))?;
        if bytes_per_sample == 1 {
            raster.iter().map(|&b| b as u32).collect()
        } else {
            raster
                .chunks_exact(2)
                .map(|pair| ((pair[0] as u32) << 8) | pair[1] as u32)
                .collect()
        }
    } else {
        // Every ASCII sample takes at least one byte of the remaining input
        if count > bytes.len() - tokens.pos {
            return Err(IoError::InvalidData("PGM: truncated raster".to_string()));
        }
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(tokens.next_u32("sample")?);
        }
        samples
    };

    if let Some(&bad) = samples.iter().find(|&&v| v > maxval) {
        return Err(IoError::InvalidData(format!(
            "PGM: sample {} exceeds maxval {}",
            bad, maxval
        )));
    }

    let data = samples.into_iter().map(|v| v as i32).collect();
    Ok(Grid::from_data(height, width, data)?)
}

/// Write a grid as binary PGM (`P5`) to a writer.
///
/// Uses maxval 255 when every sample fits in a byte and 65535 otherwise.
pub fn write_pnm<T, W>(grid: &Grid<T>, mut writer: W) -> IoResult<()>
where
    T: Copy + Into<u32>,
    W: Write,
{
    let (samples, sample_width) = encode_samples(grid, "PGM")?;
    let maxval = match sample_width {
        SampleWidth::Eight => 255,
        SampleWidth::Sixteen => MAX_MAXVAL,
    };

    write!(writer, "P5\n{} {}\n{}\n", grid.width(), grid.height(), maxval)?;
    writer.write_all(&samples)?;
    writer.flush()?;
    Ok(())
}
