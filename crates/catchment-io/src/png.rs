//! PNG grid support
//!
//! Only grayscale PNGs carry intensities; palette and colour images are
//! rejected rather than converted.

use crate::{IoError, IoResult, SampleWidth, encode_samples};
use catchment_core::Grid;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a grayscale PNG as an intensity grid
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Grid<i32>> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width as usize;
    let height = info.height as usize;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    if color_type != ColorType::Grayscale {
        return Err(IoError::UnsupportedFormat(format!(
            "PNG color type {:?} is not grayscale",
            color_type
        )));
    }

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut samples = Vec::with_capacity(width * height);

    for y in 0..height {
        let row = &data[y * bytes_per_row..(y + 1) * bytes_per_row];
        match bit_depth {
            BitDepth::Eight => {
                samples.extend(row[..width].iter().map(|&v| v as i32));
            }
            BitDepth::Sixteen => {
                samples.extend(
                    row[..width * 2]
                        .chunks_exact(2)
                        .map(|pair| ((pair[0] as i32) << 8) | pair[1] as i32),
                );
            }
            // 1, 2 and 4 bits, packed MSB first
            _ => {
                let bits = bit_depth as usize;
                let per_byte = 8 / bits;
                let mask = (1u8 << bits) - 1;
                for x in 0..width {
                    let shift = 8 - bits * (x % per_byte + 1);
                    samples.push(((row[x / per_byte] >> shift) & mask) as i32);
                }
            }
        }
    }

    Ok(Grid::from_data(height, width, samples)?)
}

/// Write a grid as a grayscale PNG
///
/// The image is 8-bit when every sample fits in a byte and 16-bit otherwise.
pub fn write_png<T, W>(grid: &Grid<T>, writer: W) -> IoResult<()>
where
    T: Copy + Into<u32>,
    W: Write,
{
    let width = u32::try_from(grid.width())
        .map_err(|_| IoError::EncodeError("PNG width exceeds u32".to_string()))?;
    let height = u32::try_from(grid.height())
        .map_err(|_| IoError::EncodeError("PNG height exceeds u32".to_string()))?;
    let (data, sample_width) = encode_samples(grid, "PNG")?;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(match sample_width {
        SampleWidth::Eight => BitDepth::Eight,
        SampleWidth::Sixteen => BitDepth::Sixteen,
    });

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
