//! Uncompressed 24-bit BMP reading and writing.
//!
//! Layout: a 14-byte file header, a 40-byte info header, then `width * height`
//! pixels of 3 bytes each in blue-green-red order. Rows are not padded. The
//! first stored row is row 0 of the pixel grid (the bottom row of the image).
//! Channels are stored as `(c * 255) as u8` and read back as `byte / 255`.

use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use thiserror::Error;

use crate::material::Color;

/// Size of the `BM` file header in bytes.
pub const FILE_HEADER_SIZE: usize = 14;

/// Size of the BITMAPINFOHEADER in bytes.
pub const INFO_HEADER_SIZE: usize = 40;

const PIXEL_OFFSET_FIELD: usize = 10;
const WIDTH_FIELD: usize = 18;
const HEIGHT_FIELD: usize = 22;
const BIT_COUNT_FIELD: usize = 28;

/// Errors that can occur while decoding or encoding a bitmap.
#[derive(Error, Debug)]
pub enum BmpError {
    #[error("bitmap is too short: {0} bytes")]
    TooShort(usize),

    #[error("missing BM signature")]
    BadSignature,

    #[error("unsupported bit depth: {0} (expected 24)")]
    UnsupportedBitDepth(u16),

    #[error("invalid bitmap dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("pixel data truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("pixel count {actual} does not match {width}x{height}")]
    PixelCount { width: u32, height: u32, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type BmpResult<T> = Result<T, BmpError>;

/// Decoded pixel grid, row-major with row 0 first.
#[derive(Clone, Debug)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

/// Decode a 24-bit bitmap from memory.
pub fn decode(bytes: &[u8]) -> BmpResult<Bitmap> {
    if bytes.len() < FILE_HEADER_SIZE + INFO_HEADER_SIZE {
        return Err(BmpError::TooShort(bytes.len()));
    }
    if &bytes[0..2] != b"BM" {
        return Err(BmpError::BadSignature);
    }

    let bit_count = LittleEndian::read_u16(&bytes[BIT_COUNT_FIELD..]);
    if bit_count != 24 {
        return Err(BmpError::UnsupportedBitDepth(bit_count));
    }

    let offset = LittleEndian::read_u32(&bytes[PIXEL_OFFSET_FIELD..]) as usize;
    let raw_width = LittleEndian::read_i32(&bytes[WIDTH_FIELD..]);
    let raw_height = LittleEndian::read_i32(&bytes[HEIGHT_FIELD..]);
    if raw_width <= 0 || raw_height <= 0 {
        return Err(BmpError::InvalidDimensions {
            width: raw_width,
            height: raw_height,
        });
    }
    let (width, height) = (raw_width as u32, raw_height as u32);

    let expected = width as usize * height as usize * 3;
    let data = bytes.get(offset..).unwrap_or(&[]);
    if data.len() < expected {
        return Err(BmpError::Truncated {
            expected,
            actual: data.len(),
        });
    }

    let pixels = data[..expected]
        .chunks_exact(3)
        .map(|bgr| {
            Color::new(
                bgr[2] as f32 / 255.0,
                bgr[1] as f32 / 255.0,
                bgr[0] as f32 / 255.0,
            )
        })
        .collect();

    Ok(Bitmap {
        width,
        height,
        pixels,
    })
}

/// Convert a color channel to its stored byte.
///
/// Values are truncated, not rounded. Out-of-range values saturate.
#[inline]
pub fn channel_to_byte(c: f32) -> u8 {
    (c * 255.0) as u8
}

/// Write a 24-bit bitmap. `pixels` is row-major with row 0 written first.
pub fn write<W: Write>(writer: &mut W, width: u32, height: u32, pixels: &[Color]) -> BmpResult<()> {
    if pixels.len() != width as usize * height as usize {
        return Err(BmpError::PixelCount {
            width,
            height,
            actual: pixels.len(),
        });
    }

    let header_size = (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u32;
    let data_size = width * height * 3;

    // File header
    writer.write_all(b"BM")?;
    writer.write_u32::<LittleEndian>(header_size + data_size)?;
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(header_size)?;

    // Info header
    writer.write_u32::<LittleEndian>(INFO_HEADER_SIZE as u32)?;
    writer.write_i32::<LittleEndian>(width as i32)?;
    writer.write_i32::<LittleEndian>(height as i32)?;
    writer.write_u16::<LittleEndian>(1)?;
    writer.write_u16::<LittleEndian>(24)?;
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(data_size)?;
    for _ in 0..4 {
        writer.write_u32::<LittleEndian>(0)?;
    }

    for color in pixels {
        writer.write_all(&[
            channel_to_byte(color.z),
            channel_to_byte(color.y),
            channel_to_byte(color.x),
        ])?;
    }

    Ok(())
}

/// Encode a 24-bit bitmap into memory.
pub fn encode(width: u32, height: u32, pixels: &[Color]) -> BmpResult<Vec<u8>> {
    let mut bytes =
        Vec::with_capacity(FILE_HEADER_SIZE + INFO_HEADER_SIZE + pixels.len() * 3);
    write(&mut bytes, width, height, pixels)?;
    Ok(bytes)
}
