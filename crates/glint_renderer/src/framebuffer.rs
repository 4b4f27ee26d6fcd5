//! Frame buffer storage and image output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glint_core::bmp::{self, channel_to_byte, Bitmap, BmpError};
use glint_core::Color;
use thiserror::Error;

/// Errors that can occur while writing a frame to disk.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bitmap encoding error: {0}")]
    Bmp(#[from] BmpError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// A rectangle of pixels in window coordinates (y grows upwards).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport covering a whole `width` x `height` frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Iterate over the pixels of the viewport, row by row from the bottom.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let Viewport {
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height).flat_map(move |py| (x..x + width).map(move |px| (px, py)))
    }
}

/// Per-pixel color storage; row 0 is the bottom row.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with `clear_color`.
    pub fn new(width: u32, height: u32, clear_color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![clear_color; width as usize * height as usize],
        }
    }

    /// Rebuild a frame buffer from a decoded bitmap.
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels,
        }
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Coordinates outside the frame are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Write the frame as a 24-bit BMP.
    pub fn write_bmp<W: Write>(&self, writer: &mut W) -> OutputResult<()> {
        bmp::write(writer, self.width, self.height, &self.pixels)?;
        Ok(())
    }

    /// Convert to an 8-bit RGB image (top row first).
    pub fn to_rgb8(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = self.pixels[(self.height - 1 - y) as usize * self.width as usize + x as usize];
            image::Rgb([
                channel_to_byte(color.x),
                channel_to_byte(color.y),
                channel_to_byte(color.z),
            ])
        })
    }

    /// Save the frame; `.bmp` paths use the 24-bit BMP writer, other
    /// extensions are encoded by the `image` crate.
    pub fn save(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        let path = path.as_ref();
        let is_bmp = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("bmp"))
            .unwrap_or(false);

        if is_bmp {
            let mut writer = BufWriter::new(File::create(path)?);
            self.write_bmp(&mut writer)?;
            writer.flush()?;
        } else {
            self.to_rgb8().save(path)?;
        }

        log::info!("Saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_clear() {
        let mut frame = FrameBuffer::new(4, 3, Color::new(0.1, 0.2, 0.3));
        assert_eq!(frame.pixels().len(), 12);
        assert_eq!(frame.get(3, 2), Some(Color::new(0.1, 0.2, 0.3)));

        frame.clear(Color::ONE);
        assert!(frame.pixels().iter().all(|p| *p == Color::ONE));
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut frame = FrameBuffer::new(2, 2, Color::ZERO);
        frame.set(1, 1, Color::ONE);
        frame.set(2, 0, Color::ONE);
        frame.set(0, 5, Color::ONE);

        assert_eq!(frame.get(1, 1), Some(Color::ONE));
        assert_eq!(frame.get(2, 0), None);
        assert_eq!(frame.pixels().iter().filter(|p| **p == Color::ONE).count(), 1);
    }

    #[test]
    fn test_bmp_roundtrip() {
        let mut frame = FrameBuffer::new(5, 4, Color::ZERO);
        for (x, y) in Viewport::full(5, 4).pixels() {
            frame.set(x, y, Color::new(x as f32 / 5.0, y as f32 / 4.0, 0.7));
        }

        let mut bytes = Vec::new();
        frame.write_bmp(&mut bytes).unwrap();
        let decoded = FrameBuffer::from_bitmap(bmp::decode(&bytes).unwrap());

        assert_eq!(decoded.width, 5);
        assert_eq!(decoded.height, 4);
        for (a, b) in frame.pixels().iter().zip(decoded.pixels()) {
            assert!((*a - *b).abs().max_element() <= 1.0 / 255.0);
        }
    }

    #[test]
    fn test_to_rgb8_flips_rows() {
        let mut frame = FrameBuffer::new(1, 2, Color::ZERO);
        frame.set(0, 0, Color::new(1.0, 0.0, 0.0));

        let img = frame.to_rgb8();
        assert_eq!(img.get_pixel(0, 1).0, [255, 0, 0]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_viewport_pixels() {
        let pixels: Vec<_> = Viewport::new(1, 2, 2, 2).pixels().collect();
        assert_eq!(pixels, vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_save_bmp_file() {
        let path = std::env::temp_dir().join(format!("glint_frame_{}.bmp", std::process::id()));
        let frame = FrameBuffer::new(3, 3, Color::new(0.0, 0.5, 1.0));
        frame.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(bytes.len(), 54 + 27);
        assert_eq!(&bytes[54..57], &[255, 127, 0]);
    }
}
