//! Texture loading and caching for materials and environment maps.
//!
//! Pixels are stored row-major with row 0 at the bottom of the image, which
//! matches the row order of the BMP codec. Channels are plain `byte / 255`
//! values; no color-space conversion is applied.

use std::collections::HashMap;
use std::f32::consts::PI;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_math::Vec3;
use thiserror::Error;

use crate::bmp::{self, BmpError};
use crate::material::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bitmap decoding error: {0}")]
    Bmp(#[from] BmpError),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// RGB pixel data, row-major, bottom row first
    pub pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Color) -> Self {
        Self::new(1, 1, vec![color], "<solid>")
    }

    /// Decode a texture from the bytes of a 24-bit BMP file.
    pub fn from_bmp_bytes(bytes: &[u8], path: impl Into<String>) -> TextureResult<Self> {
        let bitmap = bmp::decode(bytes)?;
        Ok(Self::new(bitmap.width, bitmap.height, bitmap.pixels, path))
    }

    /// Load a 24-bit BMP texture from disk.
    pub fn open(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Self::from_bmp_bytes(&bytes, path.to_string_lossy())
    }

    /// Load a texture in any format supported by the `image` crate.
    pub fn open_image(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            TextureError::LoadError(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        // `image` stores the top row first
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in (0..height).rev() {
            for x in 0..width {
                let p = rgb.get_pixel(x, y);
                pixels.push(Color::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                ));
            }
        }

        Ok(Self::new(width, height, pixels, path.to_string_lossy()))
    }

    /// Sample the texture at surface coordinates (nearest texel).
    ///
    /// Returns `None` when `u` or `v` is outside `[0, 1)`.
    pub fn get_color(&self, u: f32, v: f32) -> Option<Color> {
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }

        let x = (u * self.width as f32) as u32;
        let y = (v * self.height as f32) as u32;
        self.get_pixel(x.min(self.width - 1), y.min(self.height - 1))
    }

    /// Sample the texture as an equirectangular environment map.
    ///
    /// `direction` does not need to be normalized.
    pub fn env_color(&self, direction: Vec3) -> Color {
        let dir = direction.normalize();

        let u = dir.z.atan2(dir.x) / (2.0 * PI) + 0.5;
        let v = (-dir.y).clamp(-1.0, 1.0).acos() / PI;

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.get_pixel(x, y).unwrap_or(Color::ZERO)
    }

    /// Get pixel at integer coordinates.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width {
            return None;
        }
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.pixels.get(idx).copied()
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

/// Cache for loaded textures.
///
/// Textures are loaded on demand and shared between every material (or
/// environment slot) that references the same path.
pub struct TextureCache {
    /// Cached textures by file path
    textures: HashMap<String, Arc<Texture>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    ///
    /// `.bmp` files go through the fixed 24-bit decoder, anything else
    /// through the `image` crate.
    pub fn load(&mut self, path: &str) -> TextureResult<Arc<Texture>> {
        if let Some(texture) = self.textures.get(path) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(path);

        let resolved = full_path.to_string_lossy();
        if let Some(texture) = self.textures.values().find(|t| t.path == resolved) {
            log::warn!("Texture {} is already loaded as {}", path, texture.path);
            let texture = texture.clone();
            self.textures.insert(path.to_string(), texture.clone());
            return Ok(texture);
        }

        let texture = Arc::new(load_texture_file(&full_path)?);
        self.textures.insert(path.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            path,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Check if a texture is cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.textures.contains_key(path)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Resolve a path relative to the base directory.
    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

fn load_texture_file(path: &Path) -> TextureResult<Texture> {
    let is_bmp = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("bmp"))
        .unwrap_or(false);

    if is_bmp {
        Texture::open(path)
    } else {
        Texture::open_image(path)
    }
}
