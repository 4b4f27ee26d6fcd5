//! Glint Core - scene data shared by the renderer and its front ends.
//!
//! This crate provides:
//!
//! - **Materials**: `Material` and its `ShadingMode`
//! - **Textures**: `Texture`, `TextureCache` and the 24-bit BMP codec
//! - **Scene descriptions**: serde types for JSON scene files
//!
//! # Example
//!
//! ```ignore
//! use glint_core::SceneDescription;
//!
//! let description = SceneDescription::from_path("scene.json")?;
//! println!("{} shapes, {} lights", description.shapes.len(), description.lights.len());
//! ```

pub mod bmp;
pub mod description;
pub mod material;
pub mod texture;

// Re-export commonly used types
pub use bmp::{Bitmap, BmpError};
pub use description::{
    CameraDescription, DescriptionError, LightDescription, MaterialDescription,
    SceneDescription, ShapeDescription,
};
pub use material::{Color, Material, ShadingMode};
pub use texture::{Texture, TextureCache, TextureError};
