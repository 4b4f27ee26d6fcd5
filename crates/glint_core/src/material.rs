//! Surface materials.

use std::sync::Arc;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::texture::Texture;

/// Color type alias (RGB, nominally 0-1 but allowed to exceed 1)
pub type Color = Vec3;

/// How a surface transports light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// Diffuse + specular from every light, with shadows
    #[default]
    Opaque,
    /// Mirror reflection plus specular highlights
    Reflective,
    /// Fresnel-weighted reflection and refraction plus specular highlights
    Transparent,
}

/// Material definition shared by every shape that uses it.
///
/// Materials are immutable once a scene is set up; shapes hold them through
/// an `Arc`.
#[derive(Clone, Debug)]
pub struct Material {
    /// Base color multiplied into the transported light.
    /// Components may exceed 1.0.
    pub diffuse: Color,

    /// Phong specular exponent
    pub spec: f32,

    /// Index of refraction (only used by `ShadingMode::Transparent`)
    pub ior: f32,

    /// Optional image texture multiplied into the final color
    pub texture: Option<Arc<Texture>>,

    /// Shading mode
    pub mode: ShadingMode,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Color::ONE,
            spec: 1.0,
            ior: 1.0,
            texture: None,
            mode: ShadingMode::Opaque,
        }
    }
}

impl Material {
    /// Create an opaque material with the given diffuse color.
    pub fn new(diffuse: Color) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    /// Opaque material with a specular exponent.
    pub fn opaque(diffuse: Color, spec: f32) -> Self {
        Self::new(diffuse).with_spec(spec)
    }

    /// Mirror-like material.
    pub fn reflective(diffuse: Color, spec: f32) -> Self {
        Self::new(diffuse)
            .with_spec(spec)
            .with_mode(ShadingMode::Reflective)
    }

    /// Glass-like material.
    pub fn transparent(diffuse: Color, spec: f32, ior: f32) -> Self {
        Self::new(diffuse)
            .with_spec(spec)
            .with_ior(ior)
            .with_mode(ShadingMode::Transparent)
    }

    pub fn with_spec(mut self, spec: f32) -> Self {
        self.spec = spec;
        self
    }

    pub fn with_ior(mut self, ior: f32) -> Self {
        self.ior = ior;
        self
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_mode(mut self, mode: ShadingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check if this material uses a texture.
    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }
}
