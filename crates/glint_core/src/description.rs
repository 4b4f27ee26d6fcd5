//! Serializable scene descriptions.
//!
//! A description is the plain-data form of a scene: camera, named materials,
//! ordered shapes and lights. Vectors are `[x, y, z]` arrays. Defaults follow
//! the renderer's constructors so a minimal file stays small:
//!
//! ```json
//! {
//!   "width": 256, "height": 256,
//!   "materials": { "stone": { "diffuse": [0.4, 0.4, 0.4], "spec": 8 } },
//!   "shapes": [ { "type": "box", "position": [2, 0, -8], "size": [2, 2, 2], "material": "stone" } ],
//!   "lights": [ { "type": "ambient" }, { "type": "directional", "direction": [-1, -1, -1], "intensity": 0.8 } ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::ShadingMode;

/// Errors that can occur while reading a description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene description: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// A complete scene description.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default = "default_resolution")]
    pub width: u32,

    #[serde(default = "default_resolution")]
    pub height: u32,

    #[serde(default)]
    pub camera: CameraDescription,

    /// Color of rays that leave the scene when there is no environment map
    #[serde(default)]
    pub clear_color: [f32; 3],

    /// Path of an equirectangular environment texture
    #[serde(default)]
    pub environment: Option<String>,

    /// Overrides the renderer's recursion limit
    #[serde(default)]
    pub max_depth: Option<u32>,

    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,

    #[serde(default)]
    pub shapes: Vec<ShapeDescription>,

    #[serde(default)]
    pub lights: Vec<LightDescription>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json_str(json: &str) -> DescriptionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a description file.
    pub fn from_path(path: impl AsRef<Path>) -> DescriptionResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Pinhole camera settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraDescription {
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov: f32,

    #[serde(default = "default_near_plane")]
    pub near_plane: f32,

    #[serde(default)]
    pub position: [f32; 3],
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near_plane: default_near_plane(),
            position: [0.0; 3],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaterialDescription {
    #[serde(default = "white")]
    pub diffuse: [f32; 3],

    #[serde(default = "one")]
    pub spec: f32,

    #[serde(default = "one")]
    pub ior: f32,

    #[serde(default)]
    pub texture: Option<String>,

    #[serde(default, rename = "type")]
    pub mode: ShadingMode,
}

/// A shape referencing a material by name.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: String,
    },
    Plane {
        position: [f32; 3],
        normal: [f32; 3],
        material: String,
    },
    Disk {
        position: [f32; 3],
        normal: [f32; 3],
        radius: f32,
        material: String,
    },
    Box {
        position: [f32; 3],
        size: [f32; 3],
        material: String,
    },
    Triangle {
        vertices: [[f32; 3]; 3],
        material: String,
    },
}

impl ShapeDescription {
    /// Name of the material this shape uses.
    pub fn material(&self) -> &str {
        match self {
            ShapeDescription::Sphere { material, .. }
            | ShapeDescription::Plane { material, .. }
            | ShapeDescription::Disk { material, .. }
            | ShapeDescription::Box { material, .. }
            | ShapeDescription::Triangle { material, .. } => material,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightDescription {
    Directional {
        #[serde(default = "down")]
        direction: [f32; 3],
        #[serde(default = "one")]
        intensity: f32,
        #[serde(default = "white")]
        color: [f32; 3],
    },
    Point {
        position: [f32; 3],
        #[serde(default = "one")]
        intensity: f32,
        #[serde(default = "one")]
        constant: f32,
        #[serde(default = "default_linear")]
        linear: f32,
        #[serde(default = "default_quadratic")]
        quadratic: f32,
        /// Apply the attenuation terms (off by default)
        #[serde(default)]
        falloff: bool,
        #[serde(default = "white")]
        color: [f32; 3],
    },
    Ambient {
        #[serde(default = "default_ambient")]
        intensity: f32,
        #[serde(default = "white")]
        color: [f32; 3],
    },
}

fn default_resolution() -> u32 {
    256
}

fn default_fov() -> f32 {
    60.0
}

fn default_near_plane() -> f32 {
    0.1
}

fn default_linear() -> f32 {
    0.1
}

fn default_quadratic() -> f32 {
    0.05
}

fn default_ambient() -> f32 {
    0.1
}

fn one() -> f32 {
    1.0
}

fn white() -> [f32; 3] {
    [1.0; 3]
}

fn down() -> [f32; 3] {
    [0.0, -1.0, 0.0]
}
