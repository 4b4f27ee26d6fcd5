//! Glint Renderer - Recursive CPU Ray Tracing
//!
//! A Whitted-style ray tracer: direct lighting with hard shadows, mirror
//! reflection and Fresnel-weighted refraction, with escaping rays sampling
//! an environment map.

mod aabb_box;
mod camera;
mod framebuffer;
mod light;
mod loader;
mod plane;
mod renderer;
mod scene;
mod shape;
mod sphere;
mod triangle;

pub use aabb_box::AxisAlignedBox;
pub use camera::Camera;
pub use framebuffer::{FrameBuffer, OutputError, OutputResult, Viewport};
pub use light::{
    AmbientLight, Attenuation, DirectionalLight, Light, LightSource, PointLight,
};
pub use loader::{build_raytracer, load_scene, LoadError, LoadResult};
pub use plane::{Disk, Plane};
pub use renderer::{Raytracer, RenderConfig, BIAS, MAX_RECURSION_DEPTH};
pub use scene::Scene;
pub use shape::{Geometry, Intersect, Intersection, Shape, SurfaceHit};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export common types from glint_core and glint_math
pub use glint_core::{Color, Material, ShadingMode, Texture};
pub use glint_math::{Ray, Vec3};
