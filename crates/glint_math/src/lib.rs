// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod barycentric;
mod interval;
pub mod optics;
mod ray;

pub use aabb::Aabb;
pub use barycentric::{barycentric, Barycentric};
pub use interval::Interval;
pub use optics::{fresnel, reflect, refract};
pub use ray::Ray;
