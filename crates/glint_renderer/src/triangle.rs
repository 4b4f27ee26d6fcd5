//! Triangle primitive for ray tracing.
//!
//! Intersects the triangle's plane, then keeps the hit only when its
//! barycentric coordinates place it inside the triangle.

use glint_math::{barycentric, Barycentric, Ray, Vec2, Vec3};

use crate::plane::plane_distance;
use crate::shape::{Intersect, SurfaceHit};

/// A single-sided-normal triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Face normal (zero for degenerate triangles)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle; the normal follows the `v0, v1, v2` winding.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self { v0, v1, v2, normal }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Intersect for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let t = plane_distance(self.v0, self.normal, ray)?;
        let point = ray.at(t);

        match barycentric(self.v0, self.v1, self.v2, point) {
            Barycentric::Weights { u, v, w } if u >= 0.0 && v >= 0.0 && w >= 0.0 => {
                Some(SurfaceHit {
                    distance: t,
                    point,
                    normal: self.normal,
                    texcoords: Some(Vec2::new(u, v)),
                })
            }
            _ => None,
        }
    }
}
