//! Sphere primitive for ray tracing.

use std::f32::consts::PI;

use glint_math::{Ray, Vec2, Vec3};

use crate::shape::{Intersect, SurfaceHit};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the surface coordinates for a unit normal.
    fn get_sphere_uv(normal: Vec3) -> Vec2 {
        let u = 1.0 - (normal.z.atan2(normal.x) / (2.0 * PI) + 0.5);
        let v = (-normal.y).clamp(-1.0, 1.0).acos() / PI;
        Vec2::new(u, v)
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        // Geometric solution: project the center onto the ray
        let l = self.center - ray.origin;
        let tca = l.dot(ray.direction);
        let d2 = l.length_squared() - tca * tca;
        let r2 = self.radius * self.radius;
        if d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();
        let mut t = tca - thc;
        if t < 0.0 {
            // Origin is inside the sphere
            t = tca + thc;
        }
        if t < 0.0 {
            return None;
        }

        let point = ray.at(t);
        let normal = (point - self.center).normalize();

        Some(SurfaceHit {
            distance: t,
            point,
            normal,
            texcoords: Some(Self::get_sphere_uv(normal)),
        })
    }
}
