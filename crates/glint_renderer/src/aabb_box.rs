//! Axis-aligned box built from six planes.

use glint_math::{Aabb, Ray, Vec2, Vec3};

use crate::shape::{Intersect, SurfaceHit};
use crate::Plane;

/// Padding added to the box bounds so hits on the face seams are not lost
/// to floating-point error.
pub const BOX_EPSILON: f32 = 0.001;

/// An axis-aligned box.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisAlignedBox {
    center: Vec3,
    size: Vec3,
    planes: [Plane; 6],
    bounds: Aabb,
}

impl AxisAlignedBox {
    /// Create a box from its center and full size along each axis.
    pub fn new(center: Vec3, size: Vec3) -> Self {
        let half = size / 2.0;

        let planes = [
            // Sides
            Plane::new(center + Vec3::new(half.x, 0.0, 0.0), Vec3::X),
            Plane::new(center - Vec3::new(half.x, 0.0, 0.0), -Vec3::X),
            // Up and down
            Plane::new(center + Vec3::new(0.0, half.y, 0.0), Vec3::Y),
            Plane::new(center - Vec3::new(0.0, half.y, 0.0), -Vec3::Y),
            // Front and back
            Plane::new(center + Vec3::new(0.0, 0.0, half.z), Vec3::Z),
            Plane::new(center - Vec3::new(0.0, 0.0, half.z), -Vec3::Z),
        ];

        Self {
            center,
            size,
            planes,
            bounds: Aabb::from_center(center, half).pad(BOX_EPSILON),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Padded bounds used to accept face hits.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Map a point on a face to `[0, 1]` along the two axes orthogonal to
    /// the face normal.
    fn face_uv(&self, point: Vec3, normal: Vec3) -> Vec2 {
        let (a, b) = if normal.x.abs() > 0.0 {
            (1, 2)
        } else if normal.y.abs() > 0.0 {
            (0, 2)
        } else {
            (0, 1)
        };

        Vec2::new(
            self.bounds.axis_interval(a).normalized(point[a], self.size[a]),
            self.bounds.axis_interval(b).normalized(point[b], self.size[b]),
        )
    }
}

impl Intersect for AxisAlignedBox {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let mut nearest: Option<SurfaceHit> = None;

        for plane in &self.planes {
            let Some(hit) = plane.intersect(ray) else {
                continue;
            };
            if !self.bounds.contains(hit.point) {
                continue;
            }
            if nearest.map_or(true, |n| hit.distance < n.distance) {
                nearest = Some(hit);
            }
        }

        nearest.map(|hit| SurfaceHit {
            texcoords: Some(self.face_uv(hit.point, hit.normal)),
            ..hit
        })
    }
}
