//! Infinite planes and disks.

use glint_math::{Ray, Vec3};

use crate::shape::{Intersect, SurfaceHit};

/// Rays with `|direction · normal|` at or below this are treated as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Distance along `ray` to the plane through `point` with unit `normal`.
///
/// Returns `None` for parallel rays and for planes behind the origin.
pub(crate) fn plane_distance(point: Vec3, normal: Vec3, ray: &Ray) -> Option<f32> {
    let denom = ray.direction.dot(normal);
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let t = (point - ray.origin).dot(normal) / denom;
    (t > 0.0).then_some(t)
}

/// An infinite plane through `point`.
///
/// Planes carry no surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a plane; `normal` is normalized and must be non-zero.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Intersect for Plane {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let t = plane_distance(self.point, self.normal, ray)?;
        Some(SurfaceHit {
            distance: t,
            point: ray.at(t),
            normal: self.normal,
            texcoords: None,
        })
    }
}

/// A flat disk: the part of a plane within `radius` of its point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disk {
    plane: Plane,
    radius: f32,
}

impl Disk {
    pub fn new(center: Vec3, normal: Vec3, radius: f32) -> Self {
        Self {
            plane: Plane::new(center, normal),
            radius,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Intersect for Disk {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        let hit = self.plane.intersect(ray)?;
        if (hit.point - self.plane.point).length() > self.radius {
            return None;
        }
        Some(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(Vec3::new(0.0, -10.0, -20.0), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(plane.normal(), Vec3::Y);

        let ray = Ray::new(Vec3::ZERO, -Vec3::Y);
        let hit = plane.intersect(&ray).expect("ray should hit the floor");
        assert!((hit.distance - 10.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
        assert!(hit.texcoords.is_none());
    }

    #[test]
    fn test_plane_parallel_ray() {
        let plane = Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);

        // direction · normal == 0
        assert!(plane.intersect(&Ray::new(Vec3::ZERO, Vec3::X)).is_none());
        // Nearly parallel still counts as parallel
        let grazing = Vec3::new(1.0, -0.00005, 0.0).normalize();
        assert!(plane.intersect(&Ray::new(Vec3::ZERO, grazing)).is_none());
    }

    #[test]
    fn test_plane_behind_origin() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(plane.intersect(&Ray::new(Vec3::ZERO, -Vec3::Z)).is_none());
    }

    #[test]
    fn test_plane_hit_from_behind() {
        // The normal is kept as given even when the ray hits the back side
        let plane = Plane::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        let hit = plane.intersect(&Ray::new(Vec3::ZERO, -Vec3::Z)).unwrap();
        assert_eq!(hit.normal, -Vec3::Z);
    }

    #[test]
    fn test_disk_radius() {
        let disk = Disk::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 1.0);

        let center = disk.intersect(&Ray::new(Vec3::ZERO, -Vec3::Z));
        assert!(center.is_some());

        let inside = Ray::new(Vec3::new(0.9, 0.0, 0.0), -Vec3::Z);
        assert!(disk.intersect(&inside).is_some());

        let outside = Ray::new(Vec3::new(1.1, 0.0, 0.0), -Vec3::Z);
        assert!(disk.intersect(&outside).is_none());
    }
}
