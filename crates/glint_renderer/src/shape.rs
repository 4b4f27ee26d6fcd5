//! Shape type and ray-shape intersection records.

use std::sync::Arc;

use glint_core::Material;
use glint_math::{Ray, Vec2, Vec3};

use crate::{AxisAlignedBox, Disk, Plane, Sphere, Triangle};

/// Geometric result of a successful ray test against a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Distance along the ray (always > 0)
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Surface (texture) coordinates, if the primitive defines them
    pub texcoords: Option<Vec2>,
}

/// Trait for primitives that can be hit by rays.
pub trait Intersect {
    /// Test the ray against the primitive; `ray.direction` should be unit length.
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit>;
}

/// The closed set of supported primitives.
#[derive(Debug, Clone)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
    Disk(Disk),
    Box(AxisAlignedBox),
    Triangle(Triangle),
}

impl Intersect for Geometry {
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        match self {
            Geometry::Sphere(sphere) => sphere.intersect(ray),
            Geometry::Plane(plane) => plane.intersect(ray),
            Geometry::Disk(disk) => disk.intersect(ray),
            Geometry::Box(aabb) => aabb.intersect(ray),
            Geometry::Triangle(triangle) => triangle.intersect(ray),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Plane> for Geometry {
    fn from(plane: Plane) -> Self {
        Geometry::Plane(plane)
    }
}

impl From<Disk> for Geometry {
    fn from(disk: Disk) -> Self {
        Geometry::Disk(disk)
    }
}

impl From<AxisAlignedBox> for Geometry {
    fn from(aabb: AxisAlignedBox) -> Self {
        Geometry::Box(aabb)
    }
}

impl From<Triangle> for Geometry {
    fn from(triangle: Triangle) -> Self {
        Geometry::Triangle(triangle)
    }
}

/// A scene object: a primitive plus the material it is drawn with.
#[derive(Debug, Clone)]
pub struct Shape {
    geometry: Geometry,
    material: Arc<Material>,
}

impl Shape {
    /// Create a new shape.
    pub fn new(geometry: impl Into<Geometry>, material: Arc<Material>) -> Self {
        Self {
            geometry: geometry.into(),
            material,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Intersect the ray with this shape.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        self.geometry
            .intersect(ray)
            .map(|hit| Intersection::new(hit, self))
    }
}

/// Record of a ray-shape intersection.
///
/// Borrowed from the scene for the duration of one shading step.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Distance along the ray (always > 0)
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Unit surface normal
    pub normal: Vec3,
    /// Surface (texture) coordinates
    pub texcoords: Option<Vec2>,
    /// The shape that was hit
    pub shape: &'a Shape,
}

impl<'a> Intersection<'a> {
    pub fn new(hit: SurfaceHit, shape: &'a Shape) -> Self {
        Self {
            distance: hit.distance,
            point: hit.point,
            normal: hit.normal,
            texcoords: hit.texcoords,
            shape,
        }
    }

    /// Material of the hit shape.
    pub fn material(&self) -> &'a Material {
        self.shape.material()
    }

    /// True when `other` is the very shape that was hit.
    pub fn is_shape(&self, other: &Shape) -> bool {
        std::ptr::eq(self.shape, other)
    }
}
