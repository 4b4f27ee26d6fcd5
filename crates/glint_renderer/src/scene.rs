//! Ordered collection of shapes and the nearest-hit query.

use glint_math::Ray;

use crate::shape::{Intersection, Shape};

/// An ordered list of shapes.
///
/// Order only matters for exact distance ties, where the earlier shape wins.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape to the scene.
    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Find the closest intersection along `ray`, skipping `excluding`.
    ///
    /// Used for primary visibility, shadow rays and secondary rays alike.
    pub fn nearest_hit(&self, ray: &Ray, excluding: Option<&Shape>) -> Option<Intersection<'_>> {
        let mut nearest: Option<Intersection<'_>> = None;

        for shape in &self.shapes {
            if excluding.is_some_and(|excluded| std::ptr::eq(shape, excluded)) {
                continue;
            }
            let Some(hit) = shape.intersect(ray) else {
                continue;
            };
            if nearest.map_or(true, |n| hit.distance < n.distance) {
                nearest = Some(hit);
            }
        }

        nearest
    }
}

impl FromIterator<Shape> for Scene {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self {
            shapes: iter.into_iter().collect(),
        }
    }
}
