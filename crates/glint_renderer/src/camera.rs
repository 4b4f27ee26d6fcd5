//! Pinhole camera for primary ray generation.

use glint_math::{Ray, Vec3};

use crate::framebuffer::Viewport;

/// Pinhole camera looking down -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Distance from the eye to the image plane
    pub near_plane: f32,
    /// Eye position
    pub position: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            fov: 60.0,
            near_plane: 0.1,
            position: Vec3::ZERO,
        }
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn with_near_plane(mut self, near_plane: f32) -> Self {
        self.near_plane = near_plane;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Unit direction through the center of pixel (`x`, `y`) of `viewport`.
    ///
    /// `y` grows upwards.
    pub fn ray_direction(&self, x: u32, y: u32, viewport: &Viewport) -> Vec3 {
        let top = (self.fov.to_radians() / 2.0).tan() * self.near_plane;
        let right = top * viewport.width as f32 / viewport.height as f32;

        // Window coordinates to NDC (-1 to 1)
        let px = ((x as f32 + 0.5 - viewport.x as f32) / viewport.width as f32) * 2.0 - 1.0;
        let py = ((y as f32 + 0.5 - viewport.y as f32) / viewport.height as f32) * 2.0 - 1.0;

        Vec3::new(px * right, py * top, -self.near_plane).normalize()
    }

    /// Primary ray through pixel (`x`, `y`).
    pub fn get_ray(&self, x: u32, y: u32, viewport: &Viewport) -> Ray {
        Ray::new(self.position, self.ray_direction(x, y, viewport))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_forward() {
        let camera = Camera::new();
        let viewport = Viewport::new(0, 0, 101, 101);

        let dir = camera.ray_direction(50, 50, &viewport);
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_corner_rays_span_fov() {
        let camera = Camera::new().with_fov(90.0);
        let viewport = Viewport::new(0, 0, 2, 2);

        // Pixel centers sit at NDC +-0.5, so tan(angle) = 0.5 * tan(45)
        let dir = camera.ray_direction(1, 1, &viewport);
        assert!(dir.x > 0.0 && dir.y > 0.0 && dir.z < 0.0);
        assert!((dir.y / -dir.z - 0.5).abs() < 1e-5);

        let dir = camera.ray_direction(0, 0, &viewport);
        assert!(dir.x < 0.0 && dir.y < 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_aspect_ratio_widens_horizontal() {
        let camera = Camera::new().with_fov(90.0);
        let viewport = Viewport::new(0, 0, 4, 2);

        let dir = camera.ray_direction(3, 1, &viewport);
        // NDC x = 0.75, scaled by aspect 2
        assert!((dir.x / -dir.z - 1.5).abs() < 1e-5);
        assert!((dir.y / -dir.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_offset() {
        let camera = Camera::new();
        let viewport = Viewport::new(10, 20, 11, 11);

        let dir = camera.ray_direction(15, 25, &viewport);
        assert!((dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_get_ray_origin() {
        let camera = Camera::new().with_position(Vec3::new(1.0, 2.0, 3.0));
        let ray = camera.get_ray(0, 0, &Viewport::new(0, 0, 8, 8));
        assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
    }
}
