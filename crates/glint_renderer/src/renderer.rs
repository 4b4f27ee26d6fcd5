//! Recursive ray tracer.
//!
//! Implements Whitted-style shading with:
//! - Diffuse, specular and shadow terms for opaque surfaces
//! - Mirror reflection for reflective surfaces
//! - Fresnel-weighted reflection and refraction for transparent surfaces
//! - A fixed recursion limit that falls back to the environment color

use std::sync::Arc;
use std::time::Instant;

use glint_core::{Color, ShadingMode, Texture};
use glint_math::{fresnel, reflect, refract, Ray, Vec3};

use crate::framebuffer::{FrameBuffer, Viewport};
use crate::light::{Light, LightSource};
use crate::shape::{Intersection, Shape};
use crate::{Camera, Scene};

/// Default recursion limit for reflection and refraction.
pub const MAX_RECURSION_DEPTH: u32 = 4;

/// Offset applied to secondary ray origins of transparent surfaces.
pub const BIAS: f32 = 0.001;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum recursion depth for secondary rays
    pub max_depth: u32,
    /// Color when a ray leaves the scene and there is no environment map
    pub clear_color: Color,
    /// Region to render; `None` renders the whole frame
    pub viewport: Option<Viewport>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_RECURSION_DEPTH,
            clear_color: Color::ZERO,
            viewport: None,
        }
    }
}

/// Everything needed to render a frame.
///
/// Set up once, then read-only while rendering.
#[derive(Debug, Clone)]
pub struct Raytracer {
    pub width: u32,
    pub height: u32,
    pub camera: Camera,
    pub scene: Scene,
    pub lights: Vec<Light>,
    /// Equirectangular environment map sampled by escaping rays
    pub environment: Option<Arc<Texture>>,
    pub config: RenderConfig,
}

impl Raytracer {
    /// Create an empty raytracer for a `width` x `height` frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            camera: Camera::new(),
            scene: Scene::new(),
            lights: Vec::new(),
            environment: None,
            config: RenderConfig::default(),
        }
    }

    /// Add a shape to the scene.
    pub fn add_shape(&mut self, shape: Shape) {
        self.scene.add(shape);
    }

    /// Add a light.
    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    /// The region of the frame that `render` fills.
    pub fn viewport(&self) -> Viewport {
        self.config
            .viewport
            .unwrap_or_else(|| Viewport::full(self.width, self.height))
    }

    /// Color of a ray that leaves the scene.
    pub fn environment_color(&self, direction: Vec3) -> Color {
        match &self.environment {
            Some(env) => env.env_color(direction),
            None => self.config.clear_color,
        }
    }

    /// Compute the color seen along `ray`.
    ///
    /// `exclude` is skipped by the nearest-hit search. Once `depth` reaches
    /// the configured maximum the environment color is returned.
    pub fn cast_ray(&self, ray: &Ray, exclude: Option<&Shape>, depth: u32) -> Color {
        if depth >= self.config.max_depth {
            return self.environment_color(ray.direction);
        }

        let Some(hit) = self.scene.nearest_hit(ray, exclude) else {
            return self.environment_color(ray.direction);
        };

        let material = hit.material();

        let transported = match material.mode {
            ShadingMode::Opaque => self.shade_opaque(&hit),
            ShadingMode::Reflective => {
                let reflected = reflect(hit.normal, -ray.direction);
                let reflect_color =
                    self.cast_ray(&Ray::new(hit.point, reflected), Some(hit.shape), depth + 1);
                reflect_color + self.specular(&hit)
            }
            ShadingMode::Transparent => self.shade_transparent(ray, &hit, depth),
        };

        let mut color = transported * material.diffuse;

        if let (Some(texture), Some(uv)) = (&material.texture, hit.texcoords) {
            if let Some(tex_color) = texture.get_color(uv.x, uv.y) {
                color *= tex_color;
            }
        }

        color.min(Color::ONE)
    }

    /// Sum of `(diffuse + specular) * (1 - shadow)` over all lights.
    fn shade_opaque(&self, hit: &Intersection) -> Color {
        let eye = self.camera.position;
        self.lights
            .iter()
            .map(|light| {
                let diffuse = light.diffuse_color(hit);
                let specular = light.spec_color(hit, eye);
                let shadow = light.shadow_intensity(hit, &self.scene);
                (diffuse + specular) * (1.0 - shadow)
            })
            .sum()
    }

    /// Sum of the specular highlights of all lights.
    fn specular(&self, hit: &Intersection) -> Color {
        let eye = self.camera.position;
        self.lights
            .iter()
            .map(|light| light.spec_color(hit, eye))
            .sum()
    }

    fn shade_transparent(&self, ray: &Ray, hit: &Intersection, depth: u32) -> Color {
        let ior = hit.material().ior;
        let outside = ray.direction.dot(hit.normal) < 0.0;
        let bias = hit.normal * BIAS;

        let reflected = reflect(hit.normal, -ray.direction);
        let reflect_origin = if outside {
            hit.point + bias
        } else {
            hit.point - bias
        };
        let reflect_color = self.cast_ray(&Ray::new(reflect_origin, reflected), None, depth + 1);

        let kr = fresnel(hit.normal, ray.direction, ior);

        let mut refract_color = Color::ZERO;
        if kr < 1.0 {
            if let Some(refracted) = refract(hit.normal, ray.direction, ior) {
                let refract_origin = if outside {
                    hit.point - bias
                } else {
                    hit.point + bias
                };
                refract_color = self.cast_ray(
                    &Ray::new(refract_origin, refracted.normalize()),
                    None,
                    depth + 1,
                );
            }
        }

        reflect_color * kr + refract_color * (1.0 - kr) + self.specular(hit)
    }

    /// Render the viewport into `frame`. Pixels outside the viewport keep
    /// their current color.
    pub fn render_into(&self, frame: &mut FrameBuffer) {
        let viewport = self.viewport();

        for (x, y) in viewport.pixels() {
            let ray = self.camera.get_ray(x, y, &viewport);
            frame.set(x, y, self.cast_ray(&ray, None, 0));
        }
    }

    /// Render a new frame, cleared to the clear color first.
    pub fn render(&self) -> FrameBuffer {
        if self.scene.is_empty() {
            log::warn!("Rendering an empty scene");
        }
        log::info!(
            "Rendering {}x{} ({} shapes, {} lights, max depth {})",
            self.width,
            self.height,
            self.scene.len(),
            self.lights.len(),
            self.config.max_depth
        );

        let start = Instant::now();
        let mut frame = FrameBuffer::new(self.width, self.height, self.config.clear_color);
        self.render_into(&mut frame);

        log::info!("Rendered in {:?}", start.elapsed());
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Intersect;
    use crate::{AmbientLight, DirectionalLight, Plane, Sphere};
    use glint_core::Material;

    const CLEAR: Color = Color::new(0.2, 0.4, 0.6);

    fn approx_eq(a: Color, b: Color, eps: f32) -> bool {
        (a - b).abs().max_element() <= eps
    }

    fn raytracer() -> Raytracer {
        let mut rt = Raytracer::new(16, 16);
        rt.config.clear_color = CLEAR;
        rt
    }

    fn shape(geometry: impl Into<crate::Geometry>, material: Material) -> Shape {
        Shape::new(geometry, Arc::new(material))
    }

    #[test]
    fn test_ambient_sphere_is_uniform() {
        let mut rt = raytracer();
        rt.add_shape(shape(
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.5),
            Material::new(Color::ONE),
        ));
        rt.add_light(AmbientLight::new(0.1, Color::ONE));

        let frame = rt.render();
        let mut sphere_pixels = 0;
        for (x, y) in Viewport::full(16, 16).pixels() {
            let color = frame.get(x, y).unwrap();
            let dir = rt.camera.ray_direction(x, y, &rt.viewport());
            if Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.5)
                .intersect(&Ray::new(Vec3::ZERO, dir))
                .is_some()
            {
                sphere_pixels += 1;
                assert!(approx_eq(color, Color::splat(0.1), 1e-6), "got {color:?}");
            } else {
                assert_eq!(color, CLEAR);
            }
        }
        assert!(sphere_pixels > 0);
        assert!(sphere_pixels < 256);
    }

    #[test]
    fn test_miss_uses_environment_map() {
        let mut rt = raytracer();
        rt.environment = Some(Arc::new(Texture::solid_color(Color::new(0.3, 0.0, 0.3))));

        let color = rt.cast_ray(&Ray::new(Vec3::ZERO, -Vec3::Z), None, 0);
        assert_eq!(color, Color::new(0.3, 0.0, 0.3));
    }

    #[test]
    fn test_depth_limit_returns_environment() {
        let mut rt = raytracer();
        rt.add_shape(shape(
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0),
            Material::new(Color::ONE),
        ));
        rt.add_light(AmbientLight::new(1.0, Color::ONE));

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert_eq!(rt.cast_ray(&ray, None, 0), Color::ONE);
        assert_eq!(rt.cast_ray(&ray, None, MAX_RECURSION_DEPTH), CLEAR);
    }

    #[test]
    fn test_reflective_surface_mirrors_background() {
        let mut rt = raytracer();
        rt.add_shape(shape(
            Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z),
            Material::reflective(Color::splat(0.5), 64.0),
        ));

        let color = rt.cast_ray(&Ray::new(Vec3::ZERO, -Vec3::Z), None, 0);
        assert!(approx_eq(color, CLEAR * 0.5, 1e-6), "got {color:?}");
    }

    #[test]
    fn test_reflective_surface_ignores_diffuse_and_shadow() {
        let mut rt = raytracer();
        rt.config.clear_color = Color::ZERO;
        rt.add_shape(shape(
            Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z),
            Material::reflective(Color::ONE, 64.0),
        ));
        rt.add_light(AmbientLight::new(1.0, Color::ONE));

        // Ambient light has no specular part, so only the black reflection remains
        let color = rt.cast_ray(&Ray::new(Vec3::ZERO, -Vec3::Z), None, 0);
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_transparent_blend_weights_sum_to_one() {
        // Every path ends at an ambient-lit white plane or the clear color,
        // both of which are 0.1, so any kr-weighted blend is exactly 0.1.
        let mut rt = raytracer();
        rt.config.clear_color = Color::splat(0.1);
        let white = Material::new(Color::ONE);
        rt.add_shape(shape(Plane::new(Vec3::new(0.0, 0.0, -20.0), Vec3::Z), white.clone()));
        rt.add_shape(shape(Plane::new(Vec3::new(0.0, 0.0, 20.0), -Vec3::Z), white));
        rt.add_shape(shape(
            Sphere::new(Vec3::new(0.0, 0.0, -6.0), 2.0),
            Material::transparent(Color::ONE, 64.0, 1.5),
        ));
        rt.add_light(AmbientLight::new(0.1, Color::ONE));

        let frame = rt.render();
        for color in frame.pixels() {
            assert!(approx_eq(*color, Color::splat(0.1), 1e-5), "got {color:?}");
        }
    }

    #[test]
    fn test_transparent_refraction_sees_through() {
        // Normal incidence: kr = 0.04, the rest refracts through the sphere
        let mut rt = raytracer();
        rt.config.clear_color = Color::ZERO;
        rt.add_shape(shape(
            Plane::new(Vec3::new(0.0, 0.0, -20.0), Vec3::Z),
            Material::new(Color::ONE),
        ));
        rt.add_shape(shape(
            Sphere::new(Vec3::new(0.0, 0.0, -6.0), 2.0),
            Material::transparent(Color::ONE, 64.0, 1.5),
        ));
        rt.add_light(AmbientLight::new(1.0, Color::ONE));

        let color = rt.cast_ray(&Ray::new(Vec3::ZERO, -Vec3::Z), None, 0);
        assert!(color.x > 0.9 && color.x <= 1.0, "got {color:?}");
    }

    #[test]
    fn test_opaque_diffuse_and_shadow() {
        let mut rt = raytracer();
        let floor = Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        rt.add_shape(shape(floor, Material::new(Color::new(1.0, 0.5, 0.25)).with_spec(1e6)));
        rt.add_light(DirectionalLight::new(-Vec3::Y, 0.8, Color::ONE));

        let down = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0).normalize());
        let lit = rt.cast_ray(&down, None, 0);
        assert!(approx_eq(lit, Color::new(0.8, 0.4, 0.2), 1e-5), "got {lit:?}");

        // Occluder above the hit point at (0, -1, -1)
        rt.add_shape(shape(
            Sphere::new(Vec3::new(0.0, 3.0, -1.0), 0.5),
            Material::new(Color::ONE),
        ));
        let shadowed = rt.cast_ray(&down, None, 0);
        assert_eq!(shadowed, Color::ZERO);
    }

    #[test]
    fn test_texture_and_clamp() {
        let mut rt = raytracer();
        let texture = Arc::new(Texture::solid_color(Color::new(1.0, 0.5, 0.0)));
        rt.add_shape(shape(
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0),
            Material::new(Color::new(2.55, 1.27, 0.8)).with_texture(texture),
        ));
        rt.add_light(AmbientLight::new(1.0, Color::ONE));

        // (2.55, 1.27, 0.8) * (1, 0.5, 0) = (2.55, 0.635, 0), clamped to 1
        let color = rt.cast_ray(&Ray::new(Vec3::ZERO, -Vec3::Z), None, 0);
        assert!(approx_eq(color, Color::new(1.0, 0.635, 0.0), 1e-5), "got {color:?}");
    }

    #[test]
    fn test_texture_ignored_without_texcoords() {
        let mut rt = raytracer();
        let texture = Arc::new(Texture::solid_color(Color::ZERO));
        rt.add_shape(shape(
            Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z),
            Material::new(Color::splat(0.5)).with_texture(texture),
        ));
        rt.add_light(AmbientLight::new(1.0, Color::ONE));

        let color = rt.cast_ray(&Ray::new(Vec3::ZERO, -Vec3::Z), None, 0);
        assert!(approx_eq(color, Color::splat(0.5), 1e-6));
    }

    #[test]
    fn test_viewport_leaves_outside_pixels_clear() {
        let mut rt = raytracer();
        rt.config.viewport = Some(Viewport::new(4, 4, 8, 8));
        rt.add_shape(shape(
            Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z),
            Material::new(Color::ONE),
        ));
        rt.add_light(AmbientLight::new(0.5, Color::ONE));

        let frame = rt.render();
        assert_eq!(frame.get(0, 0), Some(CLEAR));
        assert_eq!(frame.get(15, 15), Some(CLEAR));
        assert!(approx_eq(frame.get(8, 8).unwrap(), Color::splat(0.5), 1e-6));
    }
}
