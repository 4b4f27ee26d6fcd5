//! Light sources.
//!
//! Every light answers three questions about an intersection: its Lambertian
//! (diffuse) contribution, its Phong (specular) contribution and how much of
//! it is blocked by other shapes.

use glint_core::Color;
use glint_math::{reflect, Ray, Vec3};

use crate::scene::Scene;
use crate::shape::Intersection;

/// Trait implemented by every light type.
pub trait LightSource {
    /// Lambertian contribution at the hit point.
    fn diffuse_color(&self, hit: &Intersection) -> Color;

    /// Phong highlight as seen from `eye`.
    fn spec_color(&self, hit: &Intersection, eye: Vec3) -> Color;

    /// 0 when the light reaches the hit point, 1 when it is fully blocked.
    fn shadow_intensity(&self, hit: &Intersection, scene: &Scene) -> f32;
}

/// Phong term shared by directional and point lights.
///
/// `light_dir` points from the surface towards the light.
fn phong(hit: &Intersection, light_dir: Vec3, eye: Vec3) -> f32 {
    let reflected = reflect(hit.normal, light_dir);
    let view_dir = (eye - hit.point).normalize();
    view_dir.dot(reflected).max(0.0).powf(hit.material().spec)
}

/// A light infinitely far away shining along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    direction: Vec3,
    pub intensity: f32,
    pub color: Color,
}

impl DirectionalLight {
    /// `direction` is the way the light travels; it is normalized here.
    pub fn new(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
            color,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(-Vec3::Y, 1.0, Color::ONE)
    }
}

impl LightSource for DirectionalLight {
    fn diffuse_color(&self, hit: &Intersection) -> Color {
        let light_dir = -self.direction;
        let intensity = (hit.normal.dot(light_dir) * self.intensity).max(0.0);
        self.color * intensity
    }

    fn spec_color(&self, hit: &Intersection, eye: Vec3) -> Color {
        self.color * (self.intensity * phong(hit, -self.direction, eye))
    }

    fn shadow_intensity(&self, hit: &Intersection, scene: &Scene) -> f32 {
        // Anything in the way blocks a light at infinity
        let shadow_ray = Ray::new(hit.point, -self.direction);
        match scene.nearest_hit(&shadow_ray, Some(hit.shape)) {
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

/// Constant, linear and quadratic distance attenuation terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }

    /// `1 / (c + l*d + q*d^2)`
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::new(1.0, 0.1, 0.05)
    }
}

/// A light at a position radiating in all directions.
///
/// The attenuation terms are only applied after `with_falloff`; by default
/// the light does not fade with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
    pub attenuation: Attenuation,
    pub color: Color,
    falloff: bool,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position,
            intensity: 1.0,
            attenuation: Attenuation::default(),
            color,
            falloff: false,
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_attenuation(mut self, attenuation: Attenuation) -> Self {
        self.attenuation = attenuation;
        self
    }

    /// Enable distance attenuation.
    pub fn with_falloff(mut self) -> Self {
        self.falloff = true;
        self
    }

    pub fn has_falloff(&self) -> bool {
        self.falloff
    }

    /// Intensity scale at `distance` from the light.
    fn scale(&self, distance: f32) -> f32 {
        if self.falloff {
            self.intensity * self.attenuation.factor(distance)
        } else {
            self.intensity
        }
    }

    /// Unit direction and distance from `point` to the light.
    fn towards(&self, point: Vec3) -> (Vec3, f32) {
        let offset = self.position - point;
        let distance = offset.length();
        (offset / distance, distance)
    }
}

impl LightSource for PointLight {
    fn diffuse_color(&self, hit: &Intersection) -> Color {
        let (light_dir, distance) = self.towards(hit.point);
        let intensity = (hit.normal.dot(light_dir) * self.scale(distance)).max(0.0);
        self.color * intensity
    }

    fn spec_color(&self, hit: &Intersection, eye: Vec3) -> Color {
        let (light_dir, distance) = self.towards(hit.point);
        self.color * (self.scale(distance) * phong(hit, light_dir, eye))
    }

    fn shadow_intensity(&self, hit: &Intersection, scene: &Scene) -> f32 {
        let (light_dir, distance) = self.towards(hit.point);
        let shadow_ray = Ray::new(hit.point, light_dir);

        // Shapes beyond the light do not occlude it
        match scene.nearest_hit(&shadow_ray, Some(hit.shape)) {
            Some(blocker) if blocker.distance < distance => 1.0,
            _ => 0.0,
        }
    }
}

/// Uniform light reaching every surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub intensity: f32,
    pub color: Color,
}

impl AmbientLight {
    pub fn new(intensity: f32, color: Color) -> Self {
        Self { intensity, color }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new(0.1, Color::ONE)
    }
}

impl LightSource for AmbientLight {
    fn diffuse_color(&self, _hit: &Intersection) -> Color {
        self.color * self.intensity
    }

    fn spec_color(&self, _hit: &Intersection, _eye: Vec3) -> Color {
        Color::ZERO
    }

    fn shadow_intensity(&self, _hit: &Intersection, _scene: &Scene) -> f32 {
        0.0
    }
}

/// Any of the supported lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Ambient(AmbientLight),
}

impl Light {
    fn source(&self) -> &dyn LightSource {
        match self {
            Light::Directional(light) => light,
            Light::Point(light) => light,
            Light::Ambient(light) => light,
        }
    }
}

impl LightSource for Light {
    fn diffuse_color(&self, hit: &Intersection) -> Color {
        self.source().diffuse_color(hit)
    }

    fn spec_color(&self, hit: &Intersection, eye: Vec3) -> Color {
        self.source().spec_color(hit, eye)
    }

    fn shadow_intensity(&self, hit: &Intersection, scene: &Scene) -> f32 {
        self.source().shadow_intensity(hit, scene)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}
