//! Build a [`Raytracer`] from a [`SceneDescription`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glint_core::{
    DescriptionError, LightDescription, Material, MaterialDescription, SceneDescription,
    ShapeDescription, TextureCache, TextureError,
};
use glint_math::Vec3;
use thiserror::Error;

use crate::light::{AmbientLight, Attenuation, DirectionalLight, Light, PointLight};
use crate::shape::{Geometry, Shape};
use crate::{AxisAlignedBox, Camera, Disk, Plane, Raytracer, Sphere, Triangle};

/// Errors that can occur while turning a description into a raytracer.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Invalid shape: {0}")]
    InvalidShape(String),
}

pub type LoadResult<T> = Result<T, LoadError>;

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

/// Read a description file and build a raytracer.
///
/// Texture paths are resolved relative to the description's directory.
pub fn load_scene(path: impl AsRef<Path>) -> LoadResult<Raytracer> {
    let path = path.as_ref();
    log::info!("Loading scene: {}", path.display());

    let description = SceneDescription::from_path(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut textures = TextureCache::with_base_dir(base_dir);

    build_raytracer(&description, &mut textures)
}

/// Build a raytracer, loading textures through `textures`.
pub fn build_raytracer(
    description: &SceneDescription,
    textures: &mut TextureCache,
) -> LoadResult<Raytracer> {
    let mut raytracer = Raytracer::new(description.width, description.height);

    let camera = &description.camera;
    raytracer.camera = Camera::new()
        .with_fov(camera.fov)
        .with_near_plane(camera.near_plane)
        .with_position(vec3(camera.position));

    raytracer.config.clear_color = vec3(description.clear_color);
    if let Some(max_depth) = description.max_depth {
        raytracer.config.max_depth = max_depth;
    }

    if let Some(environment) = &description.environment {
        raytracer.environment = Some(textures.load(environment)?);
    }

    // Shapes sharing a material name share one material
    let mut materials = HashMap::with_capacity(description.materials.len());
    for (name, material) in &description.materials {
        materials.insert(name.as_str(), Arc::new(build_material(material, textures)?));
    }

    for (index, shape) in description.shapes.iter().enumerate() {
        let name = shape.material();
        let material = materials
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::UnknownMaterial(name.to_string()))?;
        let geometry = build_geometry(shape).map_err(|reason| {
            LoadError::InvalidShape(format!("shape {index}: {reason}"))
        })?;
        raytracer.add_shape(Shape::new(geometry, material));
    }

    for light in &description.lights {
        raytracer.add_light(build_light(light));
    }

    if raytracer.scene.is_empty() {
        log::warn!("Scene has no shapes");
    }
    if raytracer.lights.is_empty() {
        log::warn!("Scene has no lights");
    }
    log::debug!(
        "Built scene: {} shapes, {} lights, {} materials, {} textures",
        raytracer.scene.len(),
        raytracer.lights.len(),
        materials.len(),
        textures.len()
    );

    Ok(raytracer)
}

fn build_material(
    description: &MaterialDescription,
    textures: &mut TextureCache,
) -> LoadResult<Material> {
    let mut material = Material::new(vec3(description.diffuse))
        .with_spec(description.spec)
        .with_ior(description.ior)
        .with_mode(description.mode);

    if let Some(path) = &description.texture {
        material = material.with_texture(textures.load(path)?);
    }

    Ok(material)
}

fn build_geometry(description: &ShapeDescription) -> Result<Geometry, String> {
    let geometry = match description {
        ShapeDescription::Sphere { center, radius, .. } => {
            if *radius <= 0.0 {
                return Err(format!("sphere radius must be positive, got {radius}"));
            }
            Sphere::new(vec3(*center), *radius).into()
        }
        ShapeDescription::Plane {
            position, normal, ..
        } => Plane::new(vec3(*position), nonzero_normal(*normal)?).into(),
        ShapeDescription::Disk {
            position,
            normal,
            radius,
            ..
        } => {
            if *radius <= 0.0 {
                return Err(format!("disk radius must be positive, got {radius}"));
            }
            Disk::new(vec3(*position), nonzero_normal(*normal)?, *radius).into()
        }
        ShapeDescription::Box { position, size, .. } => {
            let size = vec3(*size);
            if size.min_element() <= 0.0 {
                return Err(format!("box size must be positive, got {size}"));
            }
            AxisAlignedBox::new(vec3(*position), size).into()
        }
        ShapeDescription::Triangle { vertices, .. } => {
            let [a, b, c] = (*vertices).map(vec3);
            if (b - a).cross(c - a).length_squared() == 0.0 {
                return Err("triangle is degenerate".to_string());
            }
            Triangle::new(a, b, c).into()
        }
    };
    Ok(geometry)
}

fn nonzero_normal(normal: [f32; 3]) -> Result<Vec3, String> {
    let normal = vec3(normal);
    if normal.length_squared() == 0.0 {
        return Err("normal must be non-zero".to_string());
    }
    Ok(normal)
}

fn build_light(description: &LightDescription) -> Light {
    match *description {
        LightDescription::Directional {
            direction,
            intensity,
            color,
        } => DirectionalLight::new(vec3(direction), intensity, vec3(color)).into(),
        LightDescription::Point {
            position,
            intensity,
            constant,
            linear,
            quadratic,
            falloff,
            color,
        } => {
            let mut light = PointLight::new(vec3(position), vec3(color))
                .with_intensity(intensity)
                .with_attenuation(Attenuation::new(constant, linear, quadratic));
            if falloff {
                light = light.with_falloff();
            }
            light.into()
        }
        LightDescription::Ambient { intensity, color } => {
            AmbientLight::new(intensity, vec3(color)).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{bmp, Color, ShadingMode};
    use glint_math::Ray;

    const SCENE: &str = r#"{
        "width": 32,
        "height": 24,
        "camera": { "fov": 45, "position": [0, 1, 0] },
        "clear_color": [0.1, 0.2, 0.3],
        "max_depth": 3,
        "materials": {
            "glass": { "type": "transparent", "ior": 1.5, "spec": 64 },
            "stone": { "diffuse": [0.5, 0.5, 0.5] }
        },
        "shapes": [
            { "type": "sphere", "center": [0, 0, -5], "radius": 1, "material": "glass" },
            { "type": "plane", "position": [0, -1, 0], "normal": [0, 2, 0], "material": "stone" },
            { "type": "box", "position": [2, 0, -8], "size": [1, 1, 1], "material": "stone" }
        ],
        "lights": [
            { "type": "ambient" },
            { "type": "point", "position": [0, 5, 0], "falloff": true }
        ]
    }"#;

    #[test]
    fn test_build_from_json() {
        let description = SceneDescription::from_json_str(SCENE).unwrap();
        let rt = build_raytracer(&description, &mut TextureCache::new()).unwrap();

        assert_eq!((rt.width, rt.height), (32, 24));
        assert_eq!(rt.camera.fov, 45.0);
        assert_eq!(rt.camera.position, Vec3::Y);
        assert_eq!(rt.config.clear_color, Color::new(0.1, 0.2, 0.3));
        assert_eq!(rt.config.max_depth, 3);
        assert_eq!(rt.scene.len(), 3);
        assert_eq!(rt.lights.len(), 2);

        let shapes = rt.scene.shapes();
        assert_eq!(shapes[0].material().mode, ShadingMode::Transparent);
        assert_eq!(shapes[0].material().ior, 1.5);
        // Both stone shapes point at the same material
        assert!(std::ptr::eq(shapes[1].material(), shapes[2].material()));

        match rt.lights[1] {
            Light::Point(light) => assert!(light.has_falloff()),
            other => panic!("expected point light, got {other:?}"),
        }
    }

    #[test]
    fn test_plane_normal_is_normalized() {
        let description = SceneDescription::from_json_str(SCENE).unwrap();
        let rt = build_raytracer(&description, &mut TextureCache::new()).unwrap();

        let hit = rt
            .scene
            .nearest_hit(&Ray::new(Vec3::new(5.0, 5.0, 0.0), -Vec3::Y), None)
            .unwrap();
        assert_eq!(hit.normal, Vec3::Y);
        assert!((hit.distance - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{
            "shapes": [ { "type": "sphere", "center": [0, 0, -5], "radius": 1, "material": "missing" } ]
        }"#;
        let description = SceneDescription::from_json_str(json).unwrap();
        let err = build_raytracer(&description, &mut TextureCache::new()).unwrap_err();
        assert!(matches!(err, LoadError::UnknownMaterial(name) if name == "missing"));
    }

    #[test]
    fn test_invalid_shapes() {
        for shape in [
            r#"{ "type": "sphere", "center": [0, 0, -5], "radius": 0, "material": "m" }"#,
            r#"{ "type": "plane", "position": [0, 0, 0], "normal": [0, 0, 0], "material": "m" }"#,
            r#"{ "type": "disk", "position": [0, 0, 0], "normal": [0, 1, 0], "radius": -1, "material": "m" }"#,
            r#"{ "type": "box", "position": [0, 0, 0], "size": [1, 0, 1], "material": "m" }"#,
            r#"{ "type": "triangle", "vertices": [[0, 0, 0], [1, 1, 1], [2, 2, 2]], "material": "m" }"#,
        ] {
            let json = format!(r#"{{ "materials": {{ "m": {{}} }}, "shapes": [ {shape} ] }}"#);
            let description = SceneDescription::from_json_str(&json).unwrap();
            let err = build_raytracer(&description, &mut TextureCache::new()).unwrap_err();
            assert!(matches!(err, LoadError::InvalidShape(_)), "{shape}: {err}");
        }
    }

    #[test]
    fn test_load_scene_resolves_textures() {
        let dir = std::env::temp_dir().join(format!("glint_loader_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let pixels = vec![Color::new(1.0, 0.0, 0.0); 4];
        let bytes = bmp::encode(2, 2, &pixels).unwrap();
        std::fs::write(dir.join("red.bmp"), bytes).unwrap();
        std::fs::write(dir.join("sky.bmp"), bmp::encode(1, 1, &[Color::Z]).unwrap()).unwrap();

        let json = r#"{
            "environment": "sky.bmp",
            "materials": { "brick": { "texture": "red.bmp" } },
            "shapes": [ { "type": "sphere", "center": [0, 0, -5], "radius": 1, "material": "brick" } ],
            "lights": [ { "type": "ambient", "intensity": 1 } ]
        }"#;
        let scene_path = dir.join("scene.json");
        std::fs::write(&scene_path, json).unwrap();

        let rt = load_scene(&scene_path).unwrap();
        let material = rt.scene.shapes()[0].material();
        assert!(material.has_texture());
        assert_eq!(rt.environment_color(Vec3::X), Color::Z);

        let color = rt.cast_ray(&Ray::new(Vec3::ZERO, -Vec3::Z), None, 0);
        assert_eq!(color, Color::new(1.0, 0.0, 0.0));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_texture_fails() {
        let json = r#"{ "materials": { "m": { "texture": "does_not_exist.bmp" } } }"#;
        let description = SceneDescription::from_json_str(json).unwrap();
        let err = build_raytracer(&description, &mut TextureCache::new()).unwrap_err();
        assert!(matches!(err, LoadError::Texture(_)));
    }
}
