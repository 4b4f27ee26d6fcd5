//! Simple ray tracer example.
//!
//! Renders boxes, a mirror and a glass sphere above a floor and saves the
//! result as a BMP.

use std::sync::Arc;

use glint_renderer::{
    AmbientLight, AxisAlignedBox, Camera, Color, DirectionalLight, Disk, Material, Plane,
    PointLight, Raytracer, Shape, Sphere, Vec3,
};

fn main() {
    env_logger::init();

    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let raytracer = build_scene(640, 480);
    println!("Scene built in {:?}", start.elapsed());

    println!(
        "Rendering {}x{} (max depth {})...",
        raytracer.width, raytracer.height, raytracer.config.max_depth
    );

    let start = std::time::Instant::now();
    let frame = raytracer.render();
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.bmp";
    if let Err(err) = frame.save(filename) {
        eprintln!("Failed to save {filename}: {err}");
        std::process::exit(1);
    }
    println!("Saved to {}", filename);
}

fn build_scene(width: u32, height: u32) -> Raytracer {
    let mut rt = Raytracer::new(width, height);
    rt.camera = Camera::new().with_fov(60.0).with_position(Vec3::new(0.0, 0.5, 0.0));
    rt.config.clear_color = Color::new(0.5, 0.7, 1.0);

    let floor = Arc::new(Material::opaque(Color::new(0.6, 0.6, 0.6), 16.0));
    let red = Arc::new(Material::opaque(Color::new(0.9, 0.2, 0.2), 32.0));
    let blue = Arc::new(Material::opaque(Color::new(0.2, 0.3, 0.9), 8.0));
    let mirror = Arc::new(Material::reflective(Color::new(0.9, 0.9, 0.9), 128.0));
    let glass = Arc::new(Material::transparent(Color::ONE, 64.0, 1.5));

    // Floor
    rt.add_shape(Shape::new(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y), floor));

    // Two boxes
    rt.add_shape(Shape::new(
        AxisAlignedBox::new(Vec3::new(-2.0, 0.0, -8.0), Vec3::new(2.0, 2.0, 2.0)),
        red,
    ));
    rt.add_shape(Shape::new(
        AxisAlignedBox::new(Vec3::new(2.5, -0.5, -7.0), Vec3::new(1.0, 1.0, 1.0)),
        blue.clone(),
    ));

    // Mirror disk behind everything
    rt.add_shape(Shape::new(
        Disk::new(Vec3::new(0.0, 1.5, -14.0), Vec3::new(0.0, 0.0, 1.0), 4.0),
        mirror,
    ));

    // Glass sphere in front
    rt.add_shape(Shape::new(Sphere::new(Vec3::new(0.5, 0.0, -4.5), 1.0), glass));
    rt.add_shape(Shape::new(Sphere::new(Vec3::new(-0.8, -0.6, -5.5), 0.4), blue));

    rt.add_light(AmbientLight::new(0.1, Color::ONE));
    rt.add_light(DirectionalLight::new(
        Vec3::new(-1.0, -1.0, -1.0),
        0.8,
        Color::ONE,
    ));
    rt.add_light(
        PointLight::new(Vec3::new(3.0, 4.0, -3.0), Color::new(1.0, 0.9, 0.7))
            .with_intensity(0.3),
    );

    rt
}
