//! Lux command-line renderer.
//!
//! Renders the built-in five-sphere demo scene (optionally with an OBJ
//! mesh given as the first argument), writing `out.ppm` after every sweep
//! and `out.png` when the render finishes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lux_core::{load_obj, Material};
use lux_renderer::{Camera, HittableList, Mesh, RenderConfig, Sphere, Vec3};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let obj_path = std::env::args().nth(1).map(PathBuf::from);
    let world = build_scene(obj_path.as_deref())?;

    let mut camera = Camera::new()
        .with_resolution(960, 540)
        .with_position(Vec3::new(-15.0, 5.0, -30.0), Vec3::new(10.0, 0.0, 10.0))
        .with_fov(70.0);
    camera.initialize();

    let config = RenderConfig {
        max_bounces: 10,
        iterations: 100,
        exposure: 2.0,
    };

    log::info!(
        "rendering {}x{} ({} sweeps, {} bounces)",
        camera.image_width,
        camera.image_height,
        config.iterations,
        config.max_bounces
    );

    let ppm_path = Path::new("out.ppm");
    let film = camera
        .render(&world, &config, ppm_path)
        .context("writing render output failed")?;

    film.save_png(Path::new("out.png"), config.exposure)
        .context("saving PNG failed")?;
    log::info!("render complete: out.ppm, out.png");

    Ok(())
}

/// The demo scene: four glossy diffuse spheres and one emissive "sun".
fn build_scene(obj_path: Option<&Path>) -> Result<HittableList> {
    let mut world = HittableList::new();

    let glossy = |color| Material::new(color, Vec3::ONE, 0.0, 0.9);

    // Red
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 0.0, -10.0),
        4.0,
        glossy(Vec3::new(0.8, 0.1, 0.2)),
    )));
    // Green
    world.add(Box::new(Sphere::new(
        Vec3::new(2.0, 8.0, -14.0),
        4.0,
        glossy(Vec3::new(0.2, 0.8, 0.3)),
    )));
    // Blue ground sphere
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -50.0, -7.0),
        46.0,
        glossy(Vec3::new(0.2, 0.4, 0.7)),
    )));
    // White
    world.add(Box::new(Sphere::new(
        Vec3::new(2.0, 8.0, -6.0),
        4.0,
        glossy(Vec3::ONE),
    )));
    // Sun
    world.add(Box::new(Sphere::new(
        Vec3::new(10.0, 0.0, -15.0),
        4.0,
        Material::emissive(Vec3::ONE, 5.0),
    )));

    if let Some(path) = obj_path {
        let geometry =
            load_obj(path).with_context(|| format!("loading mesh from {}", path.display()))?;
        let mut mesh = Mesh::from_geometry(&geometry, Material::diffuse(Vec3::splat(0.8)));
        mesh.set_position(Vec3::new(-4.0, 0.0, -4.0));
        log::info!(
            "added mesh with {} triangles from {}",
            mesh.triangle_count(),
            path.display()
        );
        world.add(Box::new(mesh));
    }

    Ok(world)
}
