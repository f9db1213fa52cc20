//! Camera for ray generation and the progressive render loop.

use std::io;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::film::{accumulate, Film};
use crate::hittable::Hittable;
use crate::integrator::{trace_ray, RenderConfig};
use crate::sampling::{gen_f32, pixel_seed};
use lux_math::{Mat4, Ray, Vec3};

/// Camera generating primary rays through a virtual viewport.
///
/// The viewport has a fixed height of 2 world units and a width of
/// 2 * aspect ratio, placed one focal length in front of the camera; the
/// focal length is derived from the vertical field of view.
#[derive(Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    position: Vec3,
    direction: Vec3,
    fov: f32, // Vertical field of view in degrees

    // Cached computed values (set by initialize())
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    left_top: Vec3,
}

const VIEWPORT_HEIGHT: f32 = 2.0;
const WORLD_UP: Vec3 = Vec3::Y;

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 1280,
            image_height: 720,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            fov: 90.0,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            left_top: Vec3::ZERO,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position and view direction (normalized here).
    pub fn with_position(mut self, position: Vec3, direction: Vec3) -> Self {
        self.position = position;
        self.direction = direction.normalize();
        self
    }

    /// Set the vertical field of view in degrees. Must be in (0, 180).
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Derive and cache the viewport vectors (must be called before
    /// generating rays, and again after changing position/direction/fov).
    pub fn initialize(&mut self) {
        debug_assert!(self.fov > 0.0 && self.fov < 180.0);

        let aspect_ratio = self.image_width as f32 / self.image_height as f32;
        let viewport_width = aspect_ratio * VIEWPORT_HEIGHT;

        let matrix = self.camera_matrix();

        // World-space extents of the viewport edges; v runs downwards so
        // pixel rows go top to bottom
        let viewport_u = matrix.transform_vector3(Vec3::new(viewport_width, 0.0, 0.0));
        let viewport_v = matrix.transform_vector3(Vec3::new(0.0, -VIEWPORT_HEIGHT, 0.0));

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let focal_length = self.focal_length();
        self.left_top = matrix.transform_point3(Vec3::new(
            -viewport_width / 2.0,
            VIEWPORT_HEIGHT / 2.0,
            -focal_length,
        ));
    }

    /// Camera-to-world transform: orthonormal basis derived from the view
    /// direction and world up, translation at the camera position.
    fn camera_matrix(&self) -> Mat4 {
        let forward = -self.direction;
        let right = WORLD_UP.cross(forward).normalize();
        let up = forward.cross(right);

        Mat4::from_cols(
            right.extend(0.0),
            up.extend(0.0),
            forward.extend(0.0),
            self.position.extend(1.0),
        )
    }

    /// Distance from the camera to the viewport plane for the configured
    /// field of view.
    fn focal_length(&self) -> f32 {
        (VIEWPORT_HEIGHT / 2.0) / (self.fov / 2.0).to_radians().tan()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Generate a ray through a jittered point inside pixel (x, y).
    ///
    /// The jitter is uniform in [-0.5, 0.5] around the pixel center, giving
    /// box-filter antialiasing across sweeps.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let offset_x = gen_f32(rng) - 0.5;
        let offset_y = gen_f32(rng) - 0.5;

        let pixel = self.left_top
            + (x as f32 + 0.5 + offset_x) * self.pixel_delta_u
            + (y as f32 + 0.5 + offset_y) * self.pixel_delta_v;

        Ray::new(self.position, pixel - self.position)
    }

    /// Render `config.iterations` progressive sweeps of the scene.
    ///
    /// Each sweep traces one jittered sample per pixel (rows in parallel),
    /// folds it into the running per-pixel mean, and rewrites `output` as a
    /// PPM image, so interrupting a long render still leaves a valid,
    /// progressively refined picture. Failing to write a sweep is surfaced
    /// immediately rather than silently dropped.
    pub fn render(
        &self,
        world: &dyn Hittable,
        config: &RenderConfig,
        output: &Path,
    ) -> io::Result<Film> {
        let mut film = Film::new(self.image_width, self.image_height);
        let width = self.image_width;

        for sweep in 1..=config.iterations {
            film.pixels_mut()
                .par_chunks_mut(width as usize)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, pixel) in row.iter_mut().enumerate() {
                        let seed = pixel_seed(x as u32, y as u32, width, sweep);
                        let mut rng = StdRng::seed_from_u64(seed);

                        let ray = self.get_ray(x as u32, y as u32, &mut rng);
                        let sample = trace_ray(world, ray, config.max_bounces, &mut rng);

                        *pixel = accumulate(*pixel, sample, sweep);
                    }
                });

            film.write_ppm_file(output, config.exposure)?;
            log::info!(
                "sweep {}/{} written to {}",
                sweep,
                config.iterations,
                output.display()
            );
        }

        Ok(film)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
