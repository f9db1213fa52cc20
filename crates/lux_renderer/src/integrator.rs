//! Light transport integration.
//!
//! Unidirectional forward path tracing: walk the ray through the scene for
//! at most `max_bounces + 1` segments, accumulating emitted light weighted
//! by the throughput absorbed so far. No cosine/PDF weighting and no
//! Russian roulette; the estimator is biased but matches the reference
//! renderer's look exactly, bounce for bounce.

use crate::hittable::{Hittable, T_MIN};
use crate::sampling::{random_unit_vector, reflect};
use lux_math::{Interval, Ray, Vec3};
use rand::RngCore;

/// Render settings shared by the whole frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Maximum number of bounces after the camera ray
    pub max_bounces: u32,
    /// Number of full-frame accumulation sweeps
    pub iterations: u32,
    /// Exposure multiplier applied before tonemapping
    pub exposure: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_bounces: 10,
            iterations: 100,
            exposure: 2.0,
        }
    }
}

/// Trace one sample path and return its radiance estimate.
pub fn trace_ray(
    world: &dyn Hittable,
    mut ray: Ray,
    max_bounces: u32,
    rng: &mut dyn RngCore,
) -> Vec3 {
    let mut throughput = Vec3::ONE;
    let mut radiance = Vec3::ZERO;

    for _ in 0..=max_bounces {
        match world.hit(&ray, Interval::new(T_MIN, f32::INFINITY)) {
            Some(hit) => {
                let material = hit.material;

                // Emission reaches the eye attenuated by everything the
                // path has already been absorbed through
                radiance += throughput * material.emission_color * material.emission_strength;
                throughput *= material.color;

                let diffuse = hit.normal + random_unit_vector(rng);
                let specular = reflect(ray.direction(), hit.normal);
                let mut direction = diffuse.lerp(specular, material.smoothness);

                // Diffuse sample opposite the normal can cancel to ~zero
                if direction.length_squared() < 1e-12 {
                    direction = hit.normal;
                }

                ray = Ray::new(hit.point, direction);
            }
            None => {
                // Escaped to the environment; nothing left to bounce off
                radiance += throughput * sky_color(&ray);
                break;
            }
        }
    }

    radiance
}

/// Environment light for rays that leave the scene: a vertical gradient
/// from white at the horizon-down hemisphere to sky blue straight up.
pub fn sky_color(ray: &Ray) -> Vec3 {
    let a = 0.5 * (ray.direction().y + 1.0);
    Vec3::ONE.lerp(Vec3::new(0.5, 0.7, 1.0), a)
}
