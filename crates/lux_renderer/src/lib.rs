//! Lux Renderer - CPU path tracing.
//!
//! An offline Monte Carlo path tracer:
//! - Iterative light transport with configurable bounce depth
//! - Progressive per-sweep accumulation (a partial run is a valid image)
//! - Deterministic sampling keyed by (pixel, sweep)
//! - ACES tonemapping with PPM and PNG output

mod camera;
mod film;
mod hittable;
mod integrator;
mod mesh;
mod sampling;
mod sphere;
mod triangle;

pub use camera::Camera;
pub use film::{accumulate, color_to_rgb8, Film};
pub use hittable::{HitRecord, Hittable, HittableList, T_MIN};
pub use integrator::{sky_color, trace_ray, RenderConfig};
pub use mesh::Mesh;
pub use sampling::{pixel_seed, random_unit_vector, reflect};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the material and math types the public API is built on
pub use lux_core::Material;
pub use lux_math::{Interval, Mat4, Ray, Vec3};
