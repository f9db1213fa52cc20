//! Sampling helpers for the integrator and camera.
//!
//! Every random decision in a render draws from an `RngCore` stream seeded
//! by `pixel_seed`, a pure function of (pixel, sweep). Re-rendering with
//! the same resolution and sweep count therefore reproduces the image
//! bit-for-bit, regardless of thread scheduling.

use lux_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform f32 in [0, 1).
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Uniform f32 in [min, max).
#[inline]
pub(crate) fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Uniformly distributed unit vector, via rejection sampling in the unit
/// ball: reject candidates outside the ball or too short to normalize
/// safely, then project the survivor onto the sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let len_sq = candidate.length_squared();
        if len_sq > 1e-12 && len_sq <= 1.0 {
            return candidate / len_sq.sqrt();
        }
    }
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Derive the RNG seed for one pixel of one sweep.
///
/// Pure function of (pixel, sweep) so samples are reproducible; the sweep
/// stride keeps consecutive sweeps from replaying the same sequence.
pub fn pixel_seed(x: u32, y: u32, width: u32, sweep: u32) -> u64 {
    let pixel_index = y as u64 * width as u64 + x as u64;
    pixel_index.wrapping_add(sweep as u64 * 9_483_984)
}
