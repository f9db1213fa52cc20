//! Surface material description.

use glam::Vec3;

/// How a surface responds to light.
///
/// A plain value type: primitives own their material outright, and meshes
/// broadcast one material to every triangle by copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Albedo (RGB, 0-1). Applied multiplicatively to path throughput.
    pub color: Vec3,

    /// Emitted light color (RGB, unbounded once scaled by strength)
    pub emission_color: Vec3,

    /// Emission scale factor (>= 0, 0 = no emission)
    pub emission_strength: f32,

    /// Specular mix: 0 = fully diffuse, 1 = perfect mirror
    pub smoothness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::splat(0.5), // Grey default
            emission_color: Vec3::ZERO,
            emission_strength: 0.0,
            smoothness: 0.0,
        }
    }
}

impl Material {
    /// Create a material from all four components.
    pub fn new(color: Vec3, emission_color: Vec3, emission_strength: f32, smoothness: f32) -> Self {
        Self {
            color,
            emission_color,
            emission_strength,
            smoothness: smoothness.clamp(0.0, 1.0),
        }
    }

    /// A purely diffuse material with the given albedo.
    pub fn diffuse(color: Vec3) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// A light source: black albedo, emitting `emission_color * strength`.
    pub fn emissive(emission_color: Vec3, emission_strength: f32) -> Self {
        Self {
            color: Vec3::ZERO,
            emission_color,
            emission_strength,
            smoothness: 0.0,
        }
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission_strength > 0.0 && self.emission_color.length_squared() > 0.0
    }
}
