//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use lux_core::Material;
use lux_math::{Interval, Ray, Vec3};

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        // Degenerate direction: treat as a miss rather than dividing by ~0
        if a < 1e-8 {
            return None;
        }

        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Near root only: a ray starting inside the sphere misses, matching
        // the single-sided surface convention of the triangle primitive.
        let root = (h - discriminant.sqrt()) / a;
        if !ray_t.surrounds(root) {
            return None;
        }

        let point = ray.at(root);
        Some(HitRecord {
            point,
            normal: (point - self.center) / self.radius,
            t: root,
            material: &self.material,
        })
    }
}
