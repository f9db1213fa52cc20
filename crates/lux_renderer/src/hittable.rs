//! Hittable trait and HitRecord for ray-object intersection.

use lux_core::Material;
use lux_math::{Interval, Ray, Vec3};

/// Minimum ray parameter accepted by intersection queries.
///
/// Rejects hits at (or numerically indistinguishable from) the ray origin,
/// so a bounce ray never re-hits the surface it just left.
pub const T_MIN: f32 = 1e-3;

/// Record of a ray-object intersection.
///
/// Only produced for an actual hit: a query that misses returns `None`
/// rather than a record with stale fields.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the intersection, oriented per primitive
    /// convention (outward for spheres, front-face for triangles)
    pub normal: Vec3,
    /// Ray parameter where the intersection occurs
    pub t: f32,
    /// Material of the hit primitive
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `ray` whose parameter lies
    /// strictly inside `ray_t`, or `None` if there is none.
    ///
    /// Pure query: never mutates the primitive. Numerically degenerate
    /// configurations count as misses.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// A heterogeneous list of hittable objects - the scene aggregate.
///
/// Intersection is a linear scan selecting the globally nearest hit.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord> = None;
        let mut limit = ray_t;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, limit) {
                limit.max = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;

    fn sphere_at(z: f32) -> Box<Sphere> {
        Box::new(Sphere::new(
            Vec3::new(0.0, 0.0, z),
            1.0,
            Material::diffuse(Vec3::splat(0.5)),
        ))
    }

    #[test]
    fn test_list_selects_nearest_hit() {
        let mut list = HittableList::new();
        list.add(sphere_at(-10.0));
        list.add(sphere_at(-5.0));
        list.add(sphere_at(-20.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = list
            .hit(&ray, Interval::new(T_MIN, f32::INFINITY))
            .expect("hit");

        // Nearest sphere's front face is at z = -4
        assert!((rec.t - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_list_misses() {
        let list = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(list.hit(&ray, Interval::new(T_MIN, f32::INFINITY)).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn test_list_respects_upper_bound() {
        let mut list = HittableList::new();
        list.add(sphere_at(-5.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        // Sphere front face at t=4 lies beyond the interval
        assert!(list.hit(&ray, Interval::new(T_MIN, 2.0)).is_none());
    }
}
