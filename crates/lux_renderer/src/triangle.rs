//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm in scalar-triple-product form, with a
//! single-sided back-face convention: rays striking the back face miss.

use crate::hittable::{HitRecord, Hittable};
use lux_core::Material;
use lux_math::{Interval, Mat4, Mat4Ext, Ray, Vec3};

/// Determinant threshold below which a ray counts as parallel (or hitting
/// the back face) and the query is a miss.
const DET_EPSILON: f32 = 1e-8;

/// Tolerance for barycentric coordinates at the triangle boundary.
const EDGE_EPSILON: f32 = 1e-6;

/// A triangle primitive with per-vertex shading normals.
pub struct Triangle {
    vertices: [Vec3; 3],
    normals: [Vec3; 3],
    material: Material,
}

impl Triangle {
    /// Create a flat-shaded triangle: the geometric face normal is
    /// replicated to every vertex.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: Material) -> Self {
        let face_normal = (b - a).cross(c - a).normalize();
        Self {
            vertices: [a, b, c],
            normals: [face_normal; 3],
            material,
        }
    }

    /// Create a smooth-shaded triangle with explicit per-vertex normals.
    pub fn with_normals(
        a: Vec3,
        b: Vec3,
        c: Vec3,
        na: Vec3,
        nb: Vec3,
        nc: Vec3,
        material: Material,
    ) -> Self {
        Self {
            vertices: [a, b, c],
            normals: [na.normalize(), nb.normalize(), nc.normalize()],
            material,
        }
    }

    pub fn vertices(&self) -> &[Vec3; 3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3; 3] {
        &self.normals
    }

    /// Translate the triangle by `offset`.
    pub fn shift(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Apply an affine transform: vertices through the matrix, normals
    /// through the normal matrix so they stay perpendicular to the surface
    /// under non-uniform scale.
    pub fn transform(&mut self, matrix: &Mat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
        for n in &mut self.normals {
            *n = matrix.transform_normal(*n);
        }
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let [a, b, c] = self.vertices;
        let ab = b - a;
        let ac = c - a;
        let face_normal = ab.cross(ac);

        // Single-sided: back-face and near-parallel rays miss
        let det = -ray.direction().dot(face_normal);
        if det < DET_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let ao = ray.origin() - a;
        let dao = ao.cross(ray.direction());

        let t = ao.dot(face_normal) * inv_det;
        let u = ac.dot(dao) * inv_det;
        let v = -ab.dot(dao) * inv_det;
        let w = 1.0 - u - v;

        if !ray_t.surrounds(t) {
            return None;
        }
        if u < -EDGE_EPSILON || v < -EDGE_EPSILON || w < -EDGE_EPSILON {
            return None;
        }

        let [na, nb, nc] = self.normals;
        Some(HitRecord {
            point: ray.at(t),
            normal: (na * w + nb * u + nc * v).normalize(),
            t,
            material: &self.material,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::T_MIN;
    use std::f32::consts::PI;

    fn full_range() -> Interval {
        Interval::new(T_MIN, f32::INFINITY)
    }

    /// Triangle in the z = -1 plane whose face normal points towards +Z.
    fn reference_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Material::default(),
        )
    }

    #[test]
    fn test_front_face_hit() {
        let tri = reference_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = tri.hit(&ray, full_range()).expect("hit");
        assert!((rec.t - 1.0).abs() < 1e-4);
        assert!((rec.point - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
        assert!((rec.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_back_face_misses() {
        let tri = reference_triangle();
        // Same line, opposite side: approaches from behind the face
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);

        assert!(tri.hit(&ray, full_range()).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = reference_triangle();
        let ray = Ray::new(Vec3::new(0.0, -5.0, -1.0), Vec3::Y);

        assert!(tri.hit(&ray, full_range()).is_none());
    }

    #[test]
    fn test_outside_edges_miss() {
        let tri = reference_triangle();
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);

        assert!(tri.hit(&ray, full_range()).is_none());
    }

    #[test]
    fn test_normal_interpolation() {
        // Vertex normals fan outwards; dead-center the interpolated normal
        // averages back to +Z
        let spread = Vec3::new(1.0, 0.0, 1.0).normalize();
        let tri = Triangle::with_normals(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Vec3::new(-spread.x, 0.0, spread.z),
            Vec3::new(spread.x, 0.0, spread.z),
            Vec3::Z,
            Material::default(),
        );

        // Centroid of the triangle: u = v = w = 1/3
        let ray = Ray::new(Vec3::new(0.0, -1.0 / 3.0, 0.0), Vec3::NEG_Z);
        let rec = tri.hit(&ray, full_range()).expect("hit");

        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        // The +/-x components cancel, leaving a pure +Z direction
        assert!(rec.normal.x.abs() < 1e-4);
        assert!((rec.normal - Vec3::Z).length() < 1e-3);
    }

    #[test]
    fn test_hit_behind_origin_misses() {
        let tri = reference_triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::NEG_Z);

        assert!(tri.hit(&ray, full_range()).is_none());
    }

    #[test]
    fn test_shift() {
        let mut tri = reference_triangle();
        tri.shift(Vec3::new(0.0, 0.0, -4.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = tri.hit(&ray, full_range()).expect("hit");
        assert!((rec.t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_transform_rotation_round_trip() {
        let mut tri = reference_triangle();
        let original = *tri.vertices();

        tri.transform(&Mat4::from_axis_angle(Vec3::Y, PI / 3.0));
        tri.transform(&Mat4::from_axis_angle(Vec3::Y, -PI / 3.0));

        for (v, o) in tri.vertices().iter().zip(original.iter()) {
            assert!((*v - *o).length() < 1e-4);
        }
    }

    #[test]
    fn test_transform_nonuniform_scale_fixes_normals() {
        // A triangle tilted 45 degrees, normal (1,1,0)/sqrt2; scale x by 4
        // and the surface flattens, so the normal must tip towards +Y
        let mut tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Material::default(),
        );
        let face = tri.normals()[0];
        assert!((face - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-4);

        tri.transform(&Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0)));
        let n = tri.normals()[0];

        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(n.y > n.x);

        // Must stay perpendicular to the transformed surface
        let [a, b, c] = *tri.vertices();
        assert!(n.dot(b - a).abs() < 1e-4);
        assert!(n.dot(c - a).abs() < 1e-4);
    }
}
