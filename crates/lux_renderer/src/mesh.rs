//! Triangle mesh aggregate.
//!
//! A mesh owns an ordered collection of triangles sharing a logical
//! position, with pivot-preserving rotation and scale applied about that
//! position. Intersection is a linear scan over the owned triangles.

use crate::hittable::{HitRecord, Hittable};
use crate::triangle::Triangle;
use lux_core::{Material, ObjGeometry};
use lux_math::{Interval, Mat4, Ray, Vec3};

/// An ordered collection of triangles with a shared world position.
#[derive(Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    position: Vec3,
}

impl Mesh {
    /// Create an empty mesh at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh at `position`.
    pub fn with_position(position: Vec3) -> Self {
        Self {
            triangles: Vec::new(),
            position,
        }
    }

    /// Build a mesh from loaded OBJ geometry, broadcasting `material` to
    /// every triangle. Triangles without per-vertex normals get flat
    /// face normals.
    pub fn from_geometry(geometry: &ObjGeometry, material: Material) -> Self {
        let mut mesh = Self::new();
        for tri in &geometry.triangles {
            let [a, b, c] = tri.positions;
            let triangle = match tri.normals {
                Some([na, nb, nc]) => Triangle::with_normals(a, b, c, na, nb, nc, material),
                None => Triangle::new(a, b, c, material),
            };
            mesh.add(triangle);
        }
        mesh
    }

    /// Add a triangle, shifting it by the mesh's current position so
    /// triangles are authored in mesh-local coordinates.
    pub fn add(&mut self, mut triangle: Triangle) {
        triangle.shift(self.position);
        self.triangles.push(triangle);
    }

    /// Move the mesh to an absolute world position.
    ///
    /// Shifts every owned triangle by the difference from the previous
    /// position, so repeated calls do not compound.
    pub fn set_position(&mut self, position: Vec3) {
        let delta = position - self.position;
        for triangle in &mut self.triangles {
            triangle.shift(delta);
        }
        self.position = position;
    }

    /// Move the mesh by a relative offset.
    pub fn translate(&mut self, delta: Vec3) {
        self.set_position(self.position + delta);
    }

    /// Rotate every triangle about the mesh position.
    pub fn set_rotation(&mut self, axis: Vec3, angle: f32) {
        self.apply_about_pivot(Mat4::from_axis_angle(axis.normalize(), angle));
    }

    /// Scale every triangle about the mesh position.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.apply_about_pivot(Mat4::from_scale(scale));
    }

    /// Translate to the pivot, apply the linear transform, translate back.
    fn apply_about_pivot(&mut self, linear: Mat4) {
        let pivoted = Mat4::from_translation(self.position)
            * linear
            * Mat4::from_translation(-self.position);
        for triangle in &mut self.triangles {
            triangle.transform(&pivoted);
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Hittable for Mesh {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord> = None;
        let mut limit = ray_t;

        for triangle in &self.triangles {
            if let Some(rec) = triangle.hit(ray, limit) {
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
    use crate::T_MIN;
    use std::f32::consts::PI;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Material::default(),
        )
    }

    #[test]
    fn test_add_applies_mesh_position() {
        let mut mesh = Mesh::with_position(Vec3::new(0.0, 0.0, -5.0));
        mesh.add(unit_triangle());

        assert_eq!(mesh.triangles()[0].vertices()[0], Vec3::new(-1.0, -1.0, -5.0));
    }

    #[test]
    fn test_set_position_is_absolute() {
        let mut mesh = Mesh::new();
        mesh.add(unit_triangle());

        // Calling set_position twice with the same target must not compound
        mesh.set_position(Vec3::new(0.0, 0.0, -5.0));
        mesh.set_position(Vec3::new(0.0, 0.0, -5.0));

        assert_eq!(mesh.position(), Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(mesh.triangles()[0].vertices()[2], Vec3::new(0.0, 1.0, -5.0));
    }

    #[test]
    fn test_translate_is_relative() {
        let mut mesh = Mesh::new();
        mesh.add(unit_triangle());

        mesh.translate(Vec3::new(1.0, 0.0, 0.0));
        mesh.translate(Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(mesh.position(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.triangles()[0].vertices()[2], Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotation_round_trip() {
        let mut mesh = Mesh::with_position(Vec3::new(3.0, 0.0, -8.0));
        mesh.add(unit_triangle());
        let original: Vec<[Vec3; 3]> = mesh.triangles().iter().map(|t| *t.vertices()).collect();

        mesh.set_rotation(Vec3::Y, PI / 5.0);
        mesh.set_rotation(Vec3::Y, -PI / 5.0);

        for (triangle, orig) in mesh.triangles().iter().zip(original.iter()) {
            for (v, o) in triangle.vertices().iter().zip(orig.iter()) {
                assert!((*v - *o).length() < 1e-4);
            }
        }
    }

    #[test]
    fn test_rotation_preserves_pivot() {
        let pivot = Vec3::new(0.0, 0.0, -5.0);
        let mut mesh = Mesh::with_position(pivot);
        mesh.add(unit_triangle());

        mesh.set_rotation(Vec3::Z, PI);

        // The triangle flipped in place around the pivot, not around the
        // world origin
        assert_eq!(mesh.position(), pivot);
        let v = mesh.triangles()[0].vertices()[2];
        assert!((v - Vec3::new(0.0, -1.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn test_scale_about_pivot() {
        let pivot = Vec3::new(0.0, 0.0, -5.0);
        let mut mesh = Mesh::with_position(pivot);
        mesh.add(unit_triangle());

        mesh.set_scale(Vec3::splat(2.0));

        let v = mesh.triangles()[0].vertices()[2];
        assert!((v - Vec3::new(0.0, 2.0, -5.0)).length() < 1e-4);
    }

    #[test]
    fn test_mesh_hit_selects_nearest_triangle() {
        let mut mesh = Mesh::new();
        let mut far = unit_triangle();
        far.shift(Vec3::new(0.0, 0.0, -10.0));
        let mut near = unit_triangle();
        near.shift(Vec3::new(0.0, 0.0, -4.0));
        mesh.add(far);
        mesh.add(near);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = mesh
            .hit(&ray, Interval::new(T_MIN, f32::INFINITY))
            .expect("hit");
        assert!((rec.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_geometry_flat_normals() {
        let geometry = lux_core::parse_obj(
            "v -1 -1 0\nv 1 -1 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();
        let mesh = Mesh::from_geometry(&geometry, Material::diffuse(Vec3::ONE));

        assert_eq!(mesh.triangle_count(), 1);
        // Flat face normal for all three corners
        let normals = mesh.triangles()[0].normals();
        for n in normals {
            assert!((*n - Vec3::Z).length() < 1e-4);
        }
    }
}
