// Transform utilities for Mat4
//
// Extends glam::Mat4 with the normal-matrix transform needed when geometry
// is deformed by an affine transform. glam::Mat4 already provides
// transform_point3() and transform_vector3().

use glam::{Mat4, Vec3};

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// The matrix that transforms surface normals under this transform:
    /// the transpose of the inverse. For rotations and uniform scale this
    /// equals the original matrix up to scale; for non-uniform scale it
    /// differs, which is why normals must not go through transform_vector3.
    fn normal_matrix(&self) -> Mat4;

    /// Transform a surface normal and renormalize it.
    fn transform_normal(&self, normal: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn normal_matrix(&self) -> Mat4 {
        self.inverse().transpose()
    }

    fn transform_normal(&self, normal: Vec3) -> Vec3 {
        self.normal_matrix()
            .transform_vector3(normal)
            .normalize()
    }
}
