//! 4x4 matrix implementation.

use super::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 4x4 matrix stored in column-major order.
/// Used for model, view and projection transforms.
///
/// Projections follow the wgpu/WebGPU convention: right-handed view space,
/// clip-space depth in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    /// Matrix elements in column-major order.
    /// [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33]
    pub elements: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Create from column-major array.
    #[inline]
    pub const fn from_cols_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Extract the translation component.
    #[inline]
    pub fn get_position(&self) -> Vector3 {
        Vector3::new(self.elements[12], self.elements[13], self.elements[14])
    }

    /// Get the largest axis scale, used to grow bounding spheres.
    pub fn get_max_scale(&self) -> f32 {
        let e = &self.elements;
        let sx2 = e[0] * e[0] + e[1] * e[1] + e[2] * e[2];
        let sy2 = e[4] * e[4] + e[5] * e[5] + e[6] * e[6];
        let sz2 = e[8] * e[8] + e[9] * e[9] + e[10] * e[10];
        sx2.max(sy2).max(sz2).sqrt()
    }

    /// Compose a transformation matrix from position, quaternion, and scale.
    pub fn compose(position: &Vector3, quaternion: &Quaternion, scale: &Vector3) -> Self {
        glam::Mat4::from_scale_rotation_translation(
            (*scale).into(),
            (*quaternion).into(),
            (*position).into(),
        )
        .into()
    }

    /// Create a translation matrix.
    pub fn from_translation(v: &Vector3) -> Self {
        glam::Mat4::from_translation((*v).into()).into()
    }

    /// Create a view matrix looking from `eye` toward `target`.
    ///
    /// When the view direction is parallel to `up` (a camera looking straight
    /// down, say) the direction is nudged off the up axis so the matrix stays
    /// finite. A `target` equal to `eye` looks along -Z.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let mut direction = *target - *eye;
        if direction.length_squared() == 0.0 {
            direction = Vector3::FORWARD;
        }
        direction = direction.normalized();

        if direction.cross(up).length_squared() == 0.0 {
            if up.z.abs() == 1.0 {
                direction.x += 1e-4;
            } else {
                direction.z += 1e-4;
            }
            direction = direction.normalized();
        }

        glam::Mat4::look_to_rh((*eye).into(), direction.into(), (*up).into()).into()
    }

    /// Create a perspective projection matrix. `fov_y` is in radians.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        glam::Mat4::perspective_rh(fov_y, aspect, near, far).into()
    }

    /// Create an orthographic projection matrix.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        glam::Mat4::orthographic_rh(left, right, bottom, top, near, far).into()
    }

    /// `self * other`.
    pub fn multiply(&self, other: &Matrix4) -> Self {
        (glam::Mat4::from(*self) * glam::Mat4::from(*other)).into()
    }

    pub fn determinant(&self) -> f32 {
        glam::Mat4::from(*self).determinant()
    }

    /// Return the inverse of this matrix. A singular matrix yields the identity.
    pub fn inverse(&self) -> Self {
        let m = glam::Mat4::from(*self);
        if m.determinant() == 0.0 {
            return Self::IDENTITY;
        }
        m.inverse().into()
    }

    /// Transform a Vector3 as a point (with translation and perspective divide).
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        glam::Mat4::from(*self).project_point3((*v).into()).into()
    }

    /// Transform a Vector3 as a direction (without translation).
    pub fn transform_direction(&self, v: &Vector3) -> Vector3 {
        glam::Mat4::from(*self).transform_vector3((*v).into()).into()
    }

    /// Transform a surface normal, using the inverse transpose of the upper 3x3
    /// so non-uniform scale keeps it perpendicular. The result is normalized.
    pub fn transform_normal(&self, n: &Vector3) -> Vector3 {
        let normal_matrix = glam::Mat3::from_mat4(glam::Mat4::from(*self))
            .inverse()
            .transpose();
        Vector3::from(normal_matrix * glam::Vec3::from(*n)).normalized()
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.elements)
    }
}
