//! Quaternion rotations for object orientation.

use super::Vector3;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A unit quaternion representing a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component (scalar).
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation).
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around `axis`. The axis is normalized first.
    pub fn from_axis_angle(axis: &Vector3, angle: f32) -> Self {
        glam::Quat::from_axis_angle(axis.normalized().into(), angle).into()
    }

    /// Hamilton product, `self` applied after `other`.
    pub fn multiply(&self, other: &Quaternion) -> Self {
        (glam::Quat::from(*self) * glam::Quat::from(*other)).into()
    }

    /// Rotate a vector by this quaternion.
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        (glam::Quat::from(*self) * glam::Vec3::from(*v)).into()
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Quaternion, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && (self.w - other.w).abs() < epsilon
    }
}

impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl From<glam::Quat> for Quaternion {
    fn from(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for glam::Quat {
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_turn_about_y() {
        let q = Quaternion::from_axis_angle(&Vector3::UNIT_Y, std::f32::consts::PI);
        let result = q.rotate_vector(&Vector3::UNIT_X);
        assert!(result.approx_eq(&-Vector3::UNIT_X, 1e-5));
    }

    #[test]
    fn test_identity_product() {
        let q = Quaternion::from_axis_angle(&Vector3::UNIT_Z, 0.3);
        assert!((q * Quaternion::IDENTITY).approx_eq(&q, 1e-6));
    }
}
