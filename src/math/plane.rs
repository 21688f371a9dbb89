//! Plane implementation.

use super::Vector3;
use serde::{Deserialize, Serialize};

/// An infinite plane defined by a normal and constant.
/// The plane equation is: normal · point + constant = 0
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Plane {
    /// Normal vector of the plane (should be normalized).
    pub normal: Vector3,
    /// Signed distance term of the plane equation.
    pub constant: f32,
}

impl Plane {
    /// XY plane (normal pointing +Z).
    pub const XY: Self = Self { normal: Vector3::UNIT_Z, constant: 0.0 };
    /// XZ plane (normal pointing +Y), the usual ground plane.
    pub const XZ: Self = Self { normal: Vector3::UNIT_Y, constant: 0.0 };

    #[inline]
    pub const fn new(normal: Vector3, constant: f32) -> Self {
        Self { normal, constant }
    }

    /// Create a plane from normal and a point on the plane.
    #[inline]
    pub fn from_normal_and_point(normal: Vector3, point: &Vector3) -> Self {
        let n = normal.normalized();
        Self {
            normal: n,
            constant: -point.dot(&n),
        }
    }

    /// Signed distance from the plane to a point.
    #[inline]
    pub fn distance_to_point(&self, point: &Vector3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}
