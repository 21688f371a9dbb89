//! Bounding sphere implementation.

use super::{Box3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// A sphere defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center point.
    pub center: Vector3,
    /// Radius; negative marks an empty sphere.
    pub radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Sphere {
    /// Empty sphere, contains nothing.
    pub const EMPTY: Self = Self { center: Vector3::ZERO, radius: -1.0 };

    #[inline]
    pub const fn new(center: Vector3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere centered on the box that contains it.
    pub fn from_box3(box3: &Box3) -> Self {
        if box3.is_empty() {
            return Self::EMPTY;
        }
        let center = box3.center();
        Self {
            center,
            radius: center.distance_to(&box3.max),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    /// Check if a point lies inside or on the sphere.
    #[inline]
    pub fn contains_point(&self, point: &Vector3) -> bool {
        point.distance_to_squared(&self.center) <= self.radius * self.radius
    }

    /// Transform the sphere. The radius grows by the matrix's largest axis scale.
    pub fn apply_matrix4(&self, m: &Matrix4) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            center: m.transform_point(&self.center),
            radius: self.radius * m.get_max_scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_box() {
        let s = Sphere::from_box3(&Box3::UNIT);
        assert!(s.center.approx_eq(&Vector3::ZERO, 1e-6));
        assert!((s.radius - 0.75f32.sqrt()).abs() < 1e-6);
        assert!(Sphere::from_box3(&Box3::EMPTY).is_empty());
    }

    #[test]
    fn test_scaled_transform() {
        let m = Matrix4::compose(
            &Vector3::new(0.0, 1.0, 0.0),
            &crate::math::Quaternion::IDENTITY,
            &Vector3::new(1.0, 3.0, 1.0),
        );
        let s = Sphere::new(Vector3::ZERO, 1.0).apply_matrix4(&m);
        assert!((s.radius - 3.0).abs() < 1e-6);
        assert!(s.contains_point(&Vector3::new(0.0, 3.5, 0.0)));
    }
}
