//! Ray implementation for raycasting.

use super::consts::PARALLEL_EPSILON;
use super::{Box3, Matrix4, Plane, Sphere, Triangle, Vector3};
use serde::{Deserialize, Serialize};

/// A ray with an origin and direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Vector3,
    /// Direction of the ray (should be normalized).
    pub direction: Vector3,
}

/// Result of a ray/triangle test.
///
/// `u` and `v` are the barycentric weights of the triangle's `b` and `c`
/// vertices; the weight of `a` is `1 - u - v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Parametric distance along the ray.
    pub distance: f32,
    /// Weight of vertex `b`.
    pub u: f32,
    /// Weight of vertex `c`.
    pub v: f32,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub const fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Get a point at distance t along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vector3 {
        self.origin + self.direction * t
    }

    /// True when both origin and direction are finite and the direction is non-zero.
    pub fn is_valid(&self) -> bool {
        self.origin.is_finite() && self.direction.is_finite() && self.direction.length_squared() > 0.0
    }

    /// Distance from the ray origin to a plane, or `None` if the ray is parallel
    /// to it or points away from it.
    pub fn distance_to_plane(&self, plane: &Plane) -> Option<f32> {
        let denom = plane.normal.dot(&self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return if plane.distance_to_point(&self.origin).abs() < PARALLEL_EPSILON {
                Some(0.0)
            } else {
                None
            };
        }
        let t = -(self.origin.dot(&plane.normal) + plane.constant) / denom;
        if t >= 0.0 { Some(t) } else { None }
    }

    /// Intersect with a plane.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vector3> {
        self.distance_to_plane(plane).map(|t| self.at(t))
    }

    /// Distance to the first sphere intersection in front of the origin.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<f32> {
        let oc = self.origin - sphere.center;
        let b = oc.dot(&self.direction);
        let c = oc.length_squared() - sphere.radius * sphere.radius;

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = -b - sqrt_discriminant;
        let t2 = -b + sqrt_discriminant;

        if t1 >= 0.0 {
            Some(t1)
        } else if t2 >= 0.0 {
            Some(t2)
        } else {
            None
        }
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.intersect_sphere(sphere).is_some()
    }

    /// Slab test against an axis-aligned box.
    /// Returns (tmin, tmax) with tmin clamped to zero when the origin is inside.
    pub fn intersect_box(&self, box3: &Box3) -> Option<(f32, f32)> {
        if box3.is_empty() {
            return None;
        }

        let inv_dir = Vector3::new(
            1.0 / self.direction.x,
            1.0 / self.direction.y,
            1.0 / self.direction.z,
        );

        let t1 = (box3.min.x - self.origin.x) * inv_dir.x;
        let t2 = (box3.max.x - self.origin.x) * inv_dir.x;
        let t3 = (box3.min.y - self.origin.y) * inv_dir.y;
        let t4 = (box3.max.y - self.origin.y) * inv_dir.y;
        let t5 = (box3.min.z - self.origin.z) * inv_dir.z;
        let t6 = (box3.max.z - self.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        if tmax < 0.0 || tmin > tmax {
            None
        } else {
            Some((tmin.max(0.0), tmax))
        }
    }

    pub fn intersects_box(&self, box3: &Box3) -> bool {
        self.intersect_box(box3).is_some()
    }

    /// Möller–Trumbore ray/triangle intersection.
    ///
    /// With `backface_culling`, only triangles wound counter-clockwise as seen
    /// from the ray origin are hit.
    pub fn intersect_triangle(&self, triangle: &Triangle, backface_culling: bool) -> Option<TriangleHit> {
        let edge1 = triangle.b - triangle.a;
        let edge2 = triangle.c - triangle.a;
        let h = self.direction.cross(&edge2);
        let a = edge1.dot(&h);

        if backface_culling {
            if a < PARALLEL_EPSILON {
                return None;
            }
        } else if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = self.origin - triangle.a;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * self.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t > PARALLEL_EPSILON {
            Some(TriangleHit { distance: t, u, v })
        } else {
            None
        }
    }

    /// Apply a Matrix4 transformation to this ray. The direction is renormalized.
    pub fn apply_matrix4(&self, m: &Matrix4) -> Self {
        Self {
            origin: m.transform_point(&self.origin),
            direction: m.transform_direction(&self.direction).normalized(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_triangle() -> Triangle {
        // Counter-clockwise when viewed from +Z.
        Triangle::new(
            Vector3::new(-1.0, -1.0, 0.0),
            Vector3::new(1.0, -1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_sphere_intersection() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::UNIT_Z);
        let t = ray.intersect_sphere(&Sphere::new(Vector3::ZERO, 1.0));
        assert!((t.unwrap() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_box_behind_origin_is_missed() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::UNIT_Z);
        assert!(!ray.intersects_box(&Box3::UNIT));
        let toward = Ray::new(Vector3::new(0.0, 0.0, 5.0), -Vector3::UNIT_Z);
        let (tmin, tmax) = toward.intersect_box(&Box3::UNIT).unwrap();
        assert!((tmin - 4.5).abs() < 1e-6);
        assert!((tmax - 5.5).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_front_and_back() {
        let tri = facing_triangle();
        let from_front = Ray::new(Vector3::new(0.0, 0.0, 3.0), -Vector3::UNIT_Z);
        let hit = from_front.intersect_triangle(&tri, true).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-6);

        let from_back = Ray::new(Vector3::new(0.0, 0.0, -3.0), Vector3::UNIT_Z);
        assert!(from_back.intersect_triangle(&tri, true).is_none());
        assert!(from_back.intersect_triangle(&tri, false).is_some());
    }

    #[test]
    fn test_plane_intersection() {
        let ray = Ray::new(Vector3::new(0.0, 2.0, 0.0), -Vector3::UNIT_Y);
        let p = ray.intersect_plane(&Plane::XZ).unwrap();
        assert!(p.approx_eq(&Vector3::ZERO, 1e-6));
        let parallel = Ray::new(Vector3::new(0.0, 2.0, 0.0), Vector3::UNIT_X);
        assert!(parallel.intersect_plane(&Plane::XZ).is_none());
    }
}
