//! Triangle implementation.

use super::Vector3;
use serde::{Deserialize, Serialize};

/// A triangle defined by three vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex.
    pub a: Vector3,
    /// Second vertex.
    pub b: Vector3,
    /// Third vertex.
    pub c: Vector3,
}

impl Triangle {
    #[inline]
    pub const fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    /// Same triangle with the opposite winding.
    #[inline]
    pub const fn flipped(&self) -> Self {
        Self { a: self.a, b: self.c, c: self.b }
    }

    /// Unit normal following the counter-clockwise winding `a -> b -> c`.
    pub fn normal(&self) -> Vector3 {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac).normalized()
    }

    /// Point at barycentric weights (`1 - u - v`, `u`, `v`).
    #[inline]
    pub fn point_at(&self, u: f32, v: f32) -> Vector3 {
        self.a * (1.0 - u - v) + self.b * u + self.c * v
    }
}
