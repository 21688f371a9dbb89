//! Vertex layout shared by all built-in geometries.

use crate::math::{Vector2, Vector3};

/// Standard vertex with position, normal, and UV coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local space.
    pub position: [f32; 3],
    /// Normal vector.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex.
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    #[inline]
    pub fn position(&self) -> Vector3 {
        Vector3::from_array(self.position)
    }

    #[inline]
    pub fn uv(&self) -> Vector2 {
        Vector2::from_array(self.uv)
    }
}
