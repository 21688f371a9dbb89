//! Plane geometry.

use super::{BufferGeometry, Vertex};

/// A flat rectangle in the XZ plane, facing +Y. Handy as a pickable ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneGeometry {
    /// Extent along X.
    pub width: f32,
    /// Extent along Z.
    pub height: f32,
    /// Width segments.
    pub width_segments: u32,
    /// Height segments.
    pub height_segments: u32,
}

impl Default for PlaneGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_segments(width, height, 1, 1)
    }

    /// Create with segments. Segment counts are clamped to at least one.
    pub fn with_segments(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            width,
            height,
            width_segments: width_segments.max(1),
            height_segments: height_segments.max(1),
        }
    }

    /// Build the indexed geometry.
    pub fn build(&self) -> BufferGeometry {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;

        let segment_width = self.width / self.width_segments as f32;
        let segment_height = self.height / self.height_segments as f32;

        let normal = [0.0, 1.0, 0.0];

        for iy in 0..=self.height_segments {
            let y = iy as f32 * segment_height - half_height;

            for ix in 0..=self.width_segments {
                let x = ix as f32 * segment_width - half_width;

                let position = [x, 0.0, -y];
                let uv = [
                    ix as f32 / self.width_segments as f32,
                    iy as f32 / self.height_segments as f32,
                ];

                vertices.push(Vertex::new(position, normal, uv));
            }
        }

        let row = self.width_segments + 1;
        for iy in 0..self.height_segments {
            for ix in 0..self.width_segments {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = (ix + 1) + row * (iy + 1);
                let d = (ix + 1) + row * iy;

                // Rows advance toward -Z, so (a, d, b) is counter-clockwise from above.
                indices.extend_from_slice(&[a, d, b, b, d, c]);
            }
        }

        BufferGeometry::from_vertices(vertices, Some(indices))
    }
}
