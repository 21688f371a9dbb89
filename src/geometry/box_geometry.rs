//! Box geometry (rectangular cuboid).

use super::{BufferGeometry, Vertex};

/// A box (rectangular cuboid) geometry centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    /// Width (X axis).
    pub width: f32,
    /// Height (Y axis).
    pub height: f32,
    /// Depth (Z axis).
    pub depth: f32,
    /// Width segments.
    pub width_segments: u32,
    /// Height segments.
    pub height_segments: u32,
    /// Depth segments.
    pub depth_segments: u32,
}

/// One face of the box: which vertex components the face's grid spans, and
/// where it sits on the remaining axis.
struct Face {
    u: usize,
    v: usize,
    w: usize,
    u_dir: f32,
    v_dir: f32,
    width: f32,
    height: f32,
    grid_x: u32,
    grid_y: u32,
    offset: f32,
    normal: [f32; 3],
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl BoxGeometry {
    /// Create a new box geometry with one segment per side.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self::with_segments(width, height, depth, 1, 1, 1)
    }

    /// Create with segments. Segment counts are clamped to at least one.
    pub fn with_segments(
        width: f32,
        height: f32,
        depth: f32,
        width_segments: u32,
        height_segments: u32,
        depth_segments: u32,
    ) -> Self {
        Self {
            width,
            height,
            depth,
            width_segments: width_segments.max(1),
            height_segments: height_segments.max(1),
            depth_segments: depth_segments.max(1),
        }
    }

    /// Build the indexed geometry. Faces wind counter-clockwise seen from outside.
    pub fn build(&self) -> BufferGeometry {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        let (w, h, d) = (self.width, self.height, self.depth);
        let (ws, hs, ds) = (self.width_segments, self.height_segments, self.depth_segments);

        let faces = [
            // +X
            Face { u: 2, v: 1, w: 0, u_dir: -1.0, v_dir: -1.0, width: d, height: h, grid_x: ds, grid_y: hs, offset: w / 2.0, normal: [1.0, 0.0, 0.0] },
            // -X
            Face { u: 2, v: 1, w: 0, u_dir: 1.0, v_dir: -1.0, width: d, height: h, grid_x: ds, grid_y: hs, offset: -w / 2.0, normal: [-1.0, 0.0, 0.0] },
            // +Y
            Face { u: 0, v: 2, w: 1, u_dir: 1.0, v_dir: 1.0, width: w, height: d, grid_x: ws, grid_y: ds, offset: h / 2.0, normal: [0.0, 1.0, 0.0] },
            // -Y
            Face { u: 0, v: 2, w: 1, u_dir: 1.0, v_dir: -1.0, width: w, height: d, grid_x: ws, grid_y: ds, offset: -h / 2.0, normal: [0.0, -1.0, 0.0] },
            // +Z
            Face { u: 0, v: 1, w: 2, u_dir: 1.0, v_dir: -1.0, width: w, height: h, grid_x: ws, grid_y: hs, offset: d / 2.0, normal: [0.0, 0.0, 1.0] },
            // -Z
            Face { u: 0, v: 1, w: 2, u_dir: -1.0, v_dir: -1.0, width: w, height: h, grid_x: ws, grid_y: hs, offset: -d / 2.0, normal: [0.0, 0.0, -1.0] },
        ];

        for face in &faces {
            push_face(face, &mut vertices, &mut indices);
        }

        BufferGeometry::from_vertices(vertices, Some(indices))
    }
}

fn push_face(face: &Face, vertices: &mut Vec<Vertex>, indices: &mut Vec<u32>) {
    let segment_width = face.width / face.grid_x as f32;
    let segment_height = face.height / face.grid_y as f32;
    let half_width = face.width / 2.0;
    let half_height = face.height / 2.0;

    let vertex_offset = vertices.len() as u32;

    for iy in 0..=face.grid_y {
        let y = (iy as f32 * segment_height - half_height) * face.v_dir;

        for ix in 0..=face.grid_x {
            let x = (ix as f32 * segment_width - half_width) * face.u_dir;

            let mut position = [0.0f32; 3];
            position[face.u] = x;
            position[face.v] = y;
            position[face.w] = face.offset;

            let uv = [
                ix as f32 / face.grid_x as f32,
                1.0 - iy as f32 / face.grid_y as f32,
            ];

            vertices.push(Vertex::new(position, face.normal, uv));
        }
    }

    let row = face.grid_x + 1;
    for iy in 0..face.grid_y {
        for ix in 0..face.grid_x {
            let a = vertex_offset + ix + row * iy;
            let b = vertex_offset + ix + row * (iy + 1);
            let c = vertex_offset + (ix + 1) + row * (iy + 1);
            let d = vertex_offset + (ix + 1) + row * iy;

            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    #[test]
    fn test_counts() {
        let geometry = BoxGeometry::new(1.0, 2.0, 3.0).build();
        assert_eq!(geometry.vertices().len(), 24);
        assert_eq!(geometry.triangle_count(), 12);

        let segmented = BoxGeometry::with_segments(1.0, 1.0, 1.0, 2, 2, 2).build();
        assert_eq!(segmented.triangle_count(), 48);
    }

    #[test]
    fn test_bounds() {
        let geometry = BoxGeometry::new(1.0, 2.0, 3.0).build();
        assert!(geometry.bounding_box().min.approx_eq(&Vector3::new(-0.5, -1.0, -1.5), 1e-6));
        assert!(geometry.bounding_box().max.approx_eq(&Vector3::new(0.5, 1.0, 1.5), 1e-6));
    }

    #[test]
    fn test_faces_wind_outward() {
        let geometry = BoxGeometry::default().build();
        for face in 0..geometry.triangle_count() {
            let tri = geometry.triangle(face).unwrap();
            let [a, _, _] = geometry.face(face).unwrap();
            let stored = Vector3::from_array(geometry.vertices()[a].normal);
            assert!(tri.normal().approx_eq(&stored, 1e-5), "face {face} winds inward");
        }
    }
}
