//! Buffer geometry for storing vertex and index data.

use super::Vertex;
use crate::core::Id;
use crate::math::{Box3, Sphere, Triangle};

/// Vertex and optional index data, with cached bounds.
///
/// Without indices every three consecutive vertices form a triangle.
#[derive(Debug, Clone)]
pub struct BufferGeometry {
    /// Unique ID.
    id: Id,
    vertices: Vec<Vertex>,
    indices: Option<Vec<u32>>,
    /// Bounding box.
    bounding_box: Box3,
    /// Bounding sphere.
    bounding_sphere: Sphere,
}

impl Default for BufferGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferGeometry {
    /// Create a new empty buffer geometry.
    pub fn new() -> Self {
        Self {
            id: Id::new(),
            vertices: Vec::new(),
            indices: None,
            bounding_box: Box3::EMPTY,
            bounding_sphere: Sphere::EMPTY,
        }
    }

    /// Create from vertices and optional indices. Bounds are computed immediately.
    pub fn from_vertices(vertices: Vec<Vertex>, indices: Option<Vec<u32>>) -> Self {
        let mut geometry = Self::new();
        geometry.set_data(vertices, indices);
        geometry
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Replace the vertex and index data and recompute bounds.
    pub fn set_data(&mut self, vertices: Vec<Vertex>, indices: Option<Vec<u32>>) {
        self.vertices = vertices;
        self.indices = indices;
        self.compute_bounds();
    }

    /// Local-space bounding box.
    #[inline]
    pub fn bounding_box(&self) -> &Box3 {
        &self.bounding_box
    }

    /// Local-space bounding sphere.
    #[inline]
    pub fn bounding_sphere(&self) -> &Sphere {
        &self.bounding_sphere
    }

    /// Number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertices.len() / 3,
        }
    }

    /// Vertex indices of triangle `face`. `None` if out of range or if an
    /// index points past the vertex array.
    pub fn face(&self, face: usize) -> Option<[usize; 3]> {
        let base = face.checked_mul(3)?;
        let corners = match &self.indices {
            Some(indices) => {
                let tri = indices.get(base..base + 3)?;
                [tri[0] as usize, tri[1] as usize, tri[2] as usize]
            }
            None => [base, base + 1, base + 2],
        };
        if corners.iter().all(|&i| i < self.vertices.len()) {
            Some(corners)
        } else {
            None
        }
    }

    /// Local-space triangle for `face`.
    pub fn triangle(&self, face: usize) -> Option<Triangle> {
        let [a, b, c] = self.face(face)?;
        Some(Triangle::new(
            self.vertices[a].position(),
            self.vertices[b].position(),
            self.vertices[c].position(),
        ))
    }

    fn compute_bounds(&mut self) {
        let mut bbox = Box3::EMPTY;
        for vertex in &self.vertices {
            bbox.expand_by_point(&vertex.position());
        }
        self.bounding_box = bbox;
        self.bounding_sphere = Sphere::from_box3(&self.bounding_box);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    fn quad() -> BufferGeometry {
        let n = [0.0, 0.0, 1.0];
        BufferGeometry::from_vertices(
            vec![
                Vertex::new([-1.0, -1.0, 0.0], n, [0.0, 0.0]),
                Vertex::new([1.0, -1.0, 0.0], n, [1.0, 0.0]),
                Vertex::new([1.0, 1.0, 0.0], n, [1.0, 1.0]),
                Vertex::new([-1.0, 1.0, 0.0], n, [0.0, 1.0]),
            ],
            Some(vec![0, 1, 2, 0, 2, 3]),
        )
    }

    #[test]
    fn test_bounds_follow_data() {
        let geometry = quad();
        assert!(geometry.bounding_box().min.approx_eq(&Vector3::new(-1.0, -1.0, 0.0), 1e-6));
        assert!(geometry.bounding_box().max.approx_eq(&Vector3::new(1.0, 1.0, 0.0), 1e-6));
        assert!((geometry.bounding_sphere().radius - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_indexed_faces() {
        let geometry = quad();
        assert_eq!(geometry.triangle_count(), 2);
        assert_eq!(geometry.face(1), Some([0, 2, 3]));
        assert_eq!(geometry.face(2), None);
        let tri = geometry.triangle(0).unwrap();
        assert!(tri.normal().approx_eq(&Vector3::UNIT_Z, 1e-6));
    }

    #[test]
    fn test_out_of_range_index_is_skipped() {
        let n = [0.0, 0.0, 1.0];
        let geometry = BufferGeometry::from_vertices(
            vec![Vertex::new([0.0; 3], n, [0.0; 2]); 3],
            Some(vec![0, 1, 7]),
        );
        assert_eq!(geometry.triangle_count(), 1);
        assert!(geometry.triangle(0).is_none());
    }
}
