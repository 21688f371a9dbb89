//! Geometry module: CPU-side vertex data that rays are tested against.

mod buffer_geometry;
mod box_geometry;
mod plane_geometry;
mod vertex;

pub use buffer_geometry::BufferGeometry;
pub use box_geometry::BoxGeometry;
pub use plane_geometry::PlaneGeometry;
pub use vertex::Vertex;
