//! Camera module for view and projection.
//!
//! Picking only needs a camera's matrices and its position, so both camera
//! kinds are exposed through the object-safe [`Camera`] trait.

mod orthographic;
mod perspective;

pub use orthographic::OrthographicCamera;
pub use perspective::PerspectiveCamera;

use crate::core::Id;
use crate::math::{Matrix4, Vector3};

/// Projection model of a camera. Decides how picking rays are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Rays fan out from the camera position.
    Perspective,
    /// Rays are parallel to the viewing direction.
    Orthographic,
}

/// A projection-capable camera.
pub trait Camera {
    /// Unique ID.
    fn id(&self) -> Id;

    /// Projection model.
    fn projection(&self) -> Projection;

    /// Camera position in world space.
    fn position(&self) -> Vector3;

    /// Unit viewing direction in world space.
    fn forward(&self) -> Vector3;

    /// World-to-view matrix.
    fn view_matrix(&self) -> Matrix4;

    /// View-to-clip matrix.
    fn projection_matrix(&self) -> Matrix4;

    /// Combined `projection * view`.
    fn view_projection_matrix(&self) -> Matrix4 {
        self.projection_matrix().multiply(&self.view_matrix())
    }

    /// Map a point from normalized device coordinates (depth in `[0, 1]`) back to world space.
    fn unproject(&self, ndc: &Vector3) -> Vector3 {
        self.view_projection_matrix().inverse().transform_point(ndc)
    }

    /// Map a world-space point to normalized device coordinates.
    fn project(&self, point: &Vector3) -> Vector3 {
        self.view_projection_matrix().transform_point(point)
    }
}
