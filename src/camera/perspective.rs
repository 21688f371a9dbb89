//! Perspective camera.

use super::{Camera, Projection};
use crate::core::Id;
use crate::math::{Matrix4, Vector3};

/// A perspective projection camera that looks at a target point.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Unique ID.
    id: Id,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Camera position.
    pub position: Vector3,
    /// Look-at point.
    pub target: Vector3,
    /// Up vector.
    pub up: Vector3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(60.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    /// Create a camera at (0, 0, 5) looking at the origin.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            id: Id::new(),
            fov,
            aspect,
            near,
            far,
            position: Vector3::new(0.0, 0.0, 5.0),
            target: Vector3::ZERO,
            up: Vector3::UP,
        }
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    /// Point the camera at `target` from its current position.
    pub fn look_at(&mut self, target: Vector3) {
        self.target = target;
    }

    pub fn right(&self) -> Vector3 {
        self.forward().cross(&self.up).normalized()
    }
}

impl Camera for PerspectiveCamera {
    fn id(&self) -> Id {
        self.id
    }

    fn projection(&self) -> Projection {
        Projection::Perspective
    }

    fn position(&self) -> Vector3 {
        self.position
    }

    fn forward(&self) -> Vector3 {
        (self.target - self.position).normalized()
    }

    fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at(&self.position, &self.target, &self.up)
    }

    fn projection_matrix(&self) -> Matrix4 {
        Matrix4::perspective(self.fov.to_radians(), self.aspect, self.near, self.far)
    }
}
