//! Orthographic camera.

use super::{Camera, Projection};
use crate::core::Id;
use crate::math::{Matrix4, Vector3};

/// An orthographic projection camera.
#[derive(Debug, Clone)]
pub struct OrthographicCamera {
    /// Unique ID.
    id: Id,
    /// Left plane.
    pub left: f32,
    /// Right plane.
    pub right: f32,
    /// Top plane.
    pub top: f32,
    /// Bottom plane.
    pub bottom: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Zoom level. Values above one shrink the visible extent.
    pub zoom: f32,
    /// Camera position.
    pub position: Vector3,
    /// Look-at point.
    pub target: Vector3,
    /// Up vector.
    pub up: Vector3,
}

impl OrthographicCamera {
    /// Create a new orthographic camera at (0, 0, 5) looking at the origin.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Self {
        Self {
            id: Id::new(),
            left,
            right,
            top,
            bottom,
            near,
            far,
            zoom: 1.0,
            position: Vector3::new(0.0, 0.0, 5.0),
            target: Vector3::ZERO,
            up: Vector3::UP,
        }
    }

    /// Create from width and height (centered).
    pub fn from_size(width: f32, height: f32, near: f32, far: f32) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self::new(-half_width, half_width, half_height, -half_height, near, far)
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn look_at(&mut self, target: Vector3) {
        self.target = target;
    }

    /// Set zoom level, clamped away from zero.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.001);
    }
}

impl Camera for OrthographicCamera {
    fn id(&self) -> Id {
        self.id
    }

    fn projection(&self) -> Projection {
        Projection::Orthographic
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
        let center_x = (self.left + self.right) / 2.0;
        let center_y = (self.top + self.bottom) / 2.0;
        let half_width = (self.right - self.left) / (2.0 * self.zoom);
        let half_height = (self.top - self.bottom) / (2.0 * self.zoom);

        Matrix4::orthographic(
            center_x - half_width,
            center_x + half_width,
            center_y - half_height,
            center_y + half_height,
            self.near,
            self.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_shrinks_extent() {
        let mut camera = OrthographicCamera::from_size(10.0, 10.0, 0.1, 100.0);
        let edge = Vector3::new(2.5, 0.0, 0.0);
        assert!((camera.project(&edge).x - 0.5).abs() < 1e-5);
        camera.set_zoom(2.0);
        assert!((camera.project(&edge).x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_near_plane_unprojects_in_front_of_camera() {
        let camera = OrthographicCamera::from_size(4.0, 4.0, 1.0, 50.0);
        let p = camera.unproject(&Vector3::new(0.5, -0.5, 0.0));
        assert!(p.approx_eq(&Vector3::new(1.0, -1.0, 4.0), 1e-4));
    }
}
