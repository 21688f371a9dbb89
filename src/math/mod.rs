//! # Math Module
//!
//! The subset of 3D math the picking layer needs: vectors, a quaternion for mesh
//! orientation, 4x4 matrices, and the geometric primitives rays are tested against.
//!
//! Matrix and quaternion algebra is delegated to `glam`; the types here keep a
//! Three.js-like surface on top of it.

mod vector2;
mod vector3;
mod quaternion;
mod matrix4;
mod ray;
mod plane;
mod sphere;
mod box3;
mod triangle;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use quaternion::Quaternion;
pub use matrix4::Matrix4;
pub use ray::{Ray, TriangleHit};
pub use plane::Plane;
pub use sphere::Sphere;
pub use box3::Box3;
pub use triangle::Triangle;

/// Common math constants.
pub mod consts {
    /// Determinant threshold below which a ray is treated as parallel to a triangle.
    pub const PARALLEL_EPSILON: f32 = 1e-8;
}
