//! Pickable objects.

mod mesh;

pub use mesh::*;
