//! # Core Module
//!
//! Identity shared by cameras, meshes and geometries.

mod id;

pub use id::Id;
