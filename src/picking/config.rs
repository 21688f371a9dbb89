//! Picking configuration.

use serde::{Deserialize, Serialize};

/// Tunables applied to every raycast a router performs.
///
/// Missing fields take their defaults when deserializing, so a partial
/// document such as `{ "far": 250.0 }` is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingConfig {
    /// Hits closer than this distance from the ray origin are discarded.
    pub near: f32,
    /// Hits farther than this distance from the ray origin are discarded.
    pub far: f32,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: f32::INFINITY,
        }
    }
}

impl PickingConfig {
    /// Limit hits to `[near, far]`.
    pub fn with_range(near: f32, far: f32) -> Self {
        Self { near, far }
    }
}
