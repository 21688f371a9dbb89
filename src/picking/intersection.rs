//! Intersection records and the trait pickable objects implement.

use super::Raycaster;
use crate::core::Id;
use crate::math::{Vector2, Vector3};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a pickable object.
///
/// Target lists are captured by long-lived listeners while the application
/// keeps moving the same objects around, so both sides hold an `Rc`.
pub type ObjectHandle = Rc<RefCell<dyn Raycast>>;

/// Something a ray can hit.
pub trait Raycast {
    /// Stable identity reported in every [`Intersection`] with this object.
    fn id(&self) -> Id;

    /// Append this object's hits for `raycaster`'s ray to `hits`.
    ///
    /// Implementations report world-space distances and points and must drop
    /// hits outside the raycaster's `[near, far]` range. Order does not matter.
    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<RaycastHit>);
}

/// A single hit reported by a [`Raycast`] implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Distance from the ray origin, world space.
    pub distance: f32,
    /// Hit point, world space.
    pub point: Vector3,
    /// Index of the triangle that was hit, for triangle geometry.
    pub face_index: Option<usize>,
    /// World-space normal of the hit face.
    pub normal: Option<Vector3>,
    /// Interpolated texture coordinate at the hit point.
    pub uv: Option<Vector2>,
}

/// A hit together with the object it belongs to.
#[derive(Clone)]
pub struct Intersection {
    /// Distance from the ray origin, world space.
    pub distance: f32,
    /// Hit point, world space.
    pub point: Vector3,
    /// Index of the triangle that was hit.
    pub face_index: Option<usize>,
    /// World-space normal of the hit face.
    pub normal: Option<Vector3>,
    /// Interpolated texture coordinate at the hit point.
    pub uv: Option<Vector2>,
    /// Id of the hit object.
    pub object_id: Id,
    /// The hit object.
    pub object: ObjectHandle,
}

impl Intersection {
    pub(crate) fn new(hit: RaycastHit, object_id: Id, object: ObjectHandle) -> Self {
        Self {
            distance: hit.distance,
            point: hit.point,
            face_index: hit.face_index,
            normal: hit.normal,
            uv: hit.uv,
            object_id,
            object,
        }
    }

    /// True if this intersection belongs to `object`.
    pub fn is_object(&self, object: &ObjectHandle) -> bool {
        Rc::ptr_eq(&self.object, object)
    }
}

impl fmt::Debug for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("distance", &self.distance)
            .field("point", &self.point)
            .field("face_index", &self.face_index)
            .field("normal", &self.normal)
            .field("uv", &self.uv)
            .field("object_id", &self.object_id)
            .finish()
    }
}
