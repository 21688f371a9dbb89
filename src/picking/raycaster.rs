//! Raycaster: builds picking rays and collects intersections.

use super::{Intersection, ObjectHandle, PickingConfig, RaycastHit};
use crate::camera::{Camera, Projection};
use crate::math::{Ray, Vector2, Vector3};

/// Casts a ray into a set of objects.
///
/// Configure the ray with [`set_from_camera`](Self::set_from_camera), then
/// query with [`intersect_objects`](Self::intersect_objects).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raycaster {
    /// The ray being cast, world space.
    pub ray: Ray,
    /// Minimum hit distance.
    pub near: f32,
    /// Maximum hit distance.
    pub far: f32,
}

impl Default for Raycaster {
    fn default() -> Self {
        Self::from_config(&PickingConfig::default())
    }
}

impl Raycaster {
    /// Create a raycaster for a given ray and distance range.
    pub fn new(ray: Ray, near: f32, far: f32) -> Self {
        Self { ray, near, far }
    }

    /// Create a raycaster with the configured range and a placeholder ray along -Z.
    pub fn from_config(config: &PickingConfig) -> Self {
        Self::new(Ray::new(Vector3::ZERO, Vector3::FORWARD), config.near, config.far)
    }

    /// True if `distance` lies within `[near, far]`.
    #[inline]
    pub fn in_range(&self, distance: f32) -> bool {
        distance >= self.near && distance <= self.far
    }

    /// Aim the ray from `camera` through `coords`, given in normalized device
    /// coordinates (`-1..=1` on both axes, +Y up).
    ///
    /// Perspective cameras cast from their position. Orthographic cameras cast
    /// from the near plane along their viewing direction.
    pub fn set_from_camera(&mut self, coords: &Vector2, camera: &dyn Camera) {
        match camera.projection() {
            Projection::Perspective => {
                let origin = camera.position();
                let through = camera.unproject(&Vector3::from_vec2(*coords, 0.5));
                self.ray = Ray::new(origin, (through - origin).normalized());
            }
            Projection::Orthographic => {
                let origin = camera.unproject(&Vector3::from_vec2(*coords, 0.0));
                self.ray = Ray::new(origin, camera.forward());
            }
        }
    }

    /// Intersect a single object. Results are sorted nearest first.
    pub fn intersect_object(&self, object: &ObjectHandle) -> Vec<Intersection> {
        let mut intersections = Vec::new();
        self.collect(object, &mut intersections);
        sort_by_distance(&mut intersections);
        intersections
    }

    /// Intersect every object in `objects`. Results are sorted nearest first;
    /// equal distances keep the order of `objects`.
    pub fn intersect_objects(&self, objects: &[ObjectHandle]) -> Vec<Intersection> {
        let mut intersections = Vec::new();
        if !self.ray.is_valid() {
            log::trace!("skipping raycast with degenerate ray {:?}", self.ray);
            return intersections;
        }
        for object in objects {
            self.collect(object, &mut intersections);
        }
        sort_by_distance(&mut intersections);
        intersections
    }

    fn collect(&self, object: &ObjectHandle, out: &mut Vec<Intersection>) {
        let Ok(target) = object.try_borrow() else {
            log::warn!("raycast target is mutably borrowed; skipping it");
            return;
        };

        let mut hits: Vec<RaycastHit> = Vec::new();
        target.raycast(self, &mut hits);
        let id = target.id();
        drop(target);

        out.extend(
            hits.into_iter()
                .filter(|hit| self.in_range(hit.distance))
                .map(|hit| Intersection::new(hit, id, object.clone())),
        );
    }
}

fn sort_by_distance(intersections: &mut [Intersection]) {
    intersections.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}
