//! Mesh object combining geometry and a transform.

use crate::core::Id;
use crate::geometry::BufferGeometry;
use crate::math::{Matrix4, Quaternion, Ray, Triangle, TriangleHit, Vector2, Vector3};
use crate::picking::{ObjectHandle, Raycast, RaycastHit, Raycaster};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Which triangle faces a ray can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Faces wound counter-clockwise toward the viewer.
    #[default]
    Front,
    /// Faces wound clockwise toward the viewer.
    Back,
    /// Both.
    Double,
}

/// A pickable mesh: shared geometry placed in the world by a transform.
pub struct Mesh {
    /// Unique identifier.
    id: Id,
    /// Object name.
    name: String,
    /// Geometry data.
    geometry: Arc<BufferGeometry>,
    /// Local position.
    pub position: Vector3,
    /// Local rotation.
    pub rotation: Quaternion,
    /// Local scale.
    pub scale: Vector3,
    /// World matrix of the parent, identity for root objects.
    parent_matrix: Matrix4,
    /// Invisible meshes are never hit.
    pub visible: bool,
    /// Faces considered by raycasts.
    pub side: Side,
}

impl Mesh {
    /// Create a new mesh with geometry.
    pub fn new(geometry: Arc<BufferGeometry>) -> Self {
        Self {
            id: Id::new(),
            name: String::new(),
            geometry,
            position: Vector3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vector3::ONE,
            parent_matrix: Matrix4::IDENTITY,
            visible: true,
            side: Side::Front,
        }
    }

    /// Wrap the mesh in a shared handle for use as a raycast target.
    pub fn into_handle(self) -> Rc<RefCell<Mesh>> {
        Rc::new(RefCell::new(self))
    }

    /// Same as [`into_handle`](Self::into_handle), erased to [`ObjectHandle`].
    pub fn into_object(self) -> ObjectHandle {
        self.into_handle()
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Builder-style name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn geometry(&self) -> &BufferGeometry {
        &self.geometry
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vector3::new(x, y, z);
    }

    /// Rotate around an axis (radians), on top of the current rotation.
    pub fn rotate_on_axis(&mut self, axis: &Vector3, angle: f32) {
        self.rotation = self.rotation * Quaternion::from_axis_angle(axis, angle);
    }

    /// Place the mesh under a parent whose world matrix is `parent_world`.
    pub fn set_parent_matrix(&mut self, parent_world: Matrix4) {
        self.parent_matrix = parent_world;
    }

    /// Local matrix from position, rotation and scale.
    pub fn local_matrix(&self) -> Matrix4 {
        Matrix4::compose(&self.position, &self.rotation, &self.scale)
    }

    /// World matrix: parent matrix times local matrix.
    pub fn world_matrix(&self) -> Matrix4 {
        self.parent_matrix * self.local_matrix()
    }

    fn hit_triangle(&self, local_ray: &Ray, triangle: &Triangle) -> Option<TriangleHit> {
        match self.side {
            Side::Front => local_ray.intersect_triangle(triangle, true),
            Side::Double => local_ray.intersect_triangle(triangle, false),
            Side::Back => local_ray
                .intersect_triangle(&triangle.flipped(), true)
                .map(|hit| TriangleHit { u: hit.v, v: hit.u, ..hit }),
        }
    }
}

impl Raycast for Mesh {
    fn id(&self) -> Id {
        self.id
    }

    fn raycast(&self, raycaster: &Raycaster, hits: &mut Vec<RaycastHit>) {
        if !self.visible || self.geometry.triangle_count() == 0 {
            return;
        }

        let world = self.world_matrix();
        // A collapsed transform (zero scale on any axis) has no inverse and no surface.
        let determinant = world.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return;
        }

        let sphere = self.geometry.bounding_sphere().apply_matrix4(&world);
        if sphere.is_empty() || !raycaster.ray.intersects_sphere(&sphere) {
            return;
        }

        let local_ray = raycaster.ray.apply_matrix4(&world.inverse());
        if !local_ray.intersects_box(self.geometry.bounding_box()) {
            return;
        }

        let vertices = self.geometry.vertices();
        for face in 0..self.geometry.triangle_count() {
            let (Some(corners), Some(triangle)) = (self.geometry.face(face), self.geometry.triangle(face)) else {
                continue;
            };
            let Some(hit) = self.hit_triangle(&local_ray, &triangle) else {
                continue;
            };

            let point = world.transform_point(&triangle.point_at(hit.u, hit.v));
            let distance = raycaster.ray.origin.distance_to(&point);
            if !raycaster.in_range(distance) {
                continue;
            }

            let [a, b, c] = corners.map(|i| vertices[i].uv());
            let w = 1.0 - hit.u - hit.v;
            let uv = Vector2::new(
                a.x * w + b.x * hit.u + c.x * hit.v,
                a.y * w + b.y * hit.u + c.y * hit.v,
            );

            hits.push(RaycastHit {
                distance,
                point,
                face_index: Some(face),
                normal: Some(world.transform_normal(&triangle.normal())),
                uv: Some(uv),
            });
        }
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("visible", &self.visible)
            .field("side", &self.side)
            .field("position", &self.position)
            .finish()
    }
}
