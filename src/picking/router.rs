//! Routes pointer events on a surface into raycasts against a camera.

use super::{
    client_to_ndc, EventSurface, HandlerFingerprint, Intersection, ObjectHandle, PickingConfig,
    PickingError, PointerEventKind, PointerInput, Raycaster, SurfaceCallback,
};
use crate::camera::Camera;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Camera shared between the application and a router.
pub type SharedCamera = Rc<RefCell<dyn Camera>>;

/// Identity of an installed listener within its event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKey {
    /// Minted by [`PointerRaycastRouter::on`]; never reused by a router.
    Token(u64),
    /// Derived from a caller-chosen tag by [`PointerRaycastRouter::on_tagged`].
    Fingerprint(HandlerFingerprint),
}

/// Handle to a listener installed by a router. Pass it to
/// [`PointerRaycastRouter::off`] to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle {
    kind: PointerEventKind,
    key: ListenerKey,
}

impl ListenerHandle {
    /// Handle for the listener installed by `on_tagged(kind, tag, ..)`.
    pub fn tagged(kind: PointerEventKind, tag: &str) -> Self {
        Self {
            kind,
            key: ListenerKey::Fingerprint(HandlerFingerprint::of(tag)),
        }
    }

    #[inline]
    pub fn kind(&self) -> PointerEventKind {
        self.kind
    }

    #[inline]
    pub fn key(&self) -> ListenerKey {
        self.key
    }
}

/// Binds pointer events on an [`EventSurface`] to picking against a camera.
///
/// Each listener installed with [`on`](Self::on) maps the event's client
/// position to NDC, casts a ray from the camera through it, intersects the
/// listener's targets and calls the handler with the event, the
/// intersections (nearest first) and whether anything was hit.
///
/// Dropping the router leaves its listeners installed on the surface. Call
/// [`clear`](Self::clear) first to detach them.
///
/// # Example
///
/// ```
/// use ren_picking::prelude::*;
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use std::sync::Arc;
///
/// let surface: Rc<VirtualSurface> = Rc::new(VirtualSurface::new(800.0, 600.0));
/// let camera: SharedCamera = Rc::new(RefCell::new(PerspectiveCamera::new(45.0, 800.0 / 600.0, 0.1, 100.0)));
/// let mut router = PointerRaycastRouter::new(camera, Rc::clone(&surface));
///
/// let cube = Mesh::new(Arc::new(BoxGeometry::default().build())).into_object();
/// let handle = router
///     .on(PointerEventKind::PointerDown, vec![cube], |_event, hits, hit| {
///         println!("hit: {hit}, {} intersections", hits.len());
///     })
///     .unwrap();
///
/// surface.dispatch(PointerEventKind::PointerDown, &PointerSample::new(400.0, 300.0));
/// router.off(handle);
/// ```
pub struct PointerRaycastRouter<S: EventSurface> {
    camera: SharedCamera,
    surface: Rc<S>,
    config: PickingConfig,
    registry: HashMap<PointerEventKind, HashMap<ListenerKey, S::Listener>>,
    next_token: u64,
}

impl<S: EventSurface + 'static> PointerRaycastRouter<S> {
    /// Create a router with the default [`PickingConfig`].
    pub fn new(camera: SharedCamera, surface: Rc<S>) -> Self {
        Self::with_config(camera, surface, PickingConfig::default())
    }

    pub fn with_config(camera: SharedCamera, surface: Rc<S>, config: PickingConfig) -> Self {
        Self {
            camera,
            surface,
            config,
            registry: HashMap::new(),
            next_token: 0,
        }
    }

    /// Call `handler` with the pick result of every `kind` event on the
    /// surface, testing `targets` in order.
    ///
    /// The listener is subscribed immediately. Every call installs a new
    /// listener, even for a handler that is already installed.
    pub fn on<F>(
        &mut self,
        kind: PointerEventKind,
        targets: Vec<ObjectHandle>,
        handler: F,
    ) -> Result<ListenerHandle, PickingError>
    where
        F: FnMut(&S::Event, &[Intersection], bool) + 'static,
    {
        let key = ListenerKey::Token(self.next_token);
        self.next_token += 1;
        self.install(kind, key, targets, handler)
    }

    /// Like [`on`](Self::on), but keyed by `tag`. Installing a second listener
    /// with the same kind and tag detaches the first.
    pub fn on_tagged<F>(
        &mut self,
        kind: PointerEventKind,
        tag: &str,
        targets: Vec<ObjectHandle>,
        handler: F,
    ) -> Result<ListenerHandle, PickingError>
    where
        F: FnMut(&S::Event, &[Intersection], bool) + 'static,
    {
        let handle = ListenerHandle::tagged(kind, tag);
        if let Some(previous) = self.take(&handle) {
            self.surface.remove_listener(kind, previous);
            log::debug!("replacing {} listener tagged {:?}", kind, tag);
        }
        self.install(kind, handle.key, targets, handler)
    }

    /// Remove the listener behind `handle`. Returns `false` if nothing was
    /// installed under it.
    pub fn off(&mut self, handle: ListenerHandle) -> bool {
        match self.take(&handle) {
            Some(listener) => {
                self.surface.remove_listener(handle.kind, listener);
                log::debug!("removed {} listener {:?}", handle.kind, handle.key);
                true
            }
            None => false,
        }
    }

    /// Remove the listener installed by `on_tagged(kind, tag, ..)`.
    pub fn off_tagged(&mut self, kind: PointerEventKind, tag: &str) -> bool {
        self.off(ListenerHandle::tagged(kind, tag))
    }

    /// Detach every listener this router installed. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let mut removed = 0;
        for (kind, slots) in &mut self.registry {
            for (_, listener) in slots.drain() {
                self.surface.remove_listener(*kind, listener);
                removed += 1;
            }
        }
        if removed > 0 {
            log::debug!("cleared {} pointer listeners", removed);
        }
        removed
    }

    /// Pick at a client position without an event.
    pub fn pick(&self, client_x: f32, client_y: f32, targets: &[ObjectHandle]) -> Vec<Intersection> {
        pick_at(&self.camera, &*self.surface, &self.config, client_x, client_y, targets)
    }

    /// Number of listeners this router has installed for `kind`.
    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.registry.get(&kind).map_or(0, HashMap::len)
    }

    pub fn is_installed(&self, handle: &ListenerHandle) -> bool {
        self.registry
            .get(&handle.kind)
            .is_some_and(|slots| slots.contains_key(&handle.key))
    }

    #[inline]
    pub fn camera(&self) -> &SharedCamera {
        &self.camera
    }

    #[inline]
    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    #[inline]
    pub fn config(&self) -> &PickingConfig {
        &self.config
    }

    /// Change the pick range. Applies to listeners installed afterwards.
    pub fn set_config(&mut self, config: PickingConfig) {
        self.config = config;
    }

    fn take(&mut self, handle: &ListenerHandle) -> Option<S::Listener> {
        self.registry.get_mut(&handle.kind)?.remove(&handle.key)
    }

    fn install<F>(
        &mut self,
        kind: PointerEventKind,
        key: ListenerKey,
        targets: Vec<ObjectHandle>,
        mut handler: F,
    ) -> Result<ListenerHandle, PickingError>
    where
        F: FnMut(&S::Event, &[Intersection], bool) + 'static,
    {
        let camera = Rc::clone(&self.camera);
        let surface = Rc::downgrade(&self.surface);
        let config = self.config;

        let callback: SurfaceCallback<S::Event> = Box::new(move |event: &S::Event| {
            let Some(surface) = surface.upgrade() else {
                return;
            };
            let hits = pick_at(
                &camera,
                &*surface,
                &config,
                event.client_x(),
                event.client_y(),
                &targets,
            );
            log::trace!("{}: {} intersections", kind, hits.len());
            handler(event, &hits, !hits.is_empty());
        });

        let listener = self.surface.add_listener(kind, callback)?;
        self.registry.entry(kind).or_default().insert(key, listener);
        log::debug!("installed {} listener {:?}", kind, key);

        Ok(ListenerHandle { kind, key })
    }
}

impl<S: EventSurface> fmt::Debug for PointerRaycastRouter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let installed: usize = self.registry.values().map(HashMap::len).sum();
        f.debug_struct("PointerRaycastRouter")
            .field("config", &self.config)
            .field("installed", &installed)
            .finish()
    }
}

fn pick_at<S: EventSurface + ?Sized>(
    camera: &RefCell<dyn Camera>,
    surface: &S,
    config: &PickingConfig,
    client_x: f32,
    client_y: f32,
    targets: &[ObjectHandle],
) -> Vec<Intersection> {
    let Some(ndc) = client_to_ndc(client_x, client_y, surface.client_width(), surface.client_height()) else {
        return Vec::new();
    };
    let Ok(camera) = camera.try_borrow() else {
        log::warn!("camera is mutably borrowed; skipping pick");
        return Vec::new();
    };

    let mut raycaster = Raycaster::from_config(config);
    raycaster.set_from_camera(&ndc, &*camera);
    raycaster.intersect_objects(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{OrthographicCamera, PerspectiveCamera};
    use crate::geometry::BoxGeometry;
    use crate::math::Vector3;
    use crate::objects::Mesh;
    use crate::picking::{PointerSample, VirtualListener, VirtualSurface};
    use std::cell::Cell;
    use std::sync::Arc;

    const DOWN: PointerEventKind = PointerEventKind::PointerDown;

    type Calls = Rc<RefCell<Vec<(usize, bool)>>>;

    fn setup() -> (Rc<VirtualSurface>, PointerRaycastRouter<VirtualSurface>) {
        let surface = Rc::new(VirtualSurface::new(800.0, 600.0));
        let camera: SharedCamera = Rc::new(RefCell::new(PerspectiveCamera::new(45.0, 800.0 / 600.0, 0.1, 100.0)));
        let router = PointerRaycastRouter::new(camera, Rc::clone(&surface));
        (surface, router)
    }

    fn cube() -> ObjectHandle {
        // Keep the view axis off the face diagonals.
        cube_at(0.1, 0.2, 0.0)
    }

    fn cube_at(x: f32, y: f32, z: f32) -> ObjectHandle {
        let mut mesh = Mesh::new(Arc::new(BoxGeometry::default().build()));
        mesh.set_position(x, y, z);
        mesh.into_object()
    }

    /// A surface that can be told to reject new subscriptions.
    struct RefusingSurface {
        inner: VirtualSurface,
        refuse: Cell<bool>,
    }

    impl EventSurface for RefusingSurface {
        type Event = PointerSample;
        type Listener = VirtualListener;

        fn client_width(&self) -> f32 {
            self.inner.client_width()
        }

        fn client_height(&self) -> f32 {
            self.inner.client_height()
        }

        fn add_listener(
            &self,
            kind: PointerEventKind,
            callback: SurfaceCallback<PointerSample>,
        ) -> Result<VirtualListener, PickingError> {
            if self.refuse.get() {
                return Err(PickingError::Surface("listener limit reached".into()));
            }
            self.inner.add_listener(kind, callback)
        }

        fn remove_listener(&self, kind: PointerEventKind, listener: VirtualListener) {
            self.inner.remove_listener(kind, listener);
        }
    }

    fn recorder(calls: &Calls) -> impl FnMut(&PointerSample, &[Intersection], bool) + 'static {
        let calls = Rc::clone(calls);
        move |_: &PointerSample, hits: &[Intersection], hit: bool| calls.borrow_mut().push((hits.len(), hit))
    }

    #[test]
    fn test_center_click_hits_cube() {
        let (surface, mut router) = setup();
        let target = cube();
        let seen: Rc<RefCell<Vec<Intersection>>> = Rc::default();

        let record = Rc::clone(&seen);
        router
            .on(DOWN, vec![Rc::clone(&target)], move |_, hits, hit| {
                assert!(hit);
                record.borrow_mut().extend_from_slice(hits);
            })
            .unwrap();

        assert_eq!(surface.dispatch(DOWN, &PointerSample::new(400.0, 300.0)), 1);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].is_object(&target));
        assert!((seen[0].distance - 4.5).abs() < 1e-4);
        assert!(seen[0].normal.unwrap().approx_eq(&Vector3::UNIT_Z, 1e-4));
    }

    #[test]
    fn test_corner_click_misses() {
        let (surface, mut router) = setup();
        let calls = Calls::default();
        router.on(DOWN, vec![cube()], recorder(&calls)).unwrap();

        surface.dispatch(DOWN, &PointerSample::new(0.0, 0.0));
        assert_eq!(*calls.borrow(), vec![(0, false)]);
    }

    #[test]
    fn test_handler_sees_event() {
        let (surface, mut router) = setup();
        let position = Rc::new(Cell::new((0.0, 0.0)));
        let record = Rc::clone(&position);
        router
            .on(PointerEventKind::PointerMove, Vec::new(), move |event: &PointerSample, _, _| {
                record.set((event.client_x, event.client_y));
            })
            .unwrap();

        surface.dispatch(PointerEventKind::PointerMove, &PointerSample::new(12.0, 34.0));
        assert_eq!(position.get(), (12.0, 34.0));
    }

    #[test]
    fn test_on_then_off_leaves_no_listeners() {
        let (surface, mut router) = setup();
        let calls = Calls::default();
        let handle = router.on(DOWN, vec![cube()], recorder(&calls)).unwrap();
        assert!(router.is_installed(&handle));
        assert_eq!(surface.listener_count(DOWN), 1);

        assert!(router.off(handle));
        assert!(!router.is_installed(&handle));
        assert_eq!(router.listener_count(DOWN), 0);
        assert_eq!(surface.listener_count(DOWN), 0);

        surface.dispatch(DOWN, &PointerSample::new(400.0, 300.0));
        assert!(calls.borrow().is_empty());

        // Second removal is a no-op.
        assert!(!router.off(handle));
    }

    #[test]
    fn test_off_unknown_handle_is_noop() {
        let (surface, mut router) = setup();
        let calls = Calls::default();
        router.on(DOWN, vec![cube()], recorder(&calls)).unwrap();

        assert!(!router.off(ListenerHandle::tagged(DOWN, "never-installed")));
        assert!(!router.off_tagged(PointerEventKind::PointerUp, "never-installed"));
        assert_eq!(router.listener_count(DOWN), 1);
        assert_eq!(surface.listener_count(DOWN), 1);
    }

    #[test]
    fn test_every_on_installs_a_new_listener() {
        let (surface, mut router) = setup();
        let calls = Calls::default();
        let first = router.on(DOWN, vec![cube()], recorder(&calls)).unwrap();
        let second = router.on(DOWN, vec![cube()], recorder(&calls)).unwrap();
        assert_ne!(first, second);
        assert_eq!(surface.listener_count(DOWN), 2);

        surface.dispatch(DOWN, &PointerSample::new(400.0, 300.0));
        assert_eq!(*calls.borrow(), vec![(1, true), (1, true)]);
    }

    #[test]
    fn test_distinct_tags_are_independent() {
        let (surface, mut router) = setup();
        let calls = Calls::default();
        router.on_tagged(DOWN, "select", vec![cube()], recorder(&calls)).unwrap();
        router.on_tagged(DOWN, "inspect", vec![cube()], recorder(&calls)).unwrap();
        assert_eq!(router.listener_count(DOWN), 2);

        assert!(router.off_tagged(DOWN, "select"));
        assert!(router.is_installed(&ListenerHandle::tagged(DOWN, "inspect")));
        assert_eq!(surface.listener_count(DOWN), 1);
    }

    #[test]
    fn test_repeated_tag_replaces_listener() {
        let (surface, mut router) = setup();
        let old_calls = Calls::default();
        let new_calls = Calls::default();
        let first = router.on_tagged(DOWN, "select", vec![cube()], recorder(&old_calls)).unwrap();
        let second = router.on_tagged(DOWN, "select", vec![cube()], recorder(&new_calls)).unwrap();
        assert_eq!(first, second);
        assert_eq!(router.listener_count(DOWN), 1);
        assert_eq!(surface.listener_count(DOWN), 1);

        surface.dispatch(DOWN, &PointerSample::new(400.0, 300.0));
        assert!(old_calls.borrow().is_empty());
        assert_eq!(*new_calls.borrow(), vec![(1, true)]);
    }

    #[test]
    fn test_same_tag_on_other_kind_is_separate() {
        let (surface, mut router) = setup();
        let calls = Calls::default();
        router.on_tagged(DOWN, "select", Vec::new(), recorder(&calls)).unwrap();
        router.on_tagged(PointerEventKind::PointerUp, "select", Vec::new(), recorder(&calls)).unwrap();
        assert_eq!(surface.listener_count(DOWN), 1);
        assert_eq!(surface.listener_count(PointerEventKind::PointerUp), 1);
    }

    #[test]
    fn test_empty_surface_dispatches_no_hits() {
        let (surface, mut router) = setup();
        let calls = Calls::default();
        router.on(DOWN, vec![cube()], recorder(&calls)).unwrap();

        surface.resize(0.0, 0.0);
        surface.dispatch(DOWN, &PointerSample::new(0.0, 0.0));
        assert_eq!(*calls.borrow(), vec![(0, false)]);
    }

    #[test]
    fn test_camera_moves_are_seen_by_installed_listeners() {
        let surface: Rc<VirtualSurface> = Rc::new(VirtualSurface::new(800.0, 600.0));
        let camera = Rc::new(RefCell::new(PerspectiveCamera::new(45.0, 800.0 / 600.0, 0.1, 100.0)));
        let shared: SharedCamera = camera.clone();
        let mut router = PointerRaycastRouter::new(shared, Rc::clone(&surface));
        let calls = Calls::default();
        router.on(DOWN, vec![cube()], recorder(&calls)).unwrap();

        // Look away from the cube.
        camera.borrow_mut().set_position(Vector3::new(20.0, 0.0, 5.0));
        camera.borrow_mut().look_at(Vector3::new(20.0, 0.0, 0.0));
        surface.dispatch(DOWN, &PointerSample::new(400.0, 300.0));
        assert_eq!(*calls.borrow(), vec![(0, false)]);
    }

    #[test]
    fn test_pick_and_range() {
        let (_surface, mut router) = setup();
        let target = cube();
        let hits = router.pick(400.0, 300.0, &[Rc::clone(&target)]);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_object(&target));

        router.set_config(PickingConfig::with_range(0.0, 4.0));
        assert!(router.pick(400.0, 300.0, &[target]).is_empty());
    }

    #[test]
    fn test_top_down_camera_hits() {
        let surface: Rc<VirtualSurface> = Rc::new(VirtualSurface::new(800.0, 600.0));
        let camera = Rc::new(RefCell::new(PerspectiveCamera::new(45.0, 800.0 / 600.0, 0.1, 100.0)));
        // Straight down, parallel to the camera's up axis.
        camera.borrow_mut().set_position(Vector3::new(0.0, 10.0, 0.0));
        camera.borrow_mut().look_at(Vector3::ZERO);
        let shared: SharedCamera = camera;
        let router = PointerRaycastRouter::new(shared, surface);
        let target = cube_at(0.1, 0.0, 0.3);
        let hits = router.pick(400.0, 300.0, &[Rc::clone(&target)]);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].is_object(&target));
        assert!((hits[0].distance - 9.5).abs() < 1e-2);
    }

    #[test]
    fn test_flattened_mesh_is_never_picked() {
        let (_surface, router) = setup();
        let mut mesh = Mesh::new(Arc::new(BoxGeometry::default().build()));
        mesh.set_scale(0.0, 0.0, 0.0);
        assert!(router.pick(400.0, 300.0, &[mesh.into_object()]).is_empty());
    }

    #[test]
    fn test_orthographic_camera_casts_parallel_rays() {
        let surface = Rc::new(VirtualSurface::new(800.0, 600.0));
        let camera: SharedCamera = Rc::new(RefCell::new(OrthographicCamera::from_size(8.0, 6.0, 0.1, 100.0)));
        let mut router = PointerRaycastRouter::new(camera, Rc::clone(&surface));
        let calls = Calls::default();
        let near = cube_at(2.1, 0.2, 0.0);
        let far = cube_at(2.1, 0.2, -40.0);
        router
            .on(DOWN, vec![Rc::clone(&far), Rc::clone(&near)], recorder(&calls))
            .unwrap();

        // Halfway to the right edge is x = 2 in world space, at any depth.
        surface.dispatch(DOWN, &PointerSample::new(600.0, 300.0));
        assert_eq!(*calls.borrow(), vec![(2, true)]);

        let hits = router.pick(600.0, 300.0, &[far, Rc::clone(&near)]);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].is_object(&near));
        assert!((hits[0].distance - 4.4).abs() < 1e-3);
        assert!((hits[1].distance - 44.4).abs() < 1e-2);
    }

    #[test]
    fn test_failed_replacement_leaves_slot_empty() {
        let surface = Rc::new(RefusingSurface {
            inner: VirtualSurface::new(800.0, 600.0),
            refuse: Cell::new(false),
        });
        let camera: SharedCamera = Rc::new(RefCell::new(PerspectiveCamera::new(45.0, 800.0 / 600.0, 0.1, 100.0)));
        let mut router = PointerRaycastRouter::new(camera, Rc::clone(&surface));
        let calls = Calls::default();
        router.on_tagged(DOWN, "select", vec![cube()], recorder(&calls)).unwrap();
        assert_eq!(surface.inner.listener_count(DOWN), 1);

        surface.refuse.set(true);
        let result = router.on_tagged(DOWN, "select", vec![cube()], recorder(&calls));
        assert!(matches!(result, Err(PickingError::Surface(_))));
        assert!(!router.is_installed(&ListenerHandle::tagged(DOWN, "select")));
        assert_eq!(router.listener_count(DOWN), 0);
        // The old listener was detached before the new one was refused.
        assert_eq!(surface.inner.listener_count(DOWN), 0);
        surface.inner.dispatch(DOWN, &PointerSample::new(400.0, 300.0));
        assert!(calls.borrow().is_empty());

        assert!(matches!(
            router.on(DOWN, vec![cube()], recorder(&calls)),
            Err(PickingError::Surface(_))
        ));
    }

    #[test]
    fn test_clear_detaches_everything() {
        let (surface, mut router) = setup();
        let calls = Calls::default();
        router.on(DOWN, vec![cube()], recorder(&calls)).unwrap();
        router.on_tagged(PointerEventKind::PointerMove, "hover", vec![cube()], recorder(&calls)).unwrap();

        assert_eq!(router.clear(), 2);
        assert_eq!(surface.listener_count(DOWN), 0);
        assert_eq!(surface.listener_count(PointerEventKind::PointerMove), 0);
        assert_eq!(router.clear(), 0);
    }

    #[test]
    fn test_handler_can_remove_itself() {
        let (surface, router) = setup();
        let router = Rc::new(RefCell::new(router));
        let handle: Rc<Cell<Option<ListenerHandle>>> = Rc::default();
        let calls = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&router);
        let own = Rc::clone(&handle);
        let count = Rc::clone(&calls);
        let installed = router
            .borrow_mut()
            .on(DOWN, vec![cube()], move |_, _, _| {
                count.set(count.get() + 1);
                if let (Some(router), Some(handle)) = (weak.upgrade(), own.get()) {
                    router.borrow_mut().off(handle);
                }
            })
            .unwrap();
        handle.set(Some(installed));

        surface.dispatch(DOWN, &PointerSample::new(400.0, 300.0));
        surface.dispatch(DOWN, &PointerSample::new(400.0, 300.0));
        assert_eq!(calls.get(), 1);
        assert_eq!(surface.listener_count(DOWN), 0);
        assert_eq!(router.borrow().listener_count(DOWN), 0);
    }
}
