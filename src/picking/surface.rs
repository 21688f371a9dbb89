//! Event surfaces: the element pointer events come from.

use super::{PickingError, PointerEventKind, PointerInput, PointerSample};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Callback installed on a surface for one pointer event kind.
pub type SurfaceCallback<E> = Box<dyn FnMut(&E)>;

/// A host element that emits pointer events and reports its client size.
///
/// Methods take `&self` because surfaces are shared between the application
/// and every router bound to them.
pub trait EventSurface {
    /// Event type handed to listeners.
    type Event: PointerInput;

    /// Host-side subscription returned by [`add_listener`](Self::add_listener)
    /// and consumed by [`remove_listener`](Self::remove_listener).
    type Listener;

    /// Current client width in CSS pixels.
    fn client_width(&self) -> f32;

    /// Current client height in CSS pixels.
    fn client_height(&self) -> f32;

    /// Subscribe `callback` to events of `kind`.
    fn add_listener(
        &self,
        kind: PointerEventKind,
        callback: SurfaceCallback<Self::Event>,
    ) -> Result<Self::Listener, PickingError>;

    /// Unsubscribe a listener previously returned by `add_listener` for `kind`.
    fn remove_listener(&self, kind: PointerEventKind, listener: Self::Listener);
}

/// Subscription token of a [`VirtualSurface`] listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualListener(u64);

struct Entry<E> {
    id: u64,
    kind: PointerEventKind,
    callback: Rc<RefCell<SurfaceCallback<E>>>,
}

/// A headless event surface.
///
/// Native hosts forward their window's pointer events through
/// [`dispatch`](Self::dispatch); tests use it to drive routers directly.
pub struct VirtualSurface<E = PointerSample> {
    width: Cell<f32>,
    height: Cell<f32>,
    listeners: RefCell<Vec<Entry<E>>>,
    next_id: Cell<u64>,
}

impl<E> VirtualSurface<E> {
    /// Create a surface with the given client size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Change the client size, e.g. after the host window resized.
    pub fn resize(&self, width: f32, height: f32) {
        self.width.set(width);
        self.height.set(height);
    }

    /// Number of listeners currently installed for `kind`.
    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.listeners.borrow().iter().filter(|entry| entry.kind == kind).count()
    }

    /// Deliver `event` to every listener installed for `kind`, in installation
    /// order. Returns how many listeners ran.
    ///
    /// Listeners may add or remove listeners while running. One removed during
    /// this dispatch is not called afterwards; one added is not called until
    /// the next dispatch.
    pub fn dispatch(&self, kind: PointerEventKind, event: &E) -> usize {
        let snapshot: Vec<(u64, Rc<RefCell<SurfaceCallback<E>>>)> = self
            .listeners
            .borrow()
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| (entry.id, Rc::clone(&entry.callback)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in snapshot {
            if !self.is_listening(id) {
                continue;
            }
            // A listener that dispatches into its own kind is not re-entered.
            let Ok(mut callback) = callback.try_borrow_mut() else {
                continue;
            };
            (*callback)(event);
            delivered += 1;
        }
        delivered
    }

    fn is_listening(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|entry| entry.id == id)
    }
}

impl<E: PointerInput> EventSurface for VirtualSurface<E> {
    type Event = E;
    type Listener = VirtualListener;

    fn client_width(&self) -> f32 {
        self.width.get()
    }

    fn client_height(&self) -> f32 {
        self.height.get()
    }

    fn add_listener(
        &self,
        kind: PointerEventKind,
        callback: SurfaceCallback<E>,
    ) -> Result<VirtualListener, PickingError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push(Entry {
            id,
            kind,
            callback: Rc::new(RefCell::new(callback)),
        });
        Ok(VirtualListener(id))
    }

    fn remove_listener(&self, kind: PointerEventKind, listener: VirtualListener) {
        self.listeners
            .borrow_mut()
            .retain(|entry| !(entry.id == listener.0 && entry.kind == kind));
    }
}

impl<E> std::fmt::Debug for VirtualSurface<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualSurface")
            .field("width", &self.width.get())
            .field("height", &self.height.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
