//! # Picking Module
//!
//! Turns pointer events on an event surface into ray/object intersection
//! queries against a camera.
//!
//! The pieces, bottom-up:
//!
//! - [`Raycaster`] builds a ray from a camera and an NDC point and asks each
//!   [`Raycast`] object for hits, returning [`Intersection`]s nearest first.
//! - [`pointer`] holds the closed set of pointer event kinds and the
//!   client-pixel to NDC mapping.
//! - [`EventSurface`] abstracts the element that emits pointer events;
//!   [`VirtualSurface`] is a headless implementation for native hosts and tests.
//! - [`PointerRaycastRouter`] ties them together: `on` installs a listener
//!   that picks on every event and hands the result to a callback, `off`
//!   removes it again.

mod config;
mod error;
mod fingerprint;
mod intersection;
pub mod pointer;
mod raycaster;
mod router;
mod surface;

pub use config::PickingConfig;
pub use error::PickingError;
pub use fingerprint::HandlerFingerprint;
pub use intersection::{Intersection, ObjectHandle, Raycast, RaycastHit};
pub use pointer::{client_to_ndc, PointerEventKind, PointerInput, PointerSample};
pub use raycaster::Raycaster;
pub use router::{ListenerHandle, ListenerKey, PointerRaycastRouter, SharedCamera};
pub use surface::{EventSurface, SurfaceCallback, VirtualListener, VirtualSurface};
