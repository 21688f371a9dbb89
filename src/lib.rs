//! # Ren Picking - pointer events to 3D raycasts
//!
//! Binds pointer events on an event surface (a DOM element in the browser,
//! or a virtual surface driven by a native window loop) to ray picking
//! against a camera. Every event is mapped to normalized device coordinates,
//! turned into a ray from the camera and intersected with a list of target
//! objects. The handler receives the event, the intersections nearest first
//! and whether anything was hit.
//!
//! ## Features
//!
//! - **Math**: vectors, quaternions, matrices, rays and bounding volumes
//! - **Camera**: perspective and orthographic cameras (wgpu depth convention)
//! - **Geometry / Objects**: CPU-side meshes that can be raycast
//! - **Picking**: `Raycaster`, `PointerRaycastRouter`, event surfaces
//! - **Web** (`web` feature): `WebSurface` over an `HtmlElement`
//!
//! ## Example
//!
//! ```ignore
//! use ren_picking::prelude::*;
//! use ren_picking::web::WebSurface;
//!
//! let surface = Rc::new(WebSurface::from_element_id("canvas")?);
//! let camera: SharedCamera = Rc::new(RefCell::new(PerspectiveCamera::default()));
//! let mut router = PointerRaycastRouter::new(camera, surface);
//!
//! let cube = Mesh::new(Arc::new(BoxGeometry::default().build())).into_object();
//! router.on(PointerEventKind::PointerDown, vec![cube], |_event, hits, hit| {
//!     if hit {
//!         log::info!("picked {} at {:?}", hits[0].object_id, hits[0].point);
//!     }
//! })?;
//! ```

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

pub mod math;
pub mod core;
pub mod camera;
pub mod geometry;
pub mod objects;
pub mod picking;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::math::*;
    pub use crate::core::*;
    pub use crate::camera::*;
    pub use crate::geometry::*;
    pub use crate::objects::*;
    pub use crate::picking::*;
}

/// Install the panic hook so panics show up in the browser console.
#[cfg(feature = "web")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "Ren Picking";
