//! Browser bindings: DOM elements as event surfaces.
//!
//! Enabled with the `web` feature on `wasm32` targets.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement, MouseEvent, PointerEvent};

use crate::picking::{EventSurface, PickingError, PointerEventKind, PointerInput, SurfaceCallback};

// `PointerEvent` derefs to `MouseEvent`; call through it so these do not recurse.
impl PointerInput for PointerEvent {
    fn client_x(&self) -> f32 {
        MouseEvent::client_x(self) as f32
    }

    fn client_y(&self) -> f32 {
        MouseEvent::client_y(self) as f32
    }
}

/// An HTML element (usually the render canvas) used as an event surface.
///
/// Listener closures are owned by the returned [`Closure`] values, which the
/// router keeps until the listener is removed.
#[derive(Debug, Clone)]
pub struct WebSurface {
    element: HtmlElement,
}

impl WebSurface {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    /// Look up an element by id in the current document.
    pub fn from_element_id(id: &str) -> Result<Self, JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;

        let element: HtmlElement = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("Element '{}' not found", id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("Element is not an HTML element"))?;

        Ok(Self::new(element))
    }

    #[inline]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl EventSurface for WebSurface {
    type Event = PointerEvent;
    type Listener = Closure<dyn FnMut(PointerEvent)>;

    fn client_width(&self) -> f32 {
        self.element.client_width() as f32
    }

    fn client_height(&self) -> f32 {
        self.element.client_height() as f32
    }

    fn add_listener(
        &self,
        kind: PointerEventKind,
        mut callback: SurfaceCallback<PointerEvent>,
    ) -> Result<Self::Listener, PickingError> {
        let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
            callback(&event);
        }) as Box<dyn FnMut(PointerEvent)>);

        self.element
            .add_event_listener_with_callback(kind.event_type(), closure.as_ref().unchecked_ref())
            .map_err(|e| PickingError::Surface(format!("{:?}", e)))?;

        Ok(closure)
    }

    fn remove_listener(&self, kind: PointerEventKind, listener: Self::Listener) {
        if let Err(e) = self
            .element
            .remove_event_listener_with_callback(kind.event_type(), listener.as_ref().unchecked_ref())
        {
            log::warn!("failed to detach {} listener: {:?}", kind, e);
        }
    }
}
