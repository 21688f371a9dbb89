//! Pointer event kinds and client-space to NDC mapping.

use super::PickingError;
use crate::math::Vector2;
use std::fmt;
use std::str::FromStr;

/// The pointer events a router can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerEventKind {
    GotPointerCapture,
    LostPointerCapture,
    PointerCancel,
    PointerDown,
    PointerEnter,
    PointerLeave,
    PointerMove,
    PointerOut,
    PointerOver,
    PointerUp,
}

impl PointerEventKind {
    /// Every kind, in alphabetical order of its event type.
    pub const ALL: [PointerEventKind; 10] = [
        Self::GotPointerCapture,
        Self::LostPointerCapture,
        Self::PointerCancel,
        Self::PointerDown,
        Self::PointerEnter,
        Self::PointerLeave,
        Self::PointerMove,
        Self::PointerOut,
        Self::PointerOver,
        Self::PointerUp,
    ];

    /// DOM event type name, e.g. `"pointerdown"`.
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::GotPointerCapture => "gotpointercapture",
            Self::LostPointerCapture => "lostpointercapture",
            Self::PointerCancel => "pointercancel",
            Self::PointerDown => "pointerdown",
            Self::PointerEnter => "pointerenter",
            Self::PointerLeave => "pointerleave",
            Self::PointerMove => "pointermove",
            Self::PointerOut => "pointerout",
            Self::PointerOver => "pointerover",
            Self::PointerUp => "pointerup",
        }
    }
}

impl fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_type())
    }
}

impl FromStr for PointerEventKind {
    type Err = PickingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.event_type() == s)
            .ok_or_else(|| PickingError::UnknownEvent(s.to_string()))
    }
}

/// Read access to the client-space position carried by a pointer event.
pub trait PointerInput {
    /// Horizontal position in CSS pixels from the left edge of the surface.
    fn client_x(&self) -> f32;
    /// Vertical position in CSS pixels from the top edge of the surface.
    fn client_y(&self) -> f32;
}

/// A plain pointer event, for native hosts feeding a virtual surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerSample {
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

impl PointerInput for PointerSample {
    fn client_x(&self) -> f32 {
        self.client_x
    }

    fn client_y(&self) -> f32 {
        self.client_y
    }
}

/// Map a client-space position on a `width` x `height` surface to normalized
/// device coordinates, with +Y up.
///
/// Returns `None` for a surface without area.
pub fn client_to_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Option<Vector2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    Some(Vector2::new(
        (client_x / width) * 2.0 - 1.0,
        -(client_y / height) * 2.0 + 1.0,
    ))
}
