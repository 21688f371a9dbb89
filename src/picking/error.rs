//! Picking errors.

use thiserror::Error;

/// Errors raised by the picking layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickingError {
    /// A string did not name one of the pointer event kinds.
    #[error("unknown pointer event '{0}'")]
    UnknownEvent(String),

    /// The event surface refused to install a listener.
    #[error("event surface rejected listener: {0}")]
    Surface(String),
}
