//! Input boundary: host notifications and pointer normalization.
//!
//! # Invariants
//! - The core never polls; the host pushes notifications.
//! - A listener is only delivered to while it is attached.

pub mod event;
pub mod pointer;

pub use event::{EventKind, EventSource, InputEvent, ListenerRegistry, Subscription};
pub use pointer::{PointerError, PointerState, PointerTracker};

pub fn crate_info() -> &'static str {
    "showcase-input v0.1.0"
}
