//! Showcase runtime: the per-frame loop and its mount/unmount lifecycle.
//!
//! # Invariants
//! - Everything runs on one thread; notifications land between frames.
//! - Rotation advances by a fixed delta per dispatched frame, not per
//!   elapsed time.
//! - After `stop()` returns, no frame mutates the scene or the camera.
//! - Unmount detaches every listener it attached, even after a failed mount.

pub mod config;
pub mod error;
pub mod render_loop;
pub mod scheduler;
pub mod showcase;

pub use config::{ConfigError, ShowcaseConfig};
pub use error::ShowcaseError;
pub use render_loop::{FrameContext, FrameOutcome, LoopError, LoopState, ROTATION_PER_FRAME, RenderLoop};
pub use scheduler::{FrameQueue, FrameScheduler, LoopHandle};
pub use showcase::{MountState, Showcase};

pub fn crate_info() -> &'static str {
    "showcase-runtime v0.1.0"
}
