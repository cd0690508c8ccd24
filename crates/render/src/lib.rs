//! Rendering adapter: camera, viewport binding and the engine boundary.
//!
//! # Invariants
//! - The engine only reads the scene graph and camera; it never mutates them.
//! - The camera always looks at the scene origin.
//! - Resizing is idempotent for identical dimensions.
//!
//! `DebugTextEngine` implements [`RenderEngine`] without a GPU so hosts and
//! tests can drive the frame loop headless. The wgpu engine lives in
//! `showcase-render-wgpu` behind the same trait.

mod camera;
mod engine;
mod text;
mod viewport;

pub use camera::{CameraController, CameraState, Projection};
pub use engine::{FrameStatus, RenderEngine, SurfaceError, physical_size};
pub use text::DebugTextEngine;
pub use viewport::ViewportBinding;

pub fn crate_info() -> &'static str {
    "showcase-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
