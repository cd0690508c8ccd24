//! Developer tooling: read-only inspection of a running showcase.
//!
//! # Invariants
//! - Inspection never mutates the scene, the camera or the loop.

mod inspector;

pub use inspector::{SceneInspector, ShowcaseSummary, TileInfo};

pub fn crate_info() -> &'static str {
    "showcase-tools v0.1.0"
}
