//! Scene graph: the fixed set of project tiles plus lights.
//!
//! # Invariants
//! - The graph is built once; tiles are never added or removed afterwards.
//! - A tile's position never changes. Rotation is the only mutable field.
//! - Rotation accumulates unbounded; renderers wrap it themselves.

pub mod graph;
pub mod light;
pub mod preset;

pub use graph::{SceneError, SceneGraph, SceneSpec, Tile, TileSpec};
pub use light::Light;
pub use preset::{Layout, ViewPreset};

pub fn crate_info() -> &'static str {
    "showcase-scene v0.1.0"
}
