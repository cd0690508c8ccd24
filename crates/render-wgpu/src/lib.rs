//! wgpu render engine for the showcase.
//!
//! Draws every tile as a lit unit cube (instanced), clears to the scene
//! background, and overlays tile labels and the title with egui.
//!
//! # Invariants
//! - The engine never mutates the scene or the camera.
//! - Surface loss is reported, never retried here.

mod engine;
mod frame;
mod gpu;
mod overlay;
mod shaders;

pub use engine::WgpuEngine;
pub use frame::{MAX_LIGHTS, project_to_screen};
