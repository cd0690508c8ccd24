use crate::config::ConfigError;
use crate::render_loop::LoopError;
use showcase_input::PointerError;
use showcase_render::SurfaceError;
use showcase_scene::SceneError;

/// Everything the showcase component can report to its host.
#[derive(Debug, thiserror::Error)]
pub enum ShowcaseError {
    #[error("scene configuration error: {0}")]
    Scene(#[from] SceneError),
    #[error("pointer precondition violated: {0}")]
    Pointer(#[from] PointerError),
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
    #[error("render loop error: {0}")]
    Loop(#[from] LoopError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("showcase is already mounted")]
    AlreadyMounted,
}
