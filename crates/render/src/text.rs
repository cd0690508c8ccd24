use crate::camera::CameraState;
use crate::engine::{FrameStatus, RenderEngine, SurfaceError, physical_size};
use showcase_scene::{Light, SceneGraph};
use std::fmt::Write as _;

/// Headless engine that "rasterizes" a frame into a text dump.
///
/// Useful for the CLI, logging, and for driving the frame loop in tests.
/// It can be told to lose its surface on a given frame to exercise the
/// failure path.
#[derive(Debug, Default)]
pub struct DebugTextEngine {
    last_frame: Option<String>,
    frames_submitted: u64,
    surface: Option<(u32, u32)>,
    lose_surface_at: Option<u64>,
    released: bool,
}

impl DebugTextEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `frame`-th submission (1-based) with [`SurfaceError::Lost`].
    pub fn with_surface_loss_at(mut self, frame: u64) -> Self {
        self.lose_surface_at = Some(frame);
        self
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.last_frame.as_deref()
    }

    /// Number of frames successfully rasterized.
    pub fn frames_submitted(&self) -> u64 {
        self.frames_submitted
    }

    /// Physical surface size, `None` until the first resize.
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn render_text(&self, scene: &SceneGraph, camera: &CameraState) -> String {
        let mut out = String::new();
        let p = camera.position();
        let _ = writeln!(
            out,
            "=== Frame {} (tiles={}, lights={}, background={}) ===",
            self.frames_submitted + 1,
            scene.tile_count(),
            scene.lights().len(),
            scene.background()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.1}, {:.1}, {:.1}) aspect={:.3}",
            p.x,
            p.y,
            p.z,
            camera.target().x,
            camera.target().y,
            camera.target().z,
            camera.aspect()
        );
        for light in scene.lights() {
            let _ = match light {
                Light::Ambient { intensity, .. } => writeln!(out, "  light ambient {intensity:.2}"),
                Light::Point {
                    intensity, position, ..
                } => writeln!(
                    out,
                    "  light point {intensity:.2} at ({:.1}, {:.1}, {:.1})",
                    position.x, position.y, position.z
                ),
                Light::Spot {
                    intensity,
                    position,
                    angle,
                    ..
                } => writeln!(
                    out,
                    "  light spot {intensity:.2} at ({:.1}, {:.1}, {:.1}) angle={angle:.2}",
                    position.x, position.y, position.z
                ),
            };
        }
        for tile in scene.tiles() {
            let pos = tile.position();
            let rot = tile.rotation();
            let _ = writeln!(
                out,
                "  [{}] {:<18} {} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})",
                tile.id().0,
                tile.label(),
                tile.color(),
                pos.x,
                pos.y,
                pos.z,
                rot.x,
                rot.y,
                rot.z
            );
        }
        out
    }
}

impl RenderEngine for DebugTextEngine {
    fn submit_frame(
        &mut self,
        scene: &SceneGraph,
        camera: &CameraState,
    ) -> Result<FrameStatus, SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        if self.surface.is_none() {
            return Err(SurfaceError::Acquire("surface has not been sized".into()));
        }
        if self.lose_surface_at == Some(self.frames_submitted + 1) {
            return Err(SurfaceError::Lost);
        }
        self.last_frame = Some(self.render_text(scene, camera));
        self.frames_submitted += 1;
        Ok(FrameStatus::Presented)
    }

    fn resize_surface(
        &mut self,
        width: u32,
        height: u32,
        pixel_density: f64,
    ) -> Result<(), SurfaceError> {
        if self.released {
            return Err(SurfaceError::Released);
        }
        self.surface = Some(physical_size(width, height, pixel_density));
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
        self.last_frame = None;
    }
}
