use crate::scheduler::{FrameScheduler, LoopHandle};
use glam::Vec3;
use showcase_input::PointerState;
use showcase_render::{CameraController, CameraState, FrameStatus, RenderEngine, SurfaceError};
use showcase_scene::SceneGraph;

/// Rotation added to every tile on each dispatched frame, in radians.
///
/// Tied to frame count, so spin speed follows the display refresh rate.
pub const ROTATION_PER_FRAME: Vec3 = Vec3::new(0.01, 0.01, 0.0);

/// Render loop states. Starts and ends in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    /// No further frames will be scheduled; waiting for `stop()`.
    Stopping,
}

/// Rejected state-machine transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoopError {
    #[error("cannot move render loop from {from:?} to {to:?}")]
    InvalidTransition { from: LoopState, to: LoopState },
}

/// What happened to one dispatched frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Tiles rotated, camera updated, frame submitted, next frame scheduled.
    Rendered,
    /// Tiles rotated and next frame scheduled, but the engine dropped the
    /// frame. Not counted in `frames_rendered`.
    Dropped,
    /// The handle was stale or the loop is not running; nothing changed.
    Skipped,
    /// The engine rejected the frame. The loop is now `Stopping`.
    Failed(SurfaceError),
}

/// Mutable state one frame reads and writes.
pub struct FrameContext<'a, E: RenderEngine + ?Sized> {
    pub scene: &'a mut SceneGraph,
    pub camera: &'a mut CameraState,
    pub pointer: PointerState,
    pub camera_scale: f32,
    pub engine: &'a mut E,
}

/// Per-frame driver: rotate, aim the camera, submit, reschedule.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    pending: Option<LoopHandle>,
    frames_rendered: u64,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            pending: None,
            frames_rendered: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The frame request currently outstanding, if any.
    pub fn pending(&self) -> Option<LoopHandle> {
        self.pending
    }

    /// Idle -> Running. Schedules the first frame.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<(), LoopError> {
        if self.state != LoopState::Idle {
            return Err(LoopError::InvalidTransition {
                from: self.state,
                to: LoopState::Running,
            });
        }
        self.pending = Some(scheduler.request_frame());
        self.state = LoopState::Running;
        tracing::info!("render loop started");
        Ok(())
    }

    /// Running/Stopping -> Idle. Cancels the outstanding frame request so
    /// no later frame can touch the scene. Calling it while idle is a no-op.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.state == LoopState::Idle {
            tracing::debug!("render loop already idle");
            return;
        }
        self.state = LoopState::Stopping;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Idle;
        tracing::info!(frames = self.frames_rendered, "render loop stopped");
    }

    /// Run one frame for `handle`.
    ///
    /// Frames for any handle other than the outstanding one are skipped
    /// without side effects. A submission failure is returned once and
    /// leaves the loop in `Stopping` with nothing scheduled.
    pub fn on_frame<E: RenderEngine + ?Sized>(
        &mut self,
        handle: LoopHandle,
        ctx: FrameContext<'_, E>,
        scheduler: &mut dyn FrameScheduler,
    ) -> FrameOutcome {
        if self.state != LoopState::Running || self.pending != Some(handle) {
            tracing::trace!(?handle, state = ?self.state, "skipping stale frame");
            return FrameOutcome::Skipped;
        }
        self.pending = None;

        ctx.scene.advance_all(ROTATION_PER_FRAME);
        CameraController::update(ctx.camera, ctx.pointer, ctx.camera_scale);

        match ctx.engine.submit_frame(ctx.scene, ctx.camera) {
            Ok(FrameStatus::Presented) => {
                self.frames_rendered += 1;
                self.pending = Some(scheduler.request_frame());
                tracing::trace!(frame = self.frames_rendered, "frame rendered");
                FrameOutcome::Rendered
            }
            Ok(FrameStatus::Dropped) => {
                self.pending = Some(scheduler.request_frame());
                tracing::debug!(frames = self.frames_rendered, "frame dropped by engine");
                FrameOutcome::Dropped
            }
            Err(err) => {
                self.state = LoopState::Stopping;
                tracing::error!(error = %err, frame = self.frames_rendered + 1, "frame submission failed, stopping render loop");
                FrameOutcome::Failed(err)
            }
        }
    }
}
