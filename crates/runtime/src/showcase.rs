use crate::config::ShowcaseConfig;
use crate::error::ShowcaseError;
use crate::render_loop::{FrameContext, FrameOutcome, LoopState, RenderLoop};
use crate::scheduler::{FrameScheduler, LoopHandle};
use showcase_input::{EventKind, EventSource, InputEvent, PointerState, PointerTracker, Subscription};
use showcase_render::{CameraState, RenderEngine, ViewportBinding};
use showcase_scene::SceneGraph;

/// Where the component is in its mount/unmount life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    /// Constructed, `on_mount` not called yet.
    Fresh,
    Mounted,
    /// Torn down. Terminal.
    Unmounted,
}

/// The interactive tile showcase as a host-mountable component.
///
/// The host owns the event source and the frame scheduler and passes them
/// in; the component owns the scene, the camera, the pointer state and the
/// render engine.
pub struct Showcase<E: RenderEngine> {
    config: ShowcaseConfig,
    engine: E,
    mount: MountState,
    scene: Option<SceneGraph>,
    camera: CameraState,
    pointer: PointerState,
    viewport: ViewportBinding,
    render_loop: RenderLoop,
    listeners: Vec<Subscription>,
}

impl<E: RenderEngine> Showcase<E> {
    pub fn new(config: ShowcaseConfig, engine: E, pixel_density: f64) -> Self {
        let camera = CameraState::from_preset(&config.view(), 1.0);
        Self {
            config,
            engine,
            mount: MountState::Fresh,
            scene: None,
            camera,
            pointer: PointerState::CENTER,
            viewport: ViewportBinding::new(pixel_density),
            render_loop: RenderLoop::new(),
            listeners: Vec::new(),
        }
    }

    /// Build the scene, size the surface, attach listeners, start the loop.
    ///
    /// On error the partially acquired state is kept for
    /// [`on_unmount`](Self::on_unmount) to release.
    pub fn on_mount(
        &mut self,
        events: &mut dyn EventSource,
        scheduler: &mut dyn FrameScheduler,
        width: u32,
        height: u32,
    ) -> Result<(), ShowcaseError> {
        if self.mount != MountState::Fresh {
            return Err(ShowcaseError::AlreadyMounted);
        }
        self.mount = MountState::Mounted;

        let scene = SceneGraph::build(&self.config.scene_spec())?;
        self.scene = Some(scene);

        self.viewport
            .on_resize(&mut self.camera, &mut self.engine, width, height)?;

        self.listeners.push(events.attach(EventKind::PointerMove));
        self.listeners.push(events.attach(EventKind::ViewportResize));

        self.render_loop.start(scheduler)?;
        tracing::info!(
            layout = %self.config.layout,
            tiles = self.scene.as_ref().map_or(0, SceneGraph::tile_count),
            width,
            height,
            "showcase mounted"
        );
        Ok(())
    }

    /// Detach listeners, stop the loop, release the engine.
    ///
    /// Safe after a failed or skipped mount. Calling it twice is a no-op.
    pub fn on_unmount(&mut self, events: &mut dyn EventSource, scheduler: &mut dyn FrameScheduler) {
        if self.mount == MountState::Unmounted {
            tracing::warn!("showcase already unmounted");
            return;
        }
        for subscription in self.listeners.drain(..) {
            events.detach(subscription);
        }
        self.render_loop.stop(scheduler);
        self.engine.release();
        self.mount = MountState::Unmounted;
        tracing::info!(
            frames = self.render_loop.frames_rendered(),
            "showcase unmounted"
        );
    }

    /// Mounted with a built scene. Notifications are ignored otherwise,
    /// including after a mount that failed part way.
    fn is_live(&self) -> bool {
        self.mount == MountState::Mounted && self.scene.is_some()
    }

    /// Record a pointer move given in logical pixels.
    pub fn on_pointer_move(&mut self, raw_x: f32, raw_y: f32) -> Result<(), ShowcaseError> {
        if !self.is_live() {
            tracing::debug!("pointer move ignored while not mounted");
            return Ok(());
        }
        let (width, height) = self.viewport.size();
        self.pointer = PointerTracker::normalize(raw_x, raw_y, width as f32, height as f32)?;
        tracing::trace!(nx = self.pointer.nx, ny = self.pointer.ny, "pointer moved");
        Ok(())
    }

    /// React to a viewport resize given in logical pixels.
    pub fn on_viewport_resize(&mut self, width: u32, height: u32) -> Result<(), ShowcaseError> {
        if !self.is_live() {
            tracing::debug!(width, height, "resize ignored while not mounted");
            return Ok(());
        }
        self.viewport
            .on_resize(&mut self.camera, &mut self.engine, width, height)?;
        Ok(())
    }

    /// Host display moved to a screen with a different scale factor.
    pub fn set_pixel_density(&mut self, pixel_density: f64) -> Result<(), ShowcaseError> {
        if !self.is_live() {
            tracing::debug!(pixel_density, "pixel density change ignored while not mounted");
            return Ok(());
        }
        self.viewport
            .set_pixel_density(&mut self.camera, &mut self.engine, pixel_density)?;
        Ok(())
    }

    /// Dispatch a host notification to the matching handler.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<(), ShowcaseError> {
        match event {
            InputEvent::PointerMoved { x, y } => self.on_pointer_move(x, y),
            InputEvent::ViewportResized { width, height } => self.on_viewport_resize(width, height),
        }
    }

    /// Run the frame the scheduler handed out as `handle`.
    pub fn on_frame(&mut self, handle: LoopHandle, scheduler: &mut dyn FrameScheduler) -> FrameOutcome {
        let Some(scene) = self.scene.as_mut() else {
            return FrameOutcome::Skipped;
        };
        let ctx = FrameContext {
            scene,
            camera: &mut self.camera,
            pointer: self.pointer,
            camera_scale: self.config.camera_scale,
            engine: &mut self.engine,
        };
        self.render_loop.on_frame(handle, ctx, scheduler)
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn mount_state(&self) -> MountState {
        self.mount
    }

    pub fn scene(&self) -> Option<&SceneGraph> {
        self.scene.as_ref()
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn viewport(&self) -> &ViewportBinding {
        &self.viewport
    }

    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.render_loop.frames_rendered()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::FrameQueue;
    use showcase_input::ListenerRegistry;
    use showcase_render::DebugTextEngine;

    #[test]
    fn fresh_component_is_idle() {
        let showcase = Showcase::new(ShowcaseConfig::default(), DebugTextEngine::new(), 1.0);
        assert_eq!(showcase.mount_state(), MountState::Fresh);
        assert_eq!(showcase.loop_state(), LoopState::Idle);
        assert!(showcase.scene().is_none());
    }

    #[test]
    fn notifications_before_mount_are_ignored() {
        let mut showcase = Showcase::new(ShowcaseConfig::default(), DebugTextEngine::new(), 1.0);
        showcase.on_pointer_move(10.0, 10.0).unwrap();
        showcase.on_viewport_resize(100, 100).unwrap();
        assert_eq!(showcase.pointer(), PointerState::CENTER);
        assert_eq!(showcase.viewport().size(), (0, 0));
    }

    #[test]
    fn handle_event_routes_by_kind() {
        let mut events = ListenerRegistry::new();
        let mut queue = FrameQueue::new();
        let mut showcase = Showcase::new(ShowcaseConfig::default(), DebugTextEngine::new(), 1.0);
        showcase.on_mount(&mut events, &mut queue, 800, 600).unwrap();

        showcase
            .handle_event(InputEvent::ViewportResized { width: 1000, height: 500 })
            .unwrap();
        assert!((showcase.camera().aspect() - 2.0).abs() < 1e-6);

        showcase
            .handle_event(InputEvent::PointerMoved { x: 1000.0, y: 0.0 })
            .unwrap();
        assert_eq!(showcase.pointer(), PointerState { nx: 1.0, ny: 1.0 });
    }

    #[test]
    fn frame_before_mount_is_skipped() {
        let mut queue = FrameQueue::new();
        let handle = queue.request_frame();
        let mut showcase = Showcase::new(ShowcaseConfig::default(), DebugTextEngine::new(), 1.0);
        assert_eq!(showcase.on_frame(handle, &mut queue), FrameOutcome::Skipped);
    }

    #[test]
    fn notifications_after_failed_mount_are_ignored() {
        let config = ShowcaseConfig {
            tiles: Some(vec![showcase_scene::TileSpec::default()]),
            ..ShowcaseConfig::default()
        };
        let mut events = ListenerRegistry::new();
        let mut queue = FrameQueue::new();
        let mut showcase = Showcase::new(config, DebugTextEngine::new(), 1.0);
        assert!(showcase.on_mount(&mut events, &mut queue, 800, 600).is_err());

        showcase.on_pointer_move(10.0, 10.0).unwrap();
        showcase.on_viewport_resize(640, 480).unwrap();
        showcase.set_pixel_density(2.0).unwrap();
        assert_eq!(showcase.pointer(), PointerState::CENTER);
        assert_eq!(showcase.viewport().size(), (0, 0));
        assert_eq!(showcase.viewport().pixel_density(), 1.0);
    }

    #[test]
    fn pixel_density_after_unmount_is_ignored() {
        let mut events = ListenerRegistry::new();
        let mut queue = FrameQueue::new();
        let mut showcase = Showcase::new(ShowcaseConfig::default(), DebugTextEngine::new(), 1.0);
        showcase.on_mount(&mut events, &mut queue, 800, 600).unwrap();
        showcase.on_unmount(&mut events, &mut queue);

        showcase.set_pixel_density(2.0).unwrap();
        assert_eq!(showcase.viewport().pixel_density(), 1.0);
        assert_eq!(showcase.engine().surface_size(), Some((800, 600)));
    }

    #[test]
    fn pixel_density_while_mounted_resizes_surface() {
        let mut events = ListenerRegistry::new();
        let mut queue = FrameQueue::new();
        let mut showcase = Showcase::new(ShowcaseConfig::default(), DebugTextEngine::new(), 1.0);
        showcase.on_mount(&mut events, &mut queue, 800, 600).unwrap();

        showcase.set_pixel_density(2.0).unwrap();
        assert_eq!(showcase.engine().surface_size(), Some((1600, 1200)));
    }
}
