use crate::camera::CameraState;
use crate::engine::{RenderEngine, SurfaceError};

/// Keeps the camera projection and the render surface in step with the
/// host viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportBinding {
    width: u32,
    height: u32,
    pixel_density: f64,
}

impl Default for ViewportBinding {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ViewportBinding {
    pub fn new(pixel_density: f64) -> Self {
        Self {
            width: 0,
            height: 0,
            pixel_density: sanitize_density(pixel_density),
        }
    }

    /// Last logical size seen, `(0, 0)` before the first resize.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_density(&self) -> f64 {
        self.pixel_density
    }

    /// Whether the viewport currently has an area to draw into.
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// React to a viewport resize: resize the surface at the current pixel
    /// density, then set aspect = width / height and refresh the projection.
    ///
    /// A zero-sized viewport (e.g. a minimized window) is recorded but leaves
    /// camera and surface untouched. If the engine rejects the size, nothing
    /// changes.
    pub fn on_resize<E: RenderEngine + ?Sized>(
        &mut self,
        camera: &mut CameraState,
        engine: &mut E,
        width: u32,
        height: u32,
    ) -> Result<(), SurfaceError> {
        self.apply(camera, engine, width, height, self.pixel_density)
    }

    /// Change the device pixel density and re-apply the current size.
    /// The old density is kept if the engine rejects the new one.
    pub fn set_pixel_density<E: RenderEngine + ?Sized>(
        &mut self,
        camera: &mut CameraState,
        engine: &mut E,
        pixel_density: f64,
    ) -> Result<(), SurfaceError> {
        let pixel_density = sanitize_density(pixel_density);
        self.apply(camera, engine, self.width, self.height, pixel_density)
    }

    fn apply<E: RenderEngine + ?Sized>(
        &mut self,
        camera: &mut CameraState,
        engine: &mut E,
        width: u32,
        height: u32,
        pixel_density: f64,
    ) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 {
            self.width = width;
            self.height = height;
            self.pixel_density = pixel_density;
            tracing::debug!(width, height, "viewport has no area, skipping resize");
            return Ok(());
        }

        engine.resize_surface(width, height, pixel_density)?;

        self.width = width;
        self.height = height;
        self.pixel_density = pixel_density;
        camera.set_aspect(width as f32 / height as f32);
        camera.update_projection();
        tracing::debug!(
            width,
            height,
            pixel_density,
            aspect = camera.aspect(),
            "viewport resized"
        );
        Ok(())
    }
}

fn sanitize_density(pixel_density: f64) -> f64 {
    if pixel_density.is_finite() && pixel_density > 0.0 {
        pixel_density
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DebugTextEngine;
    use crate::engine::FrameStatus;
    use showcase_scene::Layout;

    fn camera() -> CameraState {
        CameraState::from_preset(&Layout::Grid.view(), 1.0)
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let mut cam = camera();
        let mut engine = DebugTextEngine::new();
        let mut viewport = ViewportBinding::new(2.0);

        viewport.on_resize(&mut cam, &mut engine, 800, 600).unwrap();
        assert!((cam.aspect() - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(engine.surface_size(), Some((1600, 1200)));
        assert_eq!(viewport.size(), (800, 600));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut cam_once = camera();
        let mut engine_once = DebugTextEngine::new();
        let mut viewport_once = ViewportBinding::new(1.0);
        viewport_once
            .on_resize(&mut cam_once, &mut engine_once, 1024, 768)
            .unwrap();

        let mut cam_twice = camera();
        let mut engine_twice = DebugTextEngine::new();
        let mut viewport_twice = ViewportBinding::new(1.0);
        for _ in 0..2 {
            viewport_twice
                .on_resize(&mut cam_twice, &mut engine_twice, 1024, 768)
                .unwrap();
        }

        assert_eq!(cam_once, cam_twice);
        assert_eq!(engine_once.surface_size(), engine_twice.surface_size());
        assert_eq!(viewport_once, viewport_twice);
    }

    #[test]
    fn zero_area_leaves_camera_alone() {
        let mut cam = camera();
        let mut engine = DebugTextEngine::new();
        let mut viewport = ViewportBinding::default();
        let before = cam.clone();

        viewport.on_resize(&mut cam, &mut engine, 0, 600).unwrap();
        assert_eq!(cam, before);
        assert_eq!(engine.surface_size(), None);
        assert!(!viewport.has_area());
    }

    #[test]
    fn pixel_density_change_reapplies_size() {
        let mut cam = camera();
        let mut engine = DebugTextEngine::new();
        let mut viewport = ViewportBinding::new(1.0);
        viewport.on_resize(&mut cam, &mut engine, 640, 480).unwrap();
        viewport
            .set_pixel_density(&mut cam, &mut engine, 1.5)
            .unwrap();
        assert_eq!(engine.surface_size(), Some((960, 720)));
    }

    #[test]
    fn invalid_density_falls_back_to_one() {
        assert_eq!(ViewportBinding::new(0.0).pixel_density(), 1.0);
        assert_eq!(ViewportBinding::new(f64::NAN).pixel_density(), 1.0);
    }

    /// Accepts sizes up to a fixed limit, like a GPU max texture dimension.
    struct LimitedEngine {
        max: u32,
        inner: DebugTextEngine,
    }

    impl RenderEngine for LimitedEngine {
        fn submit_frame(
            &mut self,
            scene: &showcase_scene::SceneGraph,
            camera: &CameraState,
        ) -> Result<FrameStatus, SurfaceError> {
            self.inner.submit_frame(scene, camera)
        }

        fn resize_surface(
            &mut self,
            width: u32,
            height: u32,
            pixel_density: f64,
        ) -> Result<(), SurfaceError> {
            let (w, h) = crate::physical_size(width, height, pixel_density);
            if w > self.max || h > self.max {
                return Err(SurfaceError::Resize {
                    width,
                    height,
                    reason: format!("exceeds {}", self.max),
                });
            }
            self.inner.resize_surface(width, height, pixel_density)
        }

        fn release(&mut self) {
            self.inner.release();
        }
    }

    #[test]
    fn rejected_resize_keeps_previous_state() {
        let mut cam = camera();
        let mut engine = LimitedEngine {
            max: 8192,
            inner: DebugTextEngine::new(),
        };
        let mut viewport = ViewportBinding::new(1.0);
        viewport.on_resize(&mut cam, &mut engine, 800, 600).unwrap();
        let cam_before = cam.clone();

        assert!(matches!(
            viewport.on_resize(&mut cam, &mut engine, 20_000, 100),
            Err(SurfaceError::Resize { .. })
        ));
        assert_eq!(viewport.size(), (800, 600));
        assert_eq!(cam, cam_before);
        assert_eq!(engine.inner.surface_size(), Some((800, 600)));
    }

    #[test]
    fn rejected_density_keeps_previous_density() {
        let mut cam = camera();
        let mut engine = LimitedEngine {
            max: 2048,
            inner: DebugTextEngine::new(),
        };
        let mut viewport = ViewportBinding::new(1.0);
        viewport.on_resize(&mut cam, &mut engine, 1600, 900).unwrap();

        assert!(viewport.set_pixel_density(&mut cam, &mut engine, 2.0).is_err());
        assert_eq!(viewport.pixel_density(), 1.0);
        assert_eq!(engine.inner.surface_size(), Some((1600, 900)));
    }
}
