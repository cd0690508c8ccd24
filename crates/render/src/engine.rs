use crate::camera::CameraState;
use showcase_scene::SceneGraph;

/// The engine could not acquire, use or resize its drawing surface.
///
/// A lost surface usually needs host-level recovery, so callers report it
/// and stop rather than retrying.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to acquire render surface: {0}")]
    Acquire(String),
    #[error("render surface lost")]
    Lost,
    #[error("failed to resize surface to {width}x{height}: {reason}")]
    Resize {
        width: u32,
        height: u32,
        reason: String,
    },
    #[error("render engine has been released")]
    Released,
}

/// What happened to a frame the engine accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame reached the surface.
    Presented,
    /// The surface was briefly unavailable (outdated, timed out) and the
    /// frame was dropped. Not an error; the next frame may succeed.
    Dropped,
}

/// Output side of the core. An engine rasterizes the scene graph as seen by
/// the camera onto a host-owned surface.
pub trait RenderEngine {
    /// Rasterize one frame. The engine only reads its inputs.
    fn submit_frame(
        &mut self,
        scene: &SceneGraph,
        camera: &CameraState,
    ) -> Result<FrameStatus, SurfaceError>;

    /// Resize the surface to a logical size at the given pixel density.
    fn resize_surface(
        &mut self,
        width: u32,
        height: u32,
        pixel_density: f64,
    ) -> Result<(), SurfaceError>;

    /// Drop GPU/host resources. Further submissions fail with
    /// [`SurfaceError::Released`].
    fn release(&mut self);
}

impl<E: RenderEngine + ?Sized> RenderEngine for Box<E> {
    fn submit_frame(
        &mut self,
        scene: &SceneGraph,
        camera: &CameraState,
    ) -> Result<FrameStatus, SurfaceError> {
        (**self).submit_frame(scene, camera)
    }

    fn resize_surface(
        &mut self,
        width: u32,
        height: u32,
        pixel_density: f64,
    ) -> Result<(), SurfaceError> {
        (**self).resize_surface(width, height, pixel_density)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Physical pixel size for a logical size, never smaller than 1x1.
pub fn physical_size(width: u32, height: u32, pixel_density: f64) -> (u32, u32) {
    let scale = |v: u32| ((v as f64 * pixel_density).round() as u32).max(1);
    (scale(width), scale(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_scales_and_rounds() {
        assert_eq!(physical_size(800, 600, 1.0), (800, 600));
        assert_eq!(physical_size(800, 600, 2.0), (1600, 1200));
        assert_eq!(physical_size(101, 33, 1.5), (152, 50));
    }

    #[test]
    fn physical_size_never_zero() {
        assert_eq!(physical_size(0, 0, 2.0), (1, 1));
    }
}
