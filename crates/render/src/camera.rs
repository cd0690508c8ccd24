use glam::{Mat4, Vec3};
use showcase_input::PointerState;
use showcase_scene::ViewPreset;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }
}

/// Camera aimed at a fixed target (the scene origin).
///
/// Position moves every frame from pointer input; the aspect ratio only
/// changes on viewport resize. The projection matrix is cached and only
/// recomputed by [`CameraState::update_projection`].
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    position: Vec3,
    target: Vec3,
    look_dir: Vec3,
    projection: Projection,
    projection_matrix: Mat4,
}

impl CameraState {
    pub fn new(position: Vec3, projection: Projection) -> Self {
        let mut camera = Self {
            position,
            target: Vec3::ZERO,
            look_dir: Vec3::NEG_Z,
            projection,
            projection_matrix: projection.matrix(),
        };
        camera.look_at_target();
        camera
    }

    pub fn from_preset(preset: &ViewPreset, aspect: f32) -> Self {
        Self::new(
            preset.position,
            Projection {
                fov_y: preset.fov_degrees.to_radians(),
                aspect,
                near: preset.near,
                far: preset.far,
            },
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Unit vector from the camera toward its target.
    pub fn look_dir(&self) -> Vec3 {
        self.look_dir
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn aspect(&self) -> f32 {
        self.projection.aspect
    }

    /// Change the aspect ratio. Takes effect on the next
    /// [`update_projection`](Self::update_projection).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection.aspect = aspect;
    }

    pub fn update_projection(&mut self) {
        self.projection_matrix = self.projection.matrix();
    }

    /// Re-orient toward the target from the current position.
    pub fn look_at_target(&mut self) {
        let dir = (self.target - self.position).normalize_or_zero();
        if dir != Vec3::ZERO {
            self.look_dir = dir;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.look_dir, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix()
    }
}

/// Drives the camera from pointer input once per frame.
pub struct CameraController;

impl CameraController {
    /// Place the camera at `(nx * scale, ny * scale, z)` and aim it at the
    /// origin. Depth is left untouched. Pointer values outside [-1, 1] are
    /// used as-is.
    pub fn update(camera: &mut CameraState, pointer: PointerState, scale: f32) {
        camera.position.x = pointer.nx * scale;
        camera.position.y = pointer.ny * scale;
        camera.look_at_target();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_scene::Layout;

    fn grid_camera() -> CameraState {
        CameraState::from_preset(&Layout::Grid.view(), 800.0 / 600.0)
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn preset_camera_faces_origin() {
        let cam = grid_camera();
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 5.0));
        assert!(approx(cam.look_dir(), Vec3::NEG_Z));
        assert!((cam.projection().fov_y - 75.0_f32.to_radians()).abs() < 1e-6);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn centered_pointer_keeps_camera_centered() {
        let mut cam = grid_camera();
        CameraController::update(&mut cam, PointerState::CENTER, 2.0);
        assert_eq!(cam.position().x, 0.0);
        assert_eq!(cam.position().y, 0.0);
        assert!(approx(cam.look_dir(), Vec3::NEG_Z));
        assert_eq!(cam.target(), Vec3::ZERO);
    }

    #[test]
    fn pointer_offsets_camera_and_keeps_looking_at_origin() {
        let mut cam = grid_camera();
        CameraController::update(&mut cam, PointerState { nx: 0.5, ny: -1.0 }, 2.0);
        assert_eq!(cam.position(), Vec3::new(1.0, -2.0, 5.0));
        let expected = (Vec3::ZERO - cam.position()).normalize();
        assert!(approx(cam.look_dir(), expected));

        // The origin projects to the center of the screen.
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn out_of_range_pointer_is_tolerated() {
        let mut cam = grid_camera();
        CameraController::update(&mut cam, PointerState { nx: 3.0, ny: -4.0 }, 2.0);
        assert_eq!(cam.position(), Vec3::new(6.0, -8.0, 5.0));
        assert!(!cam.view_matrix().col(0).x.is_nan());
    }

    #[test]
    fn aspect_only_applies_after_update_projection() {
        let mut cam = grid_camera();
        let before = cam.projection_matrix();
        cam.set_aspect(2.0);
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection();
        assert_ne!(cam.projection_matrix(), before);
        assert_eq!(cam.aspect(), 2.0);
    }
}
