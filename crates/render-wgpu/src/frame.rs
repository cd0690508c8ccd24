//! CPU-side frame data: uniforms, per-tile instances, label projection.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};
use showcase_common::Color;
use showcase_render::CameraState;
use showcase_scene::{Light, SceneGraph};

/// Positional lights beyond this count are ignored by the shader.
pub const MAX_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub(crate) struct GpuLight {
    /// xyz = world position.
    pub position: [f32; 4],
    /// rgb = color * intensity.
    pub color: [f32; 4],
    /// x = cos(outer angle), y = cos(inner angle), z = 1 for spot lights.
    pub cone: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    /// rgb = summed ambient light.
    pub ambient: [f32; 4],
    /// x = number of valid entries in `lights`.
    pub light_count: [u32; 4],
    pub lights: [GpuLight; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
}

/// sRGB-encoded channel to linear.
fn to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub(crate) fn linear_rgb(color: Color) -> Vec3 {
    Vec3::new(to_linear(color.r), to_linear(color.g), to_linear(color.b))
}

/// Background as a clear color for an sRGB surface.
pub(crate) fn clear_color(color: Color) -> wgpu::Color {
    let c = linear_rgb(color);
    wgpu::Color {
        r: c.x as f64,
        g: c.y as f64,
        b: c.z as f64,
        a: 1.0,
    }
}

pub(crate) fn build_uniforms(scene: &SceneGraph, camera: &CameraState) -> Uniforms {
    let mut ambient = Vec3::ZERO;
    let mut lights = [GpuLight::default(); MAX_LIGHTS];
    let mut count = 0usize;

    for light in scene.lights() {
        match *light {
            Light::Ambient { color, intensity } => {
                ambient += linear_rgb(color) * intensity;
            }
            Light::Point {
                color,
                intensity,
                position,
            } => {
                if count < MAX_LIGHTS {
                    lights[count] = GpuLight {
                        position: position.extend(1.0).to_array(),
                        color: (linear_rgb(color) * intensity).extend(1.0).to_array(),
                        cone: [0.0; 4],
                    };
                    count += 1;
                }
            }
            Light::Spot {
                color,
                intensity,
                position,
                angle,
                penumbra,
            } => {
                if count < MAX_LIGHTS {
                    let outer = angle.cos();
                    let inner = (angle * (1.0 - penumbra)).cos().max(outer + 1e-4);
                    lights[count] = GpuLight {
                        position: position.extend(1.0).to_array(),
                        color: (linear_rgb(color) * intensity).extend(1.0).to_array(),
                        cone: [outer, inner, 1.0, 0.0],
                    };
                    count += 1;
                }
            }
        }
    }

    Uniforms {
        view_proj: camera.view_projection().to_cols_array_2d(),
        ambient: ambient.extend(1.0).to_array(),
        light_count: [count as u32, 0, 0, 0],
        lights,
    }
}

/// Model matrix for a tile: rotation (XYZ Euler) then translation.
pub(crate) fn tile_model(position: Vec3, rotation: Vec3) -> Mat4 {
    let q = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    Mat4::from_rotation_translation(q, position)
}

pub(crate) fn tile_instances(scene: &SceneGraph) -> Vec<InstanceData> {
    scene
        .tiles()
        .iter()
        .map(|tile| {
            let cols = tile_model(tile.position(), tile.rotation()).to_cols_array_2d();
            InstanceData {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
                color: linear_rgb(tile.color()).extend(1.0).to_array(),
            }
        })
        .collect()
}

/// Project a world point to screen coordinates (origin top-left, y down)
/// in a `size`-sized screen. `None` for points behind the camera.
pub fn project_to_screen(view_proj: Mat4, point: Vec3, size: [f32; 2]) -> Option<[f32; 2]> {
    let clip = view_proj * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some([
        (ndc.x * 0.5 + 0.5) * size[0],
        (0.5 - ndc.y * 0.5) * size[1],
    ])
}

/// Unit cube, matching a 1x1x1 box.
pub(crate) fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0], [[-p, -p, p], [p, -p, p], [p, p, p], [-p, p, p]]),
        ([0.0, 0.0, -1.0], [[p, -p, -p], [-p, -p, -p], [-p, p, -p], [p, p, -p]]),
        ([1.0, 0.0, 0.0], [[p, -p, p], [p, -p, -p], [p, p, -p], [p, p, p]]),
        ([-1.0, 0.0, 0.0], [[-p, -p, -p], [-p, -p, p], [-p, p, p], [-p, p, -p]]),
        ([0.0, 1.0, 0.0], [[-p, p, p], [p, p, p], [p, p, -p], [-p, p, -p]]),
        ([0.0, -1.0, 0.0], [[-p, -p, -p], [p, -p, -p], [p, -p, p], [-p, -p, p]]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u16;
        vertices.extend(corners.iter().map(|&position| Vertex { position, normal }));
        indices.extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_scene::Layout;

    fn grid() -> (SceneGraph, CameraState) {
        (
            SceneGraph::build(&Layout::Grid.scene_spec()).unwrap(),
            CameraState::from_preset(&Layout::Grid.view(), 800.0 / 600.0),
        )
    }

    #[test]
    fn uniform_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GpuLight>(), 48);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<Uniforms>(), 64 + 16 + 16 + 48 * MAX_LIGHTS);
    }

    #[test]
    fn grid_uniforms_have_ambient_and_one_point_light() {
        let (scene, camera) = grid();
        let u = build_uniforms(&scene, &camera);
        assert_eq!(u.light_count[0], 1);
        assert!((u.ambient[0] - 0.5).abs() < 1e-6);
        assert_eq!(&u.lights[0].position[..3], &[5.0, 5.0, 5.0]);
        assert_eq!(u.lights[0].cone[2], 0.0);
    }

    #[test]
    fn spot_light_cone_is_ordered() {
        let scene = SceneGraph::build(&Layout::Row.scene_spec()).unwrap();
        let camera = CameraState::from_preset(&Layout::Row.view(), 1.0);
        let u = build_uniforms(&scene, &camera);
        let cone = u.lights[0].cone;
        assert_eq!(cone[2], 1.0);
        assert!(cone[1] > cone[0], "inner cos must exceed outer cos");
    }

    #[test]
    fn instances_follow_tiles() {
        let (mut scene, _) = grid();
        scene.advance_all(Vec3::new(0.5, 0.25, 0.0));
        let instances = tile_instances(&scene);
        assert_eq!(instances.len(), 6);
        // Translation lives in the last column.
        assert_eq!(&instances[0].model_3[..3], &[-2.0, 2.0, 0.0]);
        assert_eq!(instances[0].color[3], 1.0);
    }

    #[test]
    fn zero_rotation_model_is_pure_translation() {
        let m = tile_model(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        assert_eq!(m, Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let (_, camera) = grid();
        let p = project_to_screen(camera.view_projection(), Vec3::ZERO, [800.0, 600.0]).unwrap();
        assert!((p[0] - 400.0).abs() < 1e-3);
        assert!((p[1] - 300.0).abs() < 1e-3);
    }

    #[test]
    fn points_above_center_project_upwards() {
        let (_, camera) = grid();
        let p = project_to_screen(camera.view_projection(), Vec3::Y, [800.0, 600.0]).unwrap();
        assert!(p[1] < 300.0);
    }

    #[test]
    fn points_behind_camera_are_not_projected() {
        let (_, camera) = grid();
        let behind = Vec3::new(0.0, 0.0, 10.0);
        assert!(project_to_screen(camera.view_projection(), behind, [800.0, 600.0]).is_none());
    }

    #[test]
    fn cube_has_six_faces() {
        let (verts, indices) = cube_mesh();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < verts.len()));
    }

    #[test]
    fn linear_conversion_endpoints() {
        assert_eq!(linear_rgb(Color::BLACK), Vec3::ZERO);
        assert!((linear_rgb(Color::WHITE) - Vec3::ONE).length() < 1e-6);
    }
}
