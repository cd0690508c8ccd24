use glam::Vec3;
use showcase_common::{Color, TileId};
use showcase_render::RenderEngine;
use showcase_runtime::{LoopState, MountState, Showcase};
use showcase_scene::SceneGraph;

/// Read-only queries over a showcase for overlays, logs and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    pub fn summary<E: RenderEngine>(showcase: &Showcase<E>) -> ShowcaseSummary {
        let camera = showcase.camera();
        ShowcaseSummary {
            mount: showcase.mount_state(),
            loop_state: showcase.loop_state(),
            frames_rendered: showcase.frames_rendered(),
            tile_count: showcase.scene().map_or(0, SceneGraph::tile_count),
            listener_count: showcase.listener_count(),
            camera_position: camera.position(),
            aspect: camera.aspect(),
            viewport: showcase.viewport().size(),
        }
    }

    pub fn inspect_tile(scene: &SceneGraph, id: TileId) -> Option<TileInfo> {
        scene.tile(id).map(|tile| TileInfo {
            id,
            label: tile.label().to_string(),
            color: tile.color(),
            position: tile.position(),
            rotation: tile.rotation(),
        })
    }

    pub fn list_tiles(scene: &SceneGraph) -> Vec<TileInfo> {
        scene
            .tiles()
            .iter()
            .filter_map(|tile| Self::inspect_tile(scene, tile.id()))
            .collect()
    }
}

/// Snapshot of the component's state.
#[derive(Debug, Clone)]
pub struct ShowcaseSummary {
    pub mount: MountState,
    pub loop_state: LoopState,
    pub frames_rendered: u64,
    pub tile_count: usize,
    pub listener_count: usize,
    pub camera_position: Vec3,
    pub aspect: f32,
    pub viewport: (u32, u32),
}

impl std::fmt::Display for ShowcaseSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showcase: {:?}/{:?} frames={} tiles={} listeners={} viewport={}x{} camera=({:.2}, {:.2}, {:.2}) aspect={:.3}",
            self.mount,
            self.loop_state,
            self.frames_rendered,
            self.tile_count,
            self.listener_count,
            self.viewport.0,
            self.viewport.1,
            self.camera_position.x,
            self.camera_position.y,
            self.camera_position.z,
            self.aspect,
        )
    }
}

/// Detailed info about a single tile.
#[derive(Debug, Clone)]
pub struct TileInfo {
    pub id: TileId,
    pub label: String,
    pub color: Color,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl std::fmt::Display for TileInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tile [{}] {:?} {} pos=({:.2}, {:.2}, {:.2})",
            self.id.0,
            self.label,
            self.color,
            self.position.x,
            self.position.y,
            self.position.z,
        )
    }
}
