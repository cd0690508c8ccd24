use crate::light::Light;
use glam::Vec3;
use serde::Deserialize;
use showcase_common::{Color, TileId};

/// Errors raised while building a scene graph.
///
/// These are programmer/configuration errors: they surface immediately and
/// are never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("tile #{index} is missing its {field}")]
    Configuration { index: usize, field: &'static str },
    #[error("tile #{index} has an empty label")]
    EmptyLabel { index: usize },
}

/// Description of one tile as it arrives from a preset or a config file.
///
/// Every field is optional at this stage so that a malformed entry can be
/// reported with its index instead of failing deserialization wholesale.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TileSpec {
    pub color: Option<Color>,
    pub position: Option<Vec3>,
    pub label: Option<String>,
}

impl TileSpec {
    pub fn new(color: Color, position: Vec3, label: impl Into<String>) -> Self {
        Self {
            color: Some(color),
            position: Some(position),
            label: Some(label.into()),
        }
    }
}

/// Everything needed to build a scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpec {
    pub background: Color,
    pub tiles: Vec<TileSpec>,
    pub lights: Vec<Light>,
    /// Offset from a tile's position to where its label is drawn.
    pub label_offset: Vec3,
}

/// A single labeled object representing one showcased project.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,
    label: String,
    color: Color,
    position: Vec3,
    rotation: Vec3,
}

impl Tile {
    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler rotation in radians (XYZ order).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }
}

/// The fixed set of tiles and lights composed for rasterization.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    tiles: Vec<Tile>,
    lights: Vec<Light>,
    background: Color,
    label_offset: Vec3,
}

impl SceneGraph {
    /// Build the graph from a spec. Tiles keep the spec's order and start
    /// with zero rotation on every axis.
    pub fn build(spec: &SceneSpec) -> Result<Self, SceneError> {
        let mut tiles = Vec::with_capacity(spec.tiles.len());
        for (index, tile_spec) in spec.tiles.iter().enumerate() {
            let color = tile_spec
                .color
                .ok_or(SceneError::Configuration { index, field: "color" })?;
            let position = tile_spec
                .position
                .ok_or(SceneError::Configuration { index, field: "position" })?;
            let label = tile_spec
                .label
                .clone()
                .ok_or(SceneError::Configuration { index, field: "label" })?;
            if label.trim().is_empty() {
                return Err(SceneError::EmptyLabel { index });
            }
            tiles.push(Tile {
                id: TileId(index),
                label,
                color,
                position,
                rotation: Vec3::ZERO,
            });
        }

        tracing::debug!(
            tiles = tiles.len(),
            lights = spec.lights.len(),
            "scene graph built"
        );

        Ok(Self {
            tiles,
            lights: spec.lights.clone(),
            background: spec.background,
            label_offset: spec.label_offset,
        })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn label_offset(&self) -> Vec3 {
        self.label_offset
    }

    /// World-space anchor for a tile's label.
    pub fn label_anchor(&self, tile: &Tile) -> Vec3 {
        tile.position + self.label_offset
    }

    /// Add `delta` to one tile's rotation. Returns false for an unknown id.
    pub fn advance_rotation(&mut self, id: TileId, delta: Vec3) -> bool {
        match self.tiles.get_mut(id.0) {
            Some(tile) => {
                tile.rotation += delta;
                true
            }
            None => false,
        }
    }

    /// Add `delta` to every tile's rotation.
    pub fn advance_all(&mut self, delta: Vec3) {
        for tile in &mut self.tiles {
            tile.rotation += delta;
        }
    }
}
