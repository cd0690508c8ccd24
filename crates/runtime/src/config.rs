//! Showcase configuration, loaded from YAML or JSON.
//!
//! ```yaml
//! layout: grid
//! camera_scale: 2.0
//! title: My 3D Portfolio
//! tiles:
//!   - { color: "#ff6347", position: [-2, 2, 0], label: Web Development }
//! ```

use serde::Deserialize;
use showcase_scene::{Layout, SceneSpec, TileSpec, ViewPreset};
use std::path::{Path, PathBuf};

/// Errors from loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("camera_scale must be finite, got {0}")]
    InvalidScale(f32),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    /// Preset providing background, lights, camera and default tiles.
    pub layout: Layout,
    /// Replaces the preset's tiles when present.
    pub tiles: Option<Vec<TileSpec>>,
    /// Multiplier from normalized pointer coordinates to camera offset.
    pub camera_scale: f32,
    pub title: String,
    pub subtitle: String,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Grid,
            tiles: None,
            camera_scale: 2.0,
            title: "My 3D Portfolio".into(),
            subtitle: "Move your mouse to interact with the scene!".into(),
        }
    }
}

impl ShowcaseConfig {
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Load from a file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::debug!(path = %path.display(), layout = %config.layout, "config loaded");
        Ok(config)
    }

    /// Configuration for a host: the file at `path` (or defaults), with
    /// `layout` overriding whatever the file says.
    pub fn resolve(path: Option<&Path>, layout: Option<Layout>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(layout) = layout {
            config.layout = layout;
        }
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !self.camera_scale.is_finite() {
            return Err(ConfigError::InvalidScale(self.camera_scale));
        }
        Ok(self)
    }

    /// Scene description: the layout preset, with tiles overridden if given.
    pub fn scene_spec(&self) -> SceneSpec {
        let mut spec = self.layout.scene_spec();
        if let Some(tiles) = &self.tiles {
            spec.tiles = tiles.clone();
        }
        spec
    }

    pub fn view(&self) -> ViewPreset {
        self.layout.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_scene::{SceneError, SceneGraph};
    use std::io::Write;

    #[test]
    fn defaults_to_grid() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.layout, Layout::Grid);
        assert_eq!(config.camera_scale, 2.0);
        assert_eq!(config.scene_spec().tiles.len(), 6);
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = ShowcaseConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ShowcaseConfig::default());
    }

    #[test]
    fn yaml_overrides_tiles() {
        let yaml = r##"
layout: row
camera_scale: 3.5
tiles:
  - { color: "#ff6347", position: [-1, 0, 0], label: Compilers }
  - { color: "0x4169e1", position: [1, 0, 0], label: Databases }
"##;
        let config = ShowcaseConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.layout, Layout::Row);
        assert_eq!(config.camera_scale, 3.5);
        let graph = SceneGraph::build(&config.scene_spec()).unwrap();
        assert_eq!(graph.tile_count(), 2);
        assert_eq!(graph.tiles()[1].label(), "Databases");
        // Row preset lights are kept.
        assert_eq!(graph.lights().len(), 2);
    }

    #[test]
    fn incomplete_tile_fails_at_build() {
        let yaml = r##"
tiles:
  - { color: "#ff6347", label: Nowhere }
"##;
        let config = ShowcaseConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            SceneGraph::build(&config.scene_spec()),
            Err(SceneError::Configuration { index: 0, field: "position" })
        );
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let yaml = r#"tiles: [{ color: "red", position: [0, 0, 0], label: X }]"#;
        assert!(matches!(
            ShowcaseConfig::from_yaml_str(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ShowcaseConfig::from_json_str(r#"{"rotation_speed": 2}"#).is_err());
    }

    #[test]
    fn load_picks_format_by_extension() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"layout": "row", "title": "Lab"}}"#).unwrap();
        let config = ShowcaseConfig::load(json.path()).unwrap();
        assert_eq!(config.layout, Layout::Row);
        assert_eq!(config.title, "Lab");

        let mut yaml = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(yaml, "camera_scale: 1.0").unwrap();
        assert_eq!(ShowcaseConfig::load(yaml.path()).unwrap().camera_scale, 1.0);

        let toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            ShowcaseConfig::load(toml.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(matches!(
            ShowcaseConfig::load(&missing),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn resolve_applies_layout_override() {
        let config = ShowcaseConfig::resolve(None, Some(Layout::Row)).unwrap();
        assert_eq!(config.layout, Layout::Row);
        assert_eq!(config.title, ShowcaseConfig::default().title);

        let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(yaml, "layout: row\ncamera_scale: 4.0").unwrap();
        let config = ShowcaseConfig::resolve(Some(yaml.path()), Some(Layout::Grid)).unwrap();
        assert_eq!(config.layout, Layout::Grid);
        assert_eq!(config.camera_scale, 4.0);
    }
}
