//! Built-in scene layouts.

use crate::graph::{SceneSpec, TileSpec};
use crate::light::Light;
use glam::Vec3;
use serde::Deserialize;
use showcase_common::Color;
use std::fmt;
use std::str::FromStr;

/// Camera placement and projection a layout is designed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPreset {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// Named tile arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Six tiles on a 3x2 grid facing the camera.
    #[default]
    Grid,
    /// Three tiles in a row, labels floating above, seen from above and behind.
    Row,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Grid, Layout::Row];

    pub fn name(self) -> &'static str {
        match self {
            Layout::Grid => "grid",
            Layout::Row => "row",
        }
    }

    pub fn scene_spec(self) -> SceneSpec {
        match self {
            Layout::Grid => SceneSpec {
                background: Color::from_hex(0x87ceeb),
                tiles: vec![
                    tile(0xff6347, [-2.0, 2.0, 0.0], "Web Development"),
                    tile(0x4169e1, [0.0, 2.0, 0.0], "Mobile App"),
                    tile(0x32cd32, [2.0, 2.0, 0.0], "Data Science"),
                    tile(0x9400d3, [-2.0, 0.0, 0.0], "UI/UX Design"),
                    tile(0xffd700, [0.0, 0.0, 0.0], "Machine Learning"),
                    tile(0x00ced1, [2.0, 0.0, 0.0], "Blockchain"),
                ],
                lights: vec![
                    Light::ambient(Color::WHITE, 0.5),
                    Light::point(Color::WHITE, 1.0, Vec3::new(5.0, 5.0, 5.0)),
                ],
                label_offset: Vec3::new(0.0, 0.8, 0.0),
            },
            Layout::Row => SceneSpec {
                background: Color::from_hex(0x101018),
                tiles: vec![
                    tile(0xff6347, [-3.0, 1.0, 0.0], "Web Development"),
                    tile(0x4169e1, [0.0, 1.0, 0.0], "Mobile App"),
                    tile(0x32cd32, [3.0, 1.0, 0.0], "Data Science"),
                ],
                lights: vec![
                    Light::ambient(Color::WHITE, 0.5),
                    Light::spot(Color::WHITE, 1.0, Vec3::new(10.0, 10.0, 10.0), 0.3, 1.0),
                ],
                label_offset: Vec3::new(0.0, 1.0, 0.0),
            },
        }
    }

    pub fn view(self) -> ViewPreset {
        match self {
            Layout::Grid => ViewPreset {
                position: Vec3::new(0.0, 0.0, 5.0),
                fov_degrees: 75.0,
                near: 0.1,
                far: 1000.0,
            },
            Layout::Row => ViewPreset {
                position: Vec3::new(0.0, 5.0, 15.0),
                fov_degrees: 45.0,
                near: 0.1,
                far: 200.0,
            },
        }
    }
}

fn tile(hex: u32, position: [f32; 3], label: &str) -> TileSpec {
    TileSpec::new(Color::from_hex(hex), Vec3::from_array(position), label)
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown layout {s:?} (expected grid or row)"))
    }
}
