//! Shared value types used across the showcase crates.

pub mod types;

pub use types::{Color, ColorParseError, TileId};

pub fn crate_info() -> &'static str {
    "showcase-common v0.1.0"
}
