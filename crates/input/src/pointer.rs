/// Raised when normalization is asked to divide by an empty viewport.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PointerError {
    #[error("viewport must be non-zero to normalize pointer input, got {width}x{height}")]
    ZeroViewport { width: f32, height: f32 },
}

/// Pointer position in normalized device coordinates.
///
/// Inside the viewport both axes lie in [-1, 1] with +y up. Positions
/// outside the viewport map linearly beyond that range and are kept as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub nx: f32,
    pub ny: f32,
}

impl PointerState {
    pub const CENTER: PointerState = PointerState { nx: 0.0, ny: 0.0 };

    pub fn is_inside_viewport(&self) -> bool {
        (-1.0..=1.0).contains(&self.nx) && (-1.0..=1.0).contains(&self.ny)
    }
}

/// Converts raw pointer pixels into [`PointerState`].
pub struct PointerTracker;

impl PointerTracker {
    /// Map a raw pointer position to normalized device coordinates.
    ///
    /// `nx = (x / w) * 2 - 1`, `ny = -(y / h) * 2 + 1`. No clamping.
    pub fn normalize(
        raw_x: f32,
        raw_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<PointerState, PointerError> {
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return Err(PointerError::ZeroViewport {
                width: viewport_width,
                height: viewport_height,
            });
        }
        Ok(PointerState {
            nx: (raw_x / viewport_width) * 2.0 - 1.0,
            ny: -(raw_y / viewport_height) * 2.0 + 1.0,
        })
    }
}
