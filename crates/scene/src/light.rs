use glam::Vec3;
use showcase_common::Color;

/// A light source in the scene. Lights never move after the graph is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light applied to every surface.
    Ambient { color: Color, intensity: f32 },
    /// Omnidirectional light at a point.
    Point {
        color: Color,
        intensity: f32,
        position: Vec3,
    },
    /// Cone light aimed at the scene origin.
    Spot {
        color: Color,
        intensity: f32,
        position: Vec3,
        /// Half-angle of the cone in radians.
        angle: f32,
        /// Fraction of the cone that fades out, in [0, 1].
        penumbra: f32,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::Ambient { color, intensity }
    }

    pub fn point(color: Color, intensity: f32, position: Vec3) -> Self {
        Self::Point {
            color,
            intensity,
            position,
        }
    }

    pub fn spot(color: Color, intensity: f32, position: Vec3, angle: f32, penumbra: f32) -> Self {
        Self::Spot {
            color,
            intensity,
            position,
            angle,
            penumbra: penumbra.clamp(0.0, 1.0),
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Self::Ambient { intensity, .. }
            | Self::Point { intensity, .. }
            | Self::Spot { intensity, .. } => *intensity,
        }
    }

    /// Position for positional lights, `None` for ambient.
    pub fn position(&self) -> Option<Vec3> {
        match self {
            Self::Ambient { .. } => None,
            Self::Point { position, .. } | Self::Spot { position, .. } => Some(*position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_has_no_position() {
        let l = Light::ambient(Color::WHITE, 0.5);
        assert_eq!(l.position(), None);
        assert_eq!(l.intensity(), 0.5);
    }

    #[test]
    fn spot_clamps_penumbra() {
        let l = Light::spot(Color::WHITE, 1.0, Vec3::splat(10.0), 0.3, 4.0);
        assert!(matches!(l, Light::Spot { penumbra, .. } if penumbra == 1.0));
        assert_eq!(l.position(), Some(Vec3::splat(10.0)));
    }
}
