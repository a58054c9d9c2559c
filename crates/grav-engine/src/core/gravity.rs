//! The global gravity vector.
//!
//! Gravity is restricted to the four cardinal directions on purpose:
//! the rest of the engine (ground probing, auto-walk, axis-separated
//! collision) reduces to simple axis comparisons because of it. Keep it
//! an enum with exhaustive matches, never a free angle.

use glam::Vec2;

use crate::core::error::EngineError;

/// Default gravity acceleration in px/s².
pub const G_STRENGTH: f32 = 900.0;

/// One of the four cardinal gravity directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GravityDir {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl GravityDir {
    /// Unit vector pointing along this direction (screen space, +Y down).
    pub fn unit(self) -> Vec2 {
        match self {
            GravityDir::Down => Vec2::new(0.0, 1.0),
            GravityDir::Up => Vec2::new(0.0, -1.0),
            GravityDir::Left => Vec2::new(-1.0, 0.0),
            GravityDir::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Whether gravity acts along the Y axis (walk axis is then X).
    pub fn is_vertical(self) -> bool {
        matches!(self, GravityDir::Down | GravityDir::Up)
    }

    /// Config-file name of this direction.
    pub fn name(self) -> &'static str {
        match self {
            GravityDir::Down => "down",
            GravityDir::Up => "up",
            GravityDir::Left => "left",
            GravityDir::Right => "right",
        }
    }

    /// Parse a direction from its config-file name. Anything outside the
    /// four cardinal names is rejected.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "down" => Ok(GravityDir::Down),
            "up" => Ok(GravityDir::Up),
            "left" => Ok(GravityDir::Left),
            "right" => Ok(GravityDir::Right),
            other => Err(EngineError::InvalidDirection(other.to_string())),
        }
    }
}

/// The global gravity field: a cardinal direction plus a strength.
///
/// Direction changes are plain field writes that take effect on the next
/// integration step. There is no transition or smoothing state; any
/// visual feedback for a rotation is the presentation layer's problem.
#[derive(Debug, Clone)]
pub struct GravityField {
    dir: GravityDir,
    strength: f32,
}

impl GravityField {
    pub fn new(strength: f32) -> Self {
        Self {
            dir: GravityDir::Down,
            strength,
        }
    }

    pub fn direction(&self) -> GravityDir {
        self.dir
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Point gravity in a new cardinal direction. Effective next tick.
    pub fn set_direction(&mut self, dir: GravityDir) {
        self.dir = dir;
    }

    /// Acceleration applied to a falling body, in px/s².
    pub fn acceleration_vector(&self) -> Vec2 {
        self.dir.unit() * self.strength
    }

    /// The current "down" as a unit vector. Falls back to screen-down
    /// when strength is exactly zero so callers never see a zero vector.
    pub fn down_unit(&self) -> Vec2 {
        if self.strength == 0.0 {
            Vec2::new(0.0, 1.0)
        } else {
            self.dir.unit()
        }
    }
}

impl Default for GravityField {
    fn default() -> Self {
        Self::new(G_STRENGTH)
    }
}
