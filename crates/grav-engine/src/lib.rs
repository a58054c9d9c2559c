pub mod api;
pub mod assets;
pub mod components;
pub mod core;

// Re-export key types at crate root for convenience
pub use crate::api::session::{GameSession, SessionConfig, SessionState};
pub use crate::api::types::{DeathCause, GameEvent};
pub use crate::assets::level::{LevelData, LevelSet};
pub use crate::components::tilemap::{Rect, TileGrid, TileKind, TileQuery, TILE_SIZE};
pub use crate::core::body::{
    KinematicBody, BODY_HEIGHT, BODY_WIDTH, GROUND_FRICTION, GROUND_PROBE_DEPTH, MAX_FALL_SPEED,
    WALK_SPEED,
};
pub use crate::core::error::EngineError;
pub use crate::core::gravity::{GravityDir, GravityField, G_STRENGTH};
pub use crate::core::time::{FixedTimestep, MAX_FRAME_DT, TICK_RATE};
