//! The host driving loop: owns the gravity field, the body, the
//! scheduler and the current level, and turns variable frame time into
//! fixed physics ticks plus game events.

use glam::Vec2;

use crate::api::types::{DeathCause, GameEvent};
use crate::assets::level::LevelSet;
use crate::components::tilemap::{TileGrid, TileQuery};
use crate::core::body::KinematicBody;
use crate::core::gravity::{GravityDir, GravityField, G_STRENGTH};
use crate::core::time::{FixedTimestep, TICK_RATE};

/// Session configuration, provided by the host.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Physics tick rate in Hz (default: 60).
    pub tick_rate: f32,
    /// Gravity acceleration in px/s² (default: 900).
    pub gravity_strength: f32,
    /// How far outside the level bounds the body may stray, in px,
    /// before it counts as lost (default: 100).
    pub bounds_margin: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            gravity_strength: G_STRENGTH,
            bounds_margin: 100,
        }
    }
}

/// What the session is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Dead,
    LevelComplete,
}

/// One run of the game: a single body under a single gravity field on
/// the current level, advanced in fixed ticks.
///
/// Everything is plain owned state threaded through `frame`; build as
/// many independent sessions as you like (they share nothing).
pub struct GameSession {
    gravity: GravityField,
    body: KinematicBody,
    timestep: FixedTimestep,
    grid: TileGrid,
    levels: LevelSet,
    level_number: u32,
    bounds_margin: i32,
    timer: f32,
    state: SessionState,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a session on level 1 of the built-in level set.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_levels(config, LevelSet::default())
    }

    /// Start a session on level 1 of a custom level set.
    pub fn with_levels(config: SessionConfig, levels: LevelSet) -> Self {
        let grid = levels.get(1).build();
        let spawn = Self::spawn_top_left(&grid);
        let body = KinematicBody::with_default_size(spawn.x, spawn.y);
        log::info!(
            "session start: level 1 ({}x{} tiles)",
            grid.width(),
            grid.height()
        );
        Self {
            gravity: GravityField::new(config.gravity_strength),
            body,
            timestep: FixedTimestep::from_hz(config.tick_rate),
            grid,
            levels,
            level_number: 1,
            bounds_margin: config.bounds_margin,
            timer: 0.0,
            state: SessionState::Playing,
            events: Vec::new(),
        }
    }

    /// Top-left spawn coordinate that centers the body on the spawn
    /// tile's center, so a freshly spawned box never straddles the
    /// tile row below the spawn point.
    fn spawn_top_left(grid: &TileGrid) -> Vec2 {
        let center = grid.spawn_pos();
        Vec2::new(
            center.x - crate::core::body::BODY_WIDTH as f32 / 2.0,
            center.y - crate::core::body::BODY_HEIGHT as f32 / 2.0,
        )
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn gravity(&self) -> &GravityField {
        &self.gravity
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    /// Run time on the current level, in seconds of simulated time.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Events emitted during the most recent `frame` call.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Point gravity in a new direction. A plain field write observed
    /// by the next tick; legal at any time between frames.
    pub fn rotate_gravity(&mut self, dir: GravityDir) {
        log::debug!("gravity -> {}", dir.name());
        self.gravity.set_direction(dir);
    }

    /// Feed one render frame's elapsed wall-clock seconds. Runs however
    /// many fixed ticks are due and records the events they produced.
    pub fn frame(&mut self, frame_dt: f32) {
        self.events.clear();
        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.tick();
        }
    }

    fn tick(&mut self) {
        if self.state != SessionState::Playing {
            return;
        }
        let dt = self.timestep.dt();
        self.timer += dt;
        self.body.update(dt, &self.gravity, &self.grid);

        let (cx, cy) = self.body.rect().center();
        if self.grid.is_hazard(cx, cy) {
            self.body.kill();
            self.state = SessionState::Dead;
            self.events.push(GameEvent::Died(DeathCause::Hazard));
            log::info!("body died on hazard at ({cx}, {cy})");
        } else if self.grid.is_exit(cx, cy, self.body.rect()) {
            self.state = SessionState::LevelComplete;
            self.events.push(GameEvent::LevelComplete { time: self.timer });
            log::info!("level {} complete in {:.2}s", self.level_number, self.timer);
        } else if !self.grid.bounds().inflate(self.bounds_margin).contains(cx, cy) {
            self.body.kill();
            self.state = SessionState::Dead;
            self.events.push(GameEvent::Died(DeathCause::OutOfBounds));
            log::info!("body left the level bounds");
        }
    }

    /// Restart the current level from its spawn point.
    pub fn restart(&mut self) {
        let spawn = Self::spawn_top_left(&self.grid);
        self.body.reset(spawn.x, spawn.y);
        self.timer = 0.0;
        self.state = SessionState::Playing;
    }

    /// Move on to the next level (clamped to the last one available).
    pub fn advance_level(&mut self) {
        self.level_number += 1;
        self.grid = self.levels.get(self.level_number).build();
        log::info!(
            "level {} loaded ({}x{} tiles)",
            self.level_number,
            self.grid.width(),
            self.grid.height()
        );
        self.restart();
    }
}
