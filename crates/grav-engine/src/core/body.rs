//! The player's kinematic body: integration, ground probing, auto-walk
//! and axis-separated tile collision.
//!
//! Everything here happens inside one authoritative tick function,
//! [`KinematicBody::update`], driven at a fixed dt by the scheduler.
//! Collision is resolved per axis, X before Y, never merged into a
//! diagonal sweep. The order is load-bearing: it keeps resolution
//! unambiguous at tile corners and guarantees the integer box starts
//! every tick outside all solid tiles.

use glam::Vec2;

use crate::components::tilemap::{Rect, TileQuery};
use crate::core::error::EngineError;
use crate::core::gravity::{GravityDir, GravityField};

/// Auto-walk speed along the walk axis, px/s.
pub const WALK_SPEED: f32 = 80.0;
/// Cap on the gravity-axis velocity component, px/s.
pub const MAX_FALL_SPEED: f32 = 1000.0;
/// Per-tick damping of the gravity-axis component while grounded.
pub const GROUND_FRICTION: f32 = 0.8;
/// How far beyond the leading face the ground probe samples, px.
pub const GROUND_PROBE_DEPTH: i32 = 5;
/// Default bounding box extents, px.
pub const BODY_WIDTH: u32 = 28;
pub const BODY_HEIGHT: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// The single dynamic actor of the simulation.
///
/// Position is the floating-point top-left of the bounding box; all
/// tile queries go through the integer-truncated box, which never
/// diverges from `pos` by more than sub-pixel rounding.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    pos: Vec2,
    vel: Vec2,
    width: u32,
    height: u32,
    alive: bool,
    grounded: bool,
    facing_positive: bool,
}

impl KinematicBody {
    /// Create a body with an explicit bounding box. Fails fast on a
    /// zero-area box rather than letting probe math divide by zero.
    pub fn new(x: f32, y: f32, width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::DegenerateGeometry { width, height });
        }
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite spawn position");
        Ok(Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            width,
            height,
            alive: true,
            grounded: false,
            facing_positive: true,
        })
    }

    /// Create a body with the default player box.
    pub fn with_default_size(x: f32, y: f32) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite spawn position");
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            width: BODY_WIDTH,
            height: BODY_HEIGHT,
            alive: true,
            grounded: false,
            facing_positive: true,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The integer bounding box used for all tile queries.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x as i32,
            self.pos.y as i32,
            self.width as i32,
            self.height as i32,
        )
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Auto-walk direction: positive means +X under vertical gravity,
    /// +Y under horizontal gravity.
    pub fn facing_positive(&self) -> bool {
        self.facing_positive
    }

    /// Mark the body dead. Dead bodies no longer integrate.
    pub fn kill(&mut self) {
        self.alive = false;
        self.vel = Vec2::ZERO;
    }

    /// Re-spawn at a new position with all state back to initial values.
    /// Calling this twice in a row is the same as calling it once.
    pub fn reset(&mut self, x: f32, y: f32) {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite reset position");
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::ZERO;
        self.alive = true;
        self.grounded = false;
        self.facing_positive = true;
    }

    /// Advance the body by one fixed tick. No-op for a dead body.
    ///
    /// Tick order: integrate gravity, clamp the gravity-axis velocity,
    /// probe the ground, apply ground friction, overwrite the walk-axis
    /// velocity, move and resolve X then Y, re-probe the ground.
    pub fn update(&mut self, dt: f32, gravity: &GravityField, tiles: &impl TileQuery) {
        if !self.alive {
            return;
        }

        self.vel += gravity.acceleration_vector() * dt;
        self.clamp_fall_speed(gravity.direction());

        self.grounded = self.probe_ground(gravity.direction(), tiles);

        if self.grounded {
            let walk = if self.facing_positive {
                WALK_SPEED
            } else {
                -WALK_SPEED
            };
            match gravity.direction() {
                GravityDir::Down | GravityDir::Up => {
                    // Friction damps only the gravity-axis component; the
                    // walk axis is overwritten outright, never damped.
                    self.vel.y *= GROUND_FRICTION;
                    self.vel.x = walk;
                }
                GravityDir::Left | GravityDir::Right => {
                    self.vel.x *= GROUND_FRICTION;
                    self.vel.y = walk;
                }
            }
        }

        self.pos.x += self.vel.x * dt;
        self.resolve_axis(Axis::X, gravity.direction(), tiles);
        self.pos.y += self.vel.y * dt;
        self.resolve_axis(Axis::Y, gravity.direction(), tiles);

        // Resolution can change contact (e.g. landing on a Y stop).
        self.grounded = self.probe_ground(gravity.direction(), tiles);
    }

    /// Clamp the velocity component along the gravity axis to
    /// `MAX_FALL_SPEED`, leaving the perpendicular component alone.
    fn clamp_fall_speed(&mut self, dir: GravityDir) {
        match dir {
            GravityDir::Down | GravityDir::Up => {
                self.vel.y = self.vel.y.clamp(-MAX_FALL_SPEED, MAX_FALL_SPEED);
            }
            GravityDir::Left | GravityDir::Right => {
                self.vel.x = self.vel.x.clamp(-MAX_FALL_SPEED, MAX_FALL_SPEED);
            }
        }
    }

    /// Sample five points just beyond the leading face in the gravity
    /// direction: both corners, the quarter points and the midpoint.
    /// Grounded if any of them is solid. Multiple samples avoid false
    /// negatives when the contact face only partially overlaps a tile.
    fn probe_ground(&self, dir: GravityDir, tiles: &impl TileQuery) -> bool {
        let r = self.rect();
        match dir {
            GravityDir::Down | GravityDir::Up => {
                let probe_y = match dir {
                    GravityDir::Down => r.bottom() - 1 + GROUND_PROBE_DEPTH,
                    _ => r.y - GROUND_PROBE_DEPTH,
                };
                Self::face_offsets(r.w)
                    .into_iter()
                    .any(|off| tiles.is_solid(r.x + off, probe_y))
            }
            GravityDir::Left | GravityDir::Right => {
                let probe_x = match dir {
                    GravityDir::Right => r.right() - 1 + GROUND_PROBE_DEPTH,
                    _ => r.x - GROUND_PROBE_DEPTH,
                };
                Self::face_offsets(r.h)
                    .into_iter()
                    .any(|off| tiles.is_solid(probe_x, r.y + off))
            }
        }
    }

    /// Sample offsets along a face of the given extent, staying inside
    /// the box footprint so corners never probe a neighboring column.
    fn face_offsets(extent: i32) -> [i32; 5] {
        [0, extent / 4, extent / 2, 3 * extent / 4, extent - 1]
    }

    /// Resolve overlap with solid tiles along one axis.
    ///
    /// Only the tiles under the box footprint are examined. Moving in
    /// the positive direction snaps the trailing edge to the nearest
    /// tile edge ahead; negative, the reverse. The snapped integer
    /// coordinate is written back into the float position and the axis
    /// velocity is zeroed. Hitting a wall along the walk axis while
    /// grounded reverses the auto-walk direction.
    fn resolve_axis(&mut self, axis: Axis, dir: GravityDir, tiles: &impl TileQuery) {
        let ts = tiles.tile_size();
        let r = self.rect();
        let tx0 = r.x.div_euclid(ts);
        let tx1 = (r.right() - 1).div_euclid(ts);
        let ty0 = r.y.div_euclid(ts);
        let ty1 = (r.bottom() - 1).div_euclid(ts);

        let mut nearest_ahead = i32::MAX;
        let mut nearest_behind = i32::MIN;
        let mut hit = false;
        for ty in ty0..=ty1 {
            for tx in tx0..=tx1 {
                // A tile is identified by its top-left pixel.
                if !tiles.is_solid(tx * ts, ty * ts) {
                    continue;
                }
                hit = true;
                let (lead, trail) = match axis {
                    Axis::X => (tx * ts, tx * ts + ts),
                    Axis::Y => (ty * ts, ty * ts + ts),
                };
                nearest_ahead = nearest_ahead.min(lead);
                nearest_behind = nearest_behind.max(trail);
            }
        }
        if !hit {
            return;
        }

        let moving = match axis {
            Axis::X => self.vel.x,
            Axis::Y => self.vel.y,
        };
        if moving == 0.0 {
            // Overlap without motion on this axis; direction of escape
            // is unknowable, leave it for the other axis.
            return;
        }

        match (axis, moving > 0.0) {
            (Axis::X, true) => self.pos.x = (nearest_ahead - r.w) as f32,
            (Axis::X, false) => self.pos.x = nearest_behind as f32,
            (Axis::Y, true) => self.pos.y = (nearest_ahead - r.h) as f32,
            (Axis::Y, false) => self.pos.y = nearest_behind as f32,
        }
        match axis {
            Axis::X => self.vel.x = 0.0,
            Axis::Y => self.vel.y = 0.0,
        }

        let walk_axis = if dir.is_vertical() { Axis::X } else { Axis::Y };
        if self.grounded && axis == walk_axis {
            self.facing_positive = !self.facing_positive;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::tilemap::{TileGrid, TileKind};
    use crate::core::gravity::GravityField;

    const DT: f32 = 1.0 / 60.0;

    fn open_grid() -> TileGrid {
        TileGrid::new(50, 50)
    }

    /// A closed 8x6 room: solid border, empty interior.
    /// Interior pixels: x in [32, 224), y in [32, 160).
    fn room() -> TileGrid {
        TileGrid::from_ascii(&[
            "########",
            "#......#",
            "#......#",
            "#......#",
            "#......#",
            "########",
        ])
    }

    fn assert_not_interpenetrating(body: &KinematicBody, grid: &TileGrid) {
        let r = body.rect();
        for ty in (r.y.div_euclid(32))..=((r.bottom() - 1).div_euclid(32)) {
            for tx in (r.x.div_euclid(32))..=((r.right() - 1).div_euclid(32)) {
                assert_ne!(
                    grid.get(tx, ty),
                    TileKind::Solid,
                    "box {:?} overlaps solid tile ({tx},{ty})",
                    r
                );
            }
        }
    }

    #[test]
    fn degenerate_box_is_rejected() {
        assert_eq!(
            KinematicBody::new(0.0, 0.0, 0, 28).unwrap_err(),
            EngineError::DegenerateGeometry { width: 0, height: 28 }
        );
        assert!(KinematicBody::new(0.0, 0.0, 28, 28).is_ok());
    }

    #[test]
    fn free_fall_matches_v_equals_gt() {
        let gravity = GravityField::new(900.0);
        let grid = open_grid();
        let mut body = KinematicBody::with_default_size(300.0, 100.0);
        for _ in 0..60 {
            body.update(DT, &gravity, &grid);
        }
        // One second of fall: v = S * t, x untouched.
        assert!((body.vel().y - 900.0).abs() < 1.0, "vel.y = {}", body.vel().y);
        assert_eq!(body.vel().x, 0.0);
        assert!(!body.is_grounded());
    }

    #[test]
    fn fall_speed_is_clamped_on_gravity_axis_only() {
        let gravity = GravityField::new(5000.0);
        let grid = open_grid();
        let mut body = KinematicBody::with_default_size(300.0, 0.0);
        for _ in 0..600 {
            body.update(DT, &gravity, &grid);
        }
        assert!(body.vel().y <= MAX_FALL_SPEED);
        assert!(body.vel().y >= MAX_FALL_SPEED - 1.0);
    }

    #[test]
    fn one_tick_on_floor_grounds_and_damps() {
        let gravity = GravityField::new(900.0);
        let grid = room();
        // Bottom flush on the floor (floor top at y = 160).
        let mut body = KinematicBody::with_default_size(64.0, 132.0);
        body.update(DT, &gravity, &grid);
        assert!(body.is_grounded());
        // Integrated to 15 px/s, then damped by ground friction. The
        // first tick's 0.2 px drift does not reach the next pixel row,
        // so no Y snap fires yet.
        assert!((body.vel().y - 15.0 * GROUND_FRICTION).abs() < 1e-3);
    }

    #[test]
    fn resting_velocity_stays_near_zero() {
        let gravity = GravityField::new(900.0);
        let grid = room();
        let mut body = KinematicBody::with_default_size(64.0, 132.0);
        for _ in 0..120 {
            body.update(DT, &gravity, &grid);
            assert!(body.is_grounded());
            // Gravity-axis drift converges to a sub-pixel-per-tick
            // sawtooth instead of diverging.
            assert!(body.vel().y.abs() < 40.0, "vel.y = {}", body.vel().y);
            // The box hovers on the floor line, never inside it.
            assert!(body.rect().bottom() <= 161);
            assert_not_interpenetrating(&body, &grid);
        }
    }

    #[test]
    fn grounded_body_auto_walks() {
        let gravity = GravityField::new(900.0);
        let grid = room();
        let mut body = KinematicBody::with_default_size(64.0, 132.0);
        let x0 = body.pos().x;
        for _ in 0..10 {
            body.update(DT, &gravity, &grid);
        }
        assert!(body.pos().x > x0);
        assert_eq!(body.vel().x, WALK_SPEED);
    }

    #[test]
    fn wall_hit_reverses_walk_and_snaps_to_edge() {
        let gravity = GravityField::new(900.0);
        let grid = room();
        let mut body = KinematicBody::with_default_size(64.0, 132.0);

        let mut flipped_at = None;
        for tick in 0..600 {
            body.update(DT, &gravity, &grid);
            if !body.facing_positive() {
                flipped_at = Some(tick);
                break;
            }
        }
        assert!(flipped_at.is_some(), "never reached the right wall");
        // Trailing edge sits exactly on the wall's leading edge, and the
        // walk-axis velocity was zeroed on the impact tick.
        assert_eq!(body.rect().right(), 224);
        assert_eq!(body.vel().x, 0.0);

        // It walks back the other way afterwards.
        body.update(DT, &gravity, &grid);
        assert_eq!(body.vel().x, -WALK_SPEED);
    }

    #[test]
    fn airborne_wall_hit_does_not_flip_facing() {
        let gravity = GravityField::new(900.0);
        // A lone pillar, no floor: the body falls past it, grazing its
        // side, and must keep its facing.
        let mut grid = TileGrid::new(20, 20);
        grid.set(5, 5, TileKind::Solid);
        let mut body = KinematicBody::with_default_size(140.0, 100.0);
        for _ in 0..120 {
            body.update(DT, &gravity, &grid);
            assert!(body.facing_positive());
        }
    }

    #[test]
    fn walks_on_ceiling_under_inverted_gravity() {
        let mut gravity = GravityField::new(900.0);
        gravity.set_direction(GravityDir::Up);
        let grid = room();
        // Top flush against the ceiling (ceiling bottom at y = 32).
        let mut body = KinematicBody::with_default_size(64.0, 32.0);
        body.update(DT, &gravity, &grid);
        assert!(body.is_grounded());
        for _ in 0..60 {
            body.update(DT, &gravity, &grid);
            assert!(body.is_grounded());
            assert!(body.rect().y >= 31);
            assert_not_interpenetrating(&body, &grid);
        }
        assert_eq!(body.vel().x, WALK_SPEED);
    }

    #[test]
    fn horizontal_gravity_lands_on_wall_and_walks_vertically() {
        let mut gravity = GravityField::new(900.0);
        gravity.set_direction(GravityDir::Right);
        let grid = room();
        let mut body = KinematicBody::with_default_size(64.0, 64.0);

        let mut landed = false;
        for _ in 0..600 {
            body.update(DT, &gravity, &grid);
            if body.is_grounded() {
                landed = true;
                break;
            }
        }
        assert!(landed, "never landed on the right wall");
        // The probe grounds a few px early; give the snap a couple of
        // ticks to bring the box flush.
        for _ in 0..5 {
            body.update(DT, &gravity, &grid);
        }
        assert_eq!(body.rect().right(), 224);

        // Walk axis is now Y; the body creeps along the wall until the
        // floor stops it and flips the facing.
        let mut flipped = false;
        for _ in 0..600 {
            body.update(DT, &gravity, &grid);
            assert_not_interpenetrating(&body, &grid);
            if !body.facing_positive() {
                flipped = true;
                assert_eq!(body.vel().y, 0.0);
                assert_eq!(body.rect().bottom(), 160);
                break;
            }
        }
        assert!(flipped, "never bounced off the floor while wall-walking");
    }

    #[test]
    fn rotating_gravity_midflight_stays_finite() {
        let mut gravity = GravityField::new(900.0);
        let grid = open_grid();
        let mut body = KinematicBody::with_default_size(300.0, 100.0);
        for _ in 0..30 {
            body.update(DT, &gravity, &grid);
        }
        let falling = body.vel().y;
        assert!(falling > 0.0);

        // Rotate down -> right: the old fall velocity becomes walk-axis
        // velocity with no reset, and nothing goes non-finite.
        gravity.set_direction(GravityDir::Right);
        for _ in 0..30 {
            body.update(DT, &gravity, &grid);
            assert!(body.vel().is_finite());
            assert!(body.pos().is_finite());
        }
        assert!(body.vel().x > 0.0);
        // Y was never clamped or overwritten after the switch.
        assert!((body.vel().y - falling).abs() < 1e-3);
    }

    #[test]
    fn dead_body_does_not_integrate() {
        let gravity = GravityField::new(900.0);
        let grid = open_grid();
        let mut body = KinematicBody::with_default_size(300.0, 100.0);
        body.kill();
        let pos = body.pos();
        for _ in 0..10 {
            body.update(DT, &gravity, &grid);
        }
        assert_eq!(body.pos(), pos);
        assert_eq!(body.vel(), Vec2::ZERO);
        assert!(!body.is_alive());
    }

    #[test]
    fn reset_is_idempotent() {
        let gravity = GravityField::new(900.0);
        let grid = room();
        let mut body = KinematicBody::with_default_size(64.0, 132.0);
        for _ in 0..20 {
            body.update(DT, &gravity, &grid);
        }
        body.kill();

        body.reset(50.0, 60.0);
        let once = body.clone();
        body.reset(50.0, 60.0);

        assert_eq!(body.pos(), once.pos());
        assert_eq!(body.vel(), Vec2::ZERO);
        assert!(body.is_alive());
        assert!(!body.is_grounded());
        assert!(body.facing_positive());
    }
}
