/// Longest frame delta the scheduler will accept, in seconds.
/// Larger deltas (debugger pause, window drag, machine stall) are
/// clamped so one bad frame cannot queue up unbounded catch-up ticks.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Default physics tick rate in Hz.
pub const TICK_RATE: f32 = 60.0;

/// Fixed timestep accumulator.
/// Converts variable frame deltas into a whole number of constant-size
/// physics ticks, so trajectories do not depend on the render rate.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Build from a tick rate in Hz.
    pub fn from_hz(rate: f32) -> Self {
        Self::new(1.0 / rate)
    }

    /// Add frame time to the accumulator. Returns the number of fixed
    /// steps the caller must run. The frame delta is clamped to
    /// [`MAX_FRAME_DT`] first.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += frame_dt;
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::from_hz(TICK_RATE)
    }
}
