/// Why the body died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Touched a hazard tile.
    Hazard,
    /// Left the level bounds (plus the configured margin).
    OutOfBounds,
}

/// Events a session emits during a frame, drained by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The body died this frame.
    Died(DeathCause),
    /// The body reached the exit. Carries the run time in seconds.
    LevelComplete { time: f32 },
}
