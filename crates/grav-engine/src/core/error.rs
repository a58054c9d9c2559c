use thiserror::Error;

/// Errors the engine can report to a caller.
///
/// The simulation itself is a closed numeric system with no I/O, so the
/// taxonomy is narrow: bad construction input and bad config input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A gravity direction name outside the four cardinal directions.
    #[error("unrecognized gravity direction {0:?} (expected down, up, left or right)")]
    InvalidDirection(String),

    /// A body was constructed with a zero-area bounding box.
    #[error("body extents must be positive, got {width}x{height}")]
    DegenerateGeometry { width: u32, height: u32 },
}
