/*
 * Error Module
 *
 * Configuration and arithmetic faults surfaced to callers. Faults inside the
 * drive loop (interrupted waits, poisoned locks) never reach this type; the
 * loop absorbs them and stops cleanly.
 */

#[derive(Debug, thiserror::Error)]
pub enum MoverError {
    #[error("target fps must be positive, got {0}")]
    InvalidTargetFps(u32),
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("velocity limit must be non-negative and finite, got {0}")]
    InvalidLimit(f64),
    #[error("bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },
    #[error("cannot apply force to a massless body")]
    DivideByZero,
    #[error("failed to spawn animation thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type MoverResult<T> = Result<T, MoverError>;
