use thiserror::Error;

/// Errors raised by the grid, the edit surface and the pacing controller.
/// A call that returns an error never mutates engine state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
    #[error("rate {rate} must be a finite number greater than zero")]
    InvalidRate { rate: f64 },
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("pattern {name} does not fit at ({row}, {col})")]
    PatternOutOfBounds {
        name: &'static str,
        row: usize,
        col: usize,
    },
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
