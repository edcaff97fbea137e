//! Error types for grid access, controller sequencing and configuration.

use thiserror::Error;

/// Precondition failures on the grid.
///
/// None of these happen in nominal play; they signal a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinates outside the board
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfRange { x: i32, y: i32 },
    /// Operation not allowed in the cell's current state
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CascadeError {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// `resume` called with a token that is not the outstanding one
    #[error("resume token {got} does not match the pending step")]
    StaleToken { got: u32 },
    #[error("controller has not been started")]
    NotStarted,
    /// Settings rejected by `GameSettings::validate`
    #[error("invalid settings: {0}")]
    Settings(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("unparsable configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
