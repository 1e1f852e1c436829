//! Error types for the game core.

use thiserror::Error;

use super::engine::EngineState;

/// Misuse of the engine by its caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Operation is only valid while the game is running
    #[error("cannot {operation} while the game is {state}")]
    InvalidState {
        operation: &'static str,
        state: EngineState,
    },
}

/// Rejected game configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be between {min}x{min} and {max}x{max} cells, got {width}x{height}")]
    BoardSize {
        width: usize,
        height: usize,
        min: usize,
        max: usize,
    },

    #[error("initial snake length must be at least {min}, got {length}")]
    SnakeTooShort { length: usize, min: usize },

    #[error(
        "snake of length {length} does not fit below the centre of a board {height} cells high \
         (needs a height of at least {min_height})"
    )]
    SnakeDoesNotFit {
        length: usize,
        height: usize,
        min_height: usize,
    },

    #[error("speed range {min}..={max} is invalid (max must stay below {ceiling})")]
    SpeedRange { min: u32, max: u32, ceiling: u32 },

    #[error("initial speed {speed} is outside {min}..={max}")]
    InitialSpeed { speed: u32, min: u32, max: u32 },

    #[error("{name} of {step} exceeds the speed range width {range}")]
    SpeedStep {
        name: &'static str,
        step: u32,
        range: u32,
    },

    #[error("board must have positive dimensions, got {width}x{height}")]
    EmptyBoard { width: i32, height: i32 },

    #[error("at least one food kind must be enabled")]
    NoFoodKinds,

    #[error("speed-up period must be non-zero")]
    ZeroSpeedUpPeriod,
}

pub type Result<T> = std::result::Result<T, EngineError>;
