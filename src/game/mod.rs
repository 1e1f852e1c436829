//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O or rendering
//! dependencies. The front end drives it through [`GameEngine`].

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod geometry;
pub mod snake;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{CollisionType, EngineState, GameEngine, Snapshot};
pub use error::{ConfigError, EngineError};
pub use food::{Food, FoodGenerator, FoodKind};
pub use geometry::{Board, Point};
pub use snake::{SpeedProfile, Snake};
