//! Grid Snake - a terminal snake game with typed food and a timed speed ramp
//!
//! This library provides:
//! - Core game rules (game module), free of I/O
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
