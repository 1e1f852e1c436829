use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;
use super::food::FoodKind;
use super::geometry::Board;

/// Delay basis for the tick interval: interval = TICK_BASE_MS - speed
pub const TICK_BASE_MS: u32 = 200;

pub const MIN_SPEED: u32 = 80;
pub const MAX_SPEED: u32 = 180;
pub const SPEEDUP_FACTOR: u32 = 10;
pub const SPEEDUP_PERIOD_MS: u64 = 5_000;

/// Smallest snake the engine will spawn
pub const MIN_SNAKE_LENGTH: usize = 3;

const MIN_BOARD_SIDE: usize = 3;
const MAX_BOARD_SIDE: usize = 1024;

/// Configuration for the game
///
/// Every field has a default, so a JSON config file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Speed a new snake starts with
    pub initial_speed: u32,
    /// Lower bound for speed changes
    pub min_speed: u32,
    /// Upper bound for speed changes (must stay below TICK_BASE_MS)
    pub max_speed: u32,
    /// Speed added by each timed ramp step
    pub speedup_factor: u32,
    /// Time between timed ramp steps, in milliseconds
    pub speedup_period_ms: u64,
    /// Speed change applied by speed-up and slow-down food
    pub food_speed_delta: u32,

    /// Food kinds the generator draws from
    pub food_kinds: Vec<FoodKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: MIN_SNAKE_LENGTH,
            initial_speed: 100,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            speedup_factor: SPEEDUP_FACTOR,
            speedup_period_ms: SPEEDUP_PERIOD_MS,
            food_speed_delta: 10,
            food_kinds: FoodKind::ALL.to_vec(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Read a JSON config file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    /// The board described by this configuration
    pub fn board(&self) -> Board {
        Board::new(self.grid_width as i32, self.grid_height as i32)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let side_ok = |side: usize| (MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&side);
        if !side_ok(self.grid_width) || !side_ok(self.grid_height) {
            return Err(ConfigError::BoardSize {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_BOARD_SIDE,
                max: MAX_BOARD_SIDE,
            });
        }

        if self.initial_snake_length < MIN_SNAKE_LENGTH {
            return Err(ConfigError::SnakeTooShort {
                length: self.initial_snake_length,
                min: MIN_SNAKE_LENGTH,
            });
        }

        // The body trails straight down from the centre cell.
        if self.grid_height / 2 + self.initial_snake_length > self.grid_height {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                height: self.grid_height,
                min_height: 2 * self.initial_snake_length - 1,
            });
        }

        if self.min_speed > self.max_speed || self.max_speed >= TICK_BASE_MS {
            return Err(ConfigError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
                ceiling: TICK_BASE_MS,
            });
        }

        if !(self.min_speed..=self.max_speed).contains(&self.initial_speed) {
            return Err(ConfigError::InitialSpeed {
                speed: self.initial_speed,
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        let range = self.max_speed - self.min_speed;
        for (name, step) in [
            ("speedup_factor", self.speedup_factor),
            ("food_speed_delta", self.food_speed_delta),
        ] {
            if step > range {
                return Err(ConfigError::SpeedStep { name, step, range });
            }
        }

        if self.food_kinds.is_empty() {
            return Err(ConfigError::NoFoodKinds);
        }

        if self.speedup_period_ms == 0 {
            return Err(ConfigError::ZeroSpeedUpPeriod);
        }

        Ok(())
    }
}
