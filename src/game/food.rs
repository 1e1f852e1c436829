use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::geometry::{Board, Point};
use super::snake::Snake;

/// What eating a piece of food does to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodKind {
    /// Lengthen the snake by one segment
    Grow,
    /// Raise speed (shorter tick interval)
    SpeedUp,
    /// Lower speed (longer tick interval)
    SlowDown,
}

impl FoodKind {
    pub const ALL: [FoodKind; 3] = [FoodKind::Grow, FoodKind::SpeedUp, FoodKind::SlowDown];

    pub fn label(&self) -> &'static str {
        match self {
            FoodKind::Grow => "grow",
            FoodKind::SpeedUp => "speed up",
            FoodKind::SlowDown => "slow down",
        }
    }
}

/// A piece of food waiting on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(position: Point, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    /// Apply this food's effect to the snake that ate it.
    ///
    /// Every kind is worth one point. `speed_delta` is the amount speed-up and
    /// slow-down food move the snake's speed by; a change that would leave the
    /// allowed range is dropped by the snake.
    pub fn apply(&self, snake: &mut Snake, speed_delta: u32) {
        let delta = i32::try_from(speed_delta).unwrap_or(i32::MAX);
        match self.kind {
            FoodKind::Grow => snake.grow(),
            FoodKind::SpeedUp => {
                snake.speed_up(delta);
            }
            FoodKind::SlowDown => {
                snake.speed_up(-delta);
            }
        }
        snake.add_score(1);
    }
}

/// Produces randomly placed, randomly typed food
///
/// Placement covers the whole board, cells under the snake included.
pub struct FoodGenerator {
    board: Board,
    kinds: Vec<FoodKind>,
    rng: StdRng,
}

impl FoodGenerator {
    /// Generator seeded from OS entropy
    pub fn new(board: Board, kinds: Vec<FoodKind>) -> Result<Self, ConfigError> {
        Self::with_rng(board, kinds, StdRng::from_entropy())
    }

    /// Deterministic generator, same seed gives the same food sequence
    pub fn seeded(board: Board, kinds: Vec<FoodKind>, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(board, kinds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: Board, kinds: Vec<FoodKind>, rng: StdRng) -> Result<Self, ConfigError> {
        if board.width() <= 0 || board.height() <= 0 {
            return Err(ConfigError::EmptyBoard {
                width: board.width(),
                height: board.height(),
            });
        }
        if kinds.is_empty() {
            return Err(ConfigError::NoFoodKinds);
        }
        Ok(Self { board, kinds, rng })
    }

    pub fn generate(&mut self) -> Food {
        let kind = self.kinds[self.rng.gen_range(0..self.kinds.len())];
        let x = self.rng.gen_range(0..self.board.width());
        let y = self.rng.gen_range(0..self.board.height());
        Food::new(Point::new(x, y), kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;
    use std::collections::HashSet;
    use std::time::Duration;

    fn snake() -> Snake {
        let config = GameConfig::default();
        Snake::new(&config, Duration::ZERO)
    }

    #[test]
    fn test_grow_food() {
        let mut snake = snake();
        Food::new(Point::new(0, 0), FoodKind::Grow).apply(&mut snake, 10);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.score(), 1);
        assert_eq!(snake.speed(), 100);
    }

    #[test]
    fn test_speed_foods() {
        let mut snake = snake();
        Food::new(Point::new(0, 0), FoodKind::SpeedUp).apply(&mut snake, 10);
        assert_eq!(snake.speed(), 110);
        assert_eq!(snake.score(), 1);

        Food::new(Point::new(0, 0), FoodKind::SlowDown).apply(&mut snake, 10);
        Food::new(Point::new(0, 0), FoodKind::SlowDown).apply(&mut snake, 10);
        assert_eq!(snake.speed(), 90);
        assert_eq!(snake.score(), 3);
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_slow_down_at_floor_still_scores() {
        let mut snake = snake();
        for _ in 0..5 {
            Food::new(Point::new(0, 0), FoodKind::SlowDown).apply(&mut snake, 10);
        }
        assert_eq!(snake.speed(), 80);
        assert_eq!(snake.score(), 5);
    }

    #[test]
    fn test_oversized_delta_never_inverts() {
        let mut snake = snake();
        Food::new(Point::new(0, 0), FoodKind::SpeedUp).apply(&mut snake, u32::MAX - 9);
        assert_eq!(snake.speed(), 100);

        Food::new(Point::new(0, 0), FoodKind::SlowDown).apply(&mut snake, 1 << 31);
        assert_eq!(snake.speed(), 100);
        assert_eq!(snake.score(), 2);
    }

    #[test]
    fn test_generator_rejects_empty_board() {
        let result = FoodGenerator::new(Board::new(0, 5), FoodKind::ALL.to_vec());
        assert!(matches!(
            result,
            Err(ConfigError::EmptyBoard {
                width: 0,
                height: 5
            })
        ));
        assert!(FoodGenerator::seeded(Board::new(4, -1), FoodKind::ALL.to_vec(), 1).is_err());
    }

    #[test]
    fn test_generator_stays_on_board() {
        let board = Board::new(7, 4);
        let mut generator = FoodGenerator::seeded(board, FoodKind::ALL.to_vec(), 42).unwrap();

        let mut kinds = HashSet::new();
        for _ in 0..500 {
            let food = generator.generate();
            assert!(board.contains(food.position));
            kinds.insert(food.kind);
        }
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn test_generator_respects_configured_kinds() {
        let board = Board::new(10, 10);
        let mut generator = FoodGenerator::seeded(board, vec![FoodKind::SpeedUp], 7).unwrap();

        for _ in 0..100 {
            assert_eq!(generator.generate().kind, FoodKind::SpeedUp);
        }
    }

    #[test]
    fn test_generator_is_deterministic_per_seed() {
        let board = Board::new(20, 20);
        let mut a = FoodGenerator::seeded(board, FoodKind::ALL.to_vec(), 99).unwrap();
        let mut b = FoodGenerator::seeded(board, FoodKind::ALL.to_vec(), 99).unwrap();

        for _ in 0..20 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_generator_requires_kinds() {
        let result = FoodGenerator::new(Board::new(10, 10), Vec::new());
        assert!(matches!(result, Err(ConfigError::NoFoodKinds)));
    }
}
