use std::fmt;
use std::time::Duration;

use super::{
    clock::{Clock, SystemClock},
    config::GameConfig,
    direction::Direction,
    error::{ConfigError, EngineError, Result},
    food::{Food, FoodGenerator, FoodKind},
    geometry::{Board, Point},
    snake::Snake,
};

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Fresh engine, waiting for the first restart
    AwaitingStart,
    Running,
    GameOver,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::AwaitingStart => "awaiting start",
            EngineState::Running => "running",
            EngineState::GameOver => "over",
        };
        f.write_str(name)
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake was about to leave the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Everything the front end needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub head: Point,
    pub body: Vec<Point>,
    pub food: Point,
    pub food_kind: FoodKind,
    pub score: u32,
    pub speed: u32,
    pub tick_interval_ms: u32,
    pub state: EngineState,
    /// Why the game ended, once it has
    pub collision: Option<CollisionType>,
    /// Food eaten during the tick that produced this snapshot
    pub ate: Option<FoodKind>,
    pub ticks: u64,
}

/// Owns the board, the snake and the pending food, and advances them one tick
/// at a time.
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    snake: Snake,
    food: Food,
    generator: FoodGenerator,
    clock: Box<dyn Clock>,
    state: EngineState,
    collision: Option<CollisionType>,
    ticks: u64,
}

impl GameEngine {
    /// Create an engine with entropy-seeded food and the wall clock
    pub fn new(config: GameConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let generator = FoodGenerator::new(config.board(), config.food_kinds.clone())?;
        Ok(Self::assemble(config, generator, Box::new(SystemClock::new())))
    }

    /// Create an engine with a fixed food seed and a caller-supplied clock
    pub fn with_parts(
        config: GameConfig,
        seed: u64,
        clock: Box<dyn Clock>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let generator = FoodGenerator::seeded(config.board(), config.food_kinds.clone(), seed)?;
        Ok(Self::assemble(config, generator, clock))
    }

    fn assemble(config: GameConfig, mut generator: FoodGenerator, clock: Box<dyn Clock>) -> Self {
        let board = config.board();
        let snake = Snake::new(&config, clock.now());
        let food = generator.generate();

        Self {
            config,
            board,
            snake,
            food,
            generator,
            clock,
            state: EngineState::AwaitingStart,
            collision: None,
            ticks: 0,
        }
    }

    /// Start a new session, discarding the current one.
    ///
    /// Valid in every state; this is also how the game leaves
    /// [`EngineState::AwaitingStart`].
    pub fn restart(&mut self) {
        self.snake = Snake::new(&self.config, self.clock.now());
        self.food = self.generator.generate();
        self.state = EngineState::Running;
        self.collision = None;
        self.ticks = 0;

        tracing::info!(
            width = self.board.width(),
            height = self.board.height(),
            speed = self.snake.speed(),
            "game started"
        );
    }

    /// Advance the game by one tick.
    ///
    /// Collisions are judged on the position before moving: a snake facing the
    /// wall or overlapping itself ends the game without taking another step.
    pub fn tick(&mut self) -> Result<Snapshot> {
        if self.state != EngineState::Running {
            tracing::warn!(state = %self.state, "tick rejected");
            return Err(EngineError::InvalidState {
                operation: "tick",
                state: self.state,
            });
        }

        if let Some(collision) = self.check_collision() {
            self.state = EngineState::GameOver;
            self.collision = Some(collision);
            tracing::info!(
                ?collision,
                score = self.snake.score(),
                length = self.snake.len(),
                ticks = self.ticks,
                "game over"
            );
            return Ok(self.snapshot_with(None));
        }

        let speed_before = self.snake.speed();
        self.snake.move_forward(self.clock.now());
        if self.snake.speed() != speed_before {
            tracing::debug!(speed = self.snake.speed(), "speed ramped up");
        }

        let mut ate = None;
        if self.snake.check_food_collision(&self.food) {
            self.food.apply(&mut self.snake, self.config.food_speed_delta);
            ate = Some(self.food.kind);
            tracing::debug!(
                kind = self.food.kind.label(),
                score = self.snake.score(),
                speed = self.snake.speed(),
                "food eaten"
            );
            self.food = self.generator.generate();
        }

        self.ticks += 1;
        Ok(self.snapshot_with(ate))
    }

    fn check_collision(&self) -> Option<CollisionType> {
        if self.snake.check_body_collision() {
            return Some(CollisionType::SelfCollision);
        }
        if self.snake.check_wall_collision() {
            return Some(CollisionType::Wall);
        }
        None
    }

    /// Queue a heading for the next move; reversals are silently ignored
    pub fn change_direction(&mut self, heading: Direction) {
        self.snake.change_direction(heading);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn collision(&self) -> Option<CollisionType> {
        self.collision
    }

    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    pub fn speed(&self) -> u32 {
        self.snake.speed()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// How long the timing loop should wait before the next tick
    pub fn tick_interval(&self) -> Duration {
        self.snake.tick_interval()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_with(None)
    }

    fn snapshot_with(&self, ate: Option<FoodKind>) -> Snapshot {
        Snapshot {
            head: self.snake.head(),
            body: self.snake.body().iter().copied().collect(),
            food: self.food.position,
            food_kind: self.food.kind,
            score: self.snake.score(),
            speed: self.snake.speed(),
            tick_interval_ms: self.snake.tick_interval_ms(),
            state: self.state,
            collision: self.collision,
            ate,
            ticks: self.ticks,
        }
    }

    /// Replace the pending food; for scripted scenarios
    pub fn place_food(&mut self, food: Food) {
        self.food = food;
    }

    /// Mutable access to the snake; for scripted scenarios
    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }
}
