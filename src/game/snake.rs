use std::collections::VecDeque;
use std::time::Duration;

use super::config::{GameConfig, TICK_BASE_MS};
use super::direction::Direction;
use super::food::Food;
use super::geometry::{Board, Point};

/// Speed bounds and timed ramp settings a snake is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedProfile {
    pub initial: u32,
    pub min: u32,
    pub max: u32,
    /// Speed added each time the ramp deadline passes
    pub ramp_step: u32,
    pub ramp_period: Duration,
}

impl From<&GameConfig> for SpeedProfile {
    fn from(config: &GameConfig) -> Self {
        Self {
            initial: config.initial_speed,
            min: config.min_speed,
            max: config.max_speed,
            ramp_step: config.speedup_factor,
            ramp_period: Duration::from_millis(config.speedup_period_ms),
        }
    }
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

/// The snake in the game
///
/// Body segments are stored head first. Times passed in (`started_at`, `now`)
/// are readings of the engine's clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    board: Board,
    body: VecDeque<Point>,
    heading: Direction,
    /// Heading used by the most recent committed move
    last_moved: Option<Direction>,
    speed: u32,
    profile: SpeedProfile,
    score: u32,
    session_start: Duration,
    next_speed_up_at: Option<Duration>,
}

impl Snake {
    /// Spawn a snake at the board centre as described by the configuration
    pub fn new(config: &GameConfig, started_at: Duration) -> Self {
        let board = config.board();
        Self::spawn(
            board,
            board.center(),
            config.initial_snake_length,
            SpeedProfile::from(config),
            started_at,
        )
    }

    /// Spawn a snake heading up with its body trailing straight down from `head`
    pub fn spawn(
        board: Board,
        head: Point,
        length: usize,
        profile: SpeedProfile,
        started_at: Duration,
    ) -> Self {
        let body = (0..length.max(1) as i32)
            .map(|i| Point::new(head.x, head.y + i))
            .collect();

        Self {
            board,
            body,
            heading: Direction::Up,
            last_moved: None,
            speed: profile.initial,
            profile,
            score: 0,
            session_start: started_at,
            next_speed_up_at: None,
        }
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn last_moved_heading(&self) -> Option<Direction> {
        self.last_moved
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a spawned snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn session_start(&self) -> Duration {
        self.session_start
    }

    pub fn next_speed_up_at(&self) -> Option<Duration> {
        self.next_speed_up_at
    }

    /// Advance one cell along the heading.
    ///
    /// Runs the timed speed ramp first. A step that would leave the board is
    /// dropped without touching the body; callers detect the wall separately
    /// with [`Snake::check_wall_collision`]. Returns whether the snake moved.
    pub fn move_forward(&mut self, now: Duration) -> bool {
        self.natural_speed_up(now);

        let next = self.head().step(self.heading);
        if !self.board.contains(next) {
            return false;
        }

        self.body.push_front(next);
        self.body.pop_back();
        self.last_moved = Some(self.heading);
        true
    }

    /// Request a new heading. Reversals are ignored; returns whether accepted.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        // The neck sits behind the last committed move, so reversing that is
        // fatal even if the heading has since changed.
        if self
            .last_moved
            .is_some_and(|moved| moved.is_opposite(requested))
        {
            return false;
        }
        if self.heading.is_opposite(requested) {
            return false;
        }
        self.heading = requested;
        true
    }

    /// Duplicate the tail segment; the copy separates on the next move
    pub fn grow(&mut self) {
        if let Some(&tail) = self.body.back() {
            self.body.push_back(tail);
        }
    }

    pub fn check_food_collision(&self, food: &Food) -> bool {
        self.body.contains(&food.position)
    }

    /// Head overlaps any other segment
    pub fn check_body_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    /// Head sits on the edge the current heading points at
    pub fn check_wall_collision(&self) -> bool {
        let head = self.head();
        match self.heading {
            Direction::Up => head.y == 0,
            Direction::Down => head.y == self.board.height() - 1,
            Direction::Left => head.x == 0,
            Direction::Right => head.x == self.board.width() - 1,
        }
    }

    /// Shift speed by `delta`. A change that would leave the allowed range is
    /// rejected outright rather than clamped. Returns whether it applied.
    pub fn speed_up(&mut self, delta: i32) -> bool {
        match self.speed.checked_add_signed(delta) {
            Some(next) if (self.profile.min..=self.profile.max).contains(&next) => {
                self.speed = next;
                true
            }
            _ => false,
        }
    }

    /// Delay before the next tick; higher speed means a shorter delay
    pub fn tick_interval_ms(&self) -> u32 {
        TICK_BASE_MS.saturating_sub(self.speed)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval_ms()))
    }

    /// Timed speed ramp.
    ///
    /// The first call only arms the deadline one period after the session
    /// started. Each later call past the deadline adds one ramp step and
    /// re-arms the deadline one period from `now`. Returns whether speed rose.
    pub fn natural_speed_up(&mut self, now: Duration) -> bool {
        match self.next_speed_up_at {
            None => {
                self.next_speed_up_at = Some(self.session_start + self.profile.ramp_period);
                false
            }
            Some(deadline) if now > deadline => {
                let step = i32::try_from(self.profile.ramp_step).unwrap_or(i32::MAX);
                let applied = self.speed_up(step);
                self.next_speed_up_at = Some(now + self.profile.ramp_period);
                applied
            }
            Some(_) => false,
        }
    }
}
