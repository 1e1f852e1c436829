use std::collections::HashSet;
use std::time::Duration;

use grid_snake::game::{
    CollisionType, Direction, EngineError, EngineState, Food, FoodKind, GameConfig, GameEngine,
    ManualClock, Point,
};

fn running_engine(config: GameConfig) -> (GameEngine, ManualClock) {
    let clock = ManualClock::new();
    let mut engine = GameEngine::with_parts(config, 2024, Box::new(clock.clone())).unwrap();
    engine.restart();
    (engine, clock)
}

fn park_food(engine: &mut GameEngine) {
    engine.place_food(Food::new(Point::new(0, 0), FoodKind::Grow));
}

#[test]
fn opening_move_on_default_board() {
    let (mut engine, _) = running_engine(GameConfig::new(20, 20));
    park_food(&mut engine);

    let snake = engine.snake();
    assert_eq!(snake.heading(), Direction::Up);
    assert_eq!(
        snake.body().iter().copied().collect::<Vec<_>>(),
        vec![Point::new(10, 10), Point::new(10, 11), Point::new(10, 12)]
    );

    let snapshot = engine.tick().unwrap();
    assert_eq!(snapshot.head, Point::new(10, 9));
    assert_eq!(
        snapshot.body,
        vec![Point::new(10, 9), Point::new(10, 10), Point::new(10, 11)]
    );
}

#[test]
fn facing_the_top_wall_ends_the_game_in_place() {
    let (mut engine, _) = running_engine(GameConfig::new(20, 20));
    park_food(&mut engine);

    while engine.snake().head().y > 0 {
        engine.tick().unwrap();
    }
    let body_before: Vec<_> = engine.snake().body().iter().copied().collect();
    assert!(engine.snake().check_wall_collision());

    let snapshot = engine.tick().unwrap();
    assert_eq!(snapshot.state, EngineState::GameOver);
    assert_eq!(snapshot.collision, Some(CollisionType::Wall));
    assert_eq!(snapshot.body, body_before);

    assert_eq!(
        engine.tick(),
        Err(EngineError::InvalidState {
            operation: "tick",
            state: EngineState::GameOver
        })
    );
}

#[test]
fn grow_food_on_the_head_cell() {
    let (mut engine, _) = running_engine(GameConfig::new(20, 20));
    engine.place_food(Food::new(Point::new(10, 10), FoodKind::Grow));

    let snapshot = engine.tick().unwrap();
    assert_eq!(snapshot.ate, Some(FoodKind::Grow));
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.body.len(), 4);
    assert!(FoodKind::ALL.contains(&snapshot.food_kind));
    assert!(engine.board().contains(snapshot.food));

    // The duplicated tail separates on the next move.
    park_food(&mut engine);
    let snapshot = engine.tick().unwrap();
    let distinct: HashSet<_> = snapshot.body.iter().collect();
    assert_eq!(distinct.len(), 4);
    assert_eq!(snapshot.score, 1);
}

#[test]
fn replacement_food_comes_from_configured_kinds() {
    let config = GameConfig {
        food_kinds: vec![FoodKind::SlowDown],
        ..GameConfig::new(20, 20)
    };
    let (mut engine, _) = running_engine(config);
    engine.place_food(Food::new(Point::new(10, 9), FoodKind::Grow));

    let snapshot = engine.tick().unwrap();
    assert_eq!(snapshot.ate, Some(FoodKind::Grow));
    assert_eq!(snapshot.food_kind, FoodKind::SlowDown);
}

#[test]
fn speed_ramps_every_period_of_play() {
    let (mut engine, clock) = running_engine(GameConfig::new(20, 20));
    park_food(&mut engine);
    engine.change_direction(Direction::Right);

    engine.tick().unwrap();
    assert_eq!(engine.speed(), 100);

    clock.advance(Duration::from_millis(5_001));
    let snapshot = engine.tick().unwrap();
    assert_eq!(snapshot.speed, 110);
    assert_eq!(snapshot.tick_interval_ms, 90);

    engine.change_direction(Direction::Down);
    clock.advance(Duration::from_millis(5_001));
    engine.tick().unwrap();
    assert_eq!(engine.speed(), 120);
}

#[test]
fn self_collision_ends_the_game() {
    let (mut engine, _) = running_engine(GameConfig::new(20, 20));
    park_food(&mut engine);
    engine.snake_mut().grow();
    engine.snake_mut().grow();

    engine.tick().unwrap();
    engine.change_direction(Direction::Right);
    engine.tick().unwrap();
    engine.change_direction(Direction::Down);
    engine.tick().unwrap();
    engine.change_direction(Direction::Left);
    engine.tick().unwrap();
    assert_eq!(engine.state(), EngineState::Running);

    let snapshot = engine.tick().unwrap();
    assert_eq!(snapshot.state, EngineState::GameOver);
    assert_eq!(snapshot.collision, Some(CollisionType::SelfCollision));
}

#[test]
fn quick_double_turn_cannot_fold_into_the_neck() {
    let (mut engine, _) = running_engine(GameConfig::new(20, 20));
    park_food(&mut engine);
    engine.tick().unwrap();

    engine.change_direction(Direction::Left);
    engine.change_direction(Direction::Down);
    engine.tick().unwrap();

    assert_eq!(engine.snake().head(), Point::new(9, 9));
    assert_eq!(engine.state(), EngineState::Running);
}

#[test]
fn restart_after_game_over() {
    let (mut engine, _) = running_engine(GameConfig::small());
    park_food(&mut engine);
    while engine.is_running() {
        engine.tick().unwrap();
    }

    engine.restart();
    assert_eq!(engine.state(), EngineState::Running);
    assert_eq!(engine.snake().head(), Point::new(5, 5));
    assert_eq!(engine.snake().len(), 3);
    assert_eq!(engine.score(), 0);
    assert!(engine.tick().is_ok());
}
