//! Integration tests for the game lifecycle through the facade crate

use tui_snake::core::{GameSnapshot, GameState, SimpleRng};
use tui_snake::types::{Coordinate, DeathCause, Direction, GameStatus, SnakeError, StepOutcome};

fn paused_game(body: &[(i32, i32)], direction: Direction) -> GameState {
    let snapshot = GameSnapshot {
        width: 40,
        height: 40,
        body: body.iter().map(|&(x, y)| Coordinate::new(x, y)).collect(),
        barriers: Vec::new(),
        bonus: Coordinate::new(39, 0),
        time_from_start: 0,
        direction,
        status: GameStatus::Pause,
        bonus_cnt: 0,
    };
    GameState::from_snapshot(snapshot, SimpleRng::new(3)).unwrap()
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert_eq!(game.status(), GameStatus::Origin);
    assert_eq!(game.score(), 2);
    assert!(game.bonus().is_some());

    game.start().unwrap();
    assert_eq!(game.status(), GameStatus::Running);

    for _ in 0..3 {
        assert_eq!(game.step().unwrap(), StepOutcome::Alive);
    }
    assert_eq!(game.time_elapsed(), 3);

    game.pause().unwrap();
    assert!(game.step().is_err());
    game.resume().unwrap();
    assert_eq!(game.step().unwrap(), StepOutcome::Alive);
}

#[test]
fn test_first_step_moves_head_and_tail() {
    let mut game = paused_game(&[(5, 5), (6, 5)], Direction::Left);
    game.resume().unwrap();

    assert_eq!(game.step().unwrap(), StepOutcome::Alive);
    assert_eq!(
        game.body(),
        &[Coordinate::new(4, 5), Coordinate::new(5, 5)]
    );
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.time_elapsed(), 1);
}

#[test]
fn test_wall_death_leaves_body_alone() {
    let mut game = paused_game(&[(0, 5), (1, 5)], Direction::Left);
    game.resume().unwrap();

    assert_eq!(
        game.step().unwrap(),
        StepOutcome::Dead(DeathCause::Wall)
    );
    assert_eq!(game.status(), GameStatus::Over);
    assert_eq!(
        game.body(),
        &[Coordinate::new(0, 5), Coordinate::new(1, 5)]
    );
    assert_eq!(game.time_elapsed(), 0);
}

#[test]
fn test_turn_around_a_corner() {
    let mut game = paused_game(&[(10, 10), (11, 10)], Direction::Left);
    game.resume().unwrap();

    game.change_direction(Direction::Right);
    game.change_direction(Direction::Down);
    game.step().unwrap();
    assert_eq!(game.head(), Some(Coordinate::new(10, 11)));
    assert_eq!(game.direction(), Direction::Down);

    game.change_direction(Direction::Up);
    game.step().unwrap();
    assert_eq!(game.head(), Some(Coordinate::new(10, 12)));
}

#[test]
fn test_save_resume_round_trip() {
    let mut game = paused_game(&[(20, 20), (21, 20), (22, 20)], Direction::Left);
    game.add_barrier(Coordinate::new(3, 4)).unwrap();
    game.resume().unwrap();
    game.step().unwrap();
    game.step().unwrap();
    game.pause().unwrap();

    let json = game.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["body"][0], "(18, 20)");
    assert_eq!(value["barriers"][0], "(3, 4)");
    assert_eq!(value["timeFromStart"], 2);
    assert_eq!(value["status"], 2);
    assert_eq!(value["direction"], 0);

    let mut restored = GameState::from_json(&json, SimpleRng::new(99)).unwrap();
    assert_eq!(restored.body(), game.body());
    assert_eq!(restored.barriers(), game.barriers());
    assert_eq!(restored.bonus(), game.bonus());
    assert_eq!(restored.time_elapsed(), game.time_elapsed());
    assert_eq!(restored.growth_credits(), game.growth_credits());

    restored.resume().unwrap();
    assert_eq!(restored.step().unwrap(), StepOutcome::Alive);
    assert_eq!(restored.head(), Some(Coordinate::new(17, 20)));
}

#[test]
fn test_pretty_save_is_accepted() {
    let game = paused_game(&[(20, 20), (21, 20)], Direction::Up);
    let pretty = game.to_snapshot().unwrap().to_json_pretty().unwrap();
    let restored = GameState::from_json(&pretty, SimpleRng::new(1)).unwrap();
    assert_eq!(restored.direction(), Direction::Up);
    assert_eq!(restored.status(), GameStatus::Pause);
}

#[test]
fn test_barrier_add_then_erase() {
    let mut game = paused_game(&[(20, 20), (21, 20)], Direction::Left);
    let cell = Coordinate::new(7, 7);

    game.add_barrier(cell).unwrap();
    assert!(game.in_barrier(cell));
    game.erase_barrier(cell).unwrap();
    assert!(game.barriers().is_empty());
    assert_eq!(game.erase_barrier(cell), Err(SnakeError::NotFound(cell)));
}

#[test]
fn test_barrier_kills_snake() {
    let mut game = paused_game(&[(20, 20), (21, 20)], Direction::Left);
    game.add_barrier(Coordinate::new(19, 20)).unwrap();
    game.resume().unwrap();

    assert_eq!(
        game.step().unwrap(),
        StepOutcome::Dead(DeathCause::Barrier)
    );
    assert!(game.start().is_err());

    game.restart();
    assert_eq!(game.status(), GameStatus::Running);
    assert!(game.barriers().is_empty());
    assert_eq!(game.score(), 2);
}
