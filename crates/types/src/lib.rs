//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain values with no I/O, making them usable in any context
//! (engine logic, terminal rendering, save files).
//!
//! # Board Dimensions
//!
//! The default board is a 40x40 grid:
//!
//! - **x** grows to the right (columns `0..width`)
//! - **y** grows downwards (rows `0..height`)
//! - Boards smaller than [`MIN_BOARD_SIDE`] are clamped up to it
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Repaint / input polling interval |
//! | `DEFAULT_STEPS_PER_SECOND` | 10 | Snake speed (100ms per step) |
//! | `MIN_STEPS_PER_SECOND` | 1 | Slowest configurable speed |
//! | `MAX_STEPS_PER_SECOND` | 50 | Fastest configurable speed |
//!
//! # Encodings
//!
//! [`Direction`] and [`GameStatus`] carry stable small-integer encodings that
//! are written into save files. The direction encoding is also what the
//! "no 180° reversal" rule relies on: opposite directions differ only in the
//! lowest bit.
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Coordinate, Direction, GameStatus};
//!
//! let head = Coordinate::new(5, 5);
//! assert_eq!(head.next(Direction::Left), Coordinate::new(4, 5));
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//!
//! let parsed: Coordinate = "(4, 5)".parse().unwrap();
//! assert_eq!(parsed.to_string(), "(4, 5)");
//!
//! assert_eq!(GameStatus::from_index(2), Some(GameStatus::Pause));
//! ```

pub mod coord;
pub mod error;

pub use coord::Coordinate;
pub use error::SnakeError;

/// Default board width in cells
pub const BOARD_WIDTH: i32 = 40;

/// Default board height in cells
pub const BOARD_HEIGHT: i32 = 40;

/// Smallest board side that still fits a freshly seeded snake
pub const MIN_BOARD_SIDE: i32 = 5;

/// Growth credits granted by eating one bonus
pub const BONUS_GROWTH: u32 = 3;

/// Placement attempts before a bonus is accepted even if it lands on the body
pub const BONUS_SPAWN_ATTEMPTS: u32 = 30;

/// Fixed repaint / input polling interval in milliseconds
pub const TICK_MS: u32 = 50;

/// Default snake speed (steps per second)
pub const DEFAULT_STEPS_PER_SECOND: u32 = 10;

/// Slowest configurable speed
pub const MIN_STEPS_PER_SECOND: u32 = 1;

/// Fastest configurable speed
pub const MAX_STEPS_PER_SECOND: u32 = 50;

/// The four headings a snake can take
///
/// The discriminants are the save-file encoding: `Left=0, Right=1, Up=2, Down=3`.
/// Each direction's opposite is its index XOR 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

impl Direction {
    /// All directions in encoding order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Save-file index (0..=3)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Decode a save-file index
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::from_index(0), Some(Direction::Left));
    /// assert_eq!(Direction::from_index(3), Some(Direction::Down));
    /// assert_eq!(Direction::from_index(4), None);
    /// ```
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Direction::Left),
            1 => Some(Direction::Right),
            2 => Some(Direction::Up),
            3 => Some(Direction::Down),
            _ => None,
        }
    }

    /// The direction pointing the other way
    pub fn opposite(self) -> Self {
        match self.index() ^ 1 {
            0 => Direction::Left,
            1 => Direction::Right,
            2 => Direction::Up,
            _ => Direction::Down,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.index() ^ 1 == other.index()
    }

    /// Unit offset `(dx, dy)` for one step in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Game lifecycle state
///
/// - **Origin**: board seeded, snake idle, barriers editable
/// - **Running**: stepping on every move tick
/// - **Pause**: stepping suspended, barriers and speed editable, saving allowed
/// - **Over**: terminal; the board stays frozen for inspection
///
/// The discriminants are the save-file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GameStatus {
    Origin = 0,
    Running = 1,
    Pause = 2,
    Over = 3,
}

impl GameStatus {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(GameStatus::Origin),
            1 => Some(GameStatus::Running),
            2 => Some(GameStatus::Pause),
            3 => Some(GameStatus::Over),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Origin => "origin",
            GameStatus::Running => "running",
            GameStatus::Pause => "paused",
            GameStatus::Over => "over",
        }
    }

    /// Barriers can only be edited while the snake is not moving
    pub fn allows_editing(self) -> bool {
        matches!(self, GameStatus::Origin | GameStatus::Pause)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a step ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Head left the board
    Wall,
    /// Head ran into a barrier
    Barrier,
    /// Head ran into the snake's own body (tail included)
    SelfBody,
}

impl DeathCause {
    pub fn as_str(self) -> &'static str {
        match self {
            DeathCause::Wall => "wall",
            DeathCause::Barrier => "barrier",
            DeathCause::SelfBody => "self",
        }
    }
}

/// Result of a single engine step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Alive,
    Dead(DeathCause),
}

impl StepOutcome {
    pub fn is_alive(self) -> bool {
        matches!(self, StepOutcome::Alive)
    }
}
