//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the snake rules, state management and save format.
//! It has **no dependencies** on terminals, windows or file I/O, making it:
//!
//! - **Deterministic**: the same random source produces the same game
//! - **Testable**: every rule can be exercised with scripted randomness
//! - **Portable**: any shell can drive it (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`game_state`]: body, barriers, bonus, direction queue, lifecycle
//! - [`rng`]: the injectable [`RandomSource`] and the seeded [`SimpleRng`]
//! - [`snapshot`]: the JSON save format
//!
//! # Game Rules
//!
//! - **Movement**: one cell per step in the committed direction
//! - **Turning**: queued; the first request that is not a 180° reversal wins
//! - **Death**: leaving the board, hitting a barrier, or hitting any body
//!   cell (the tail included)
//! - **Bonus**: eating it grants 3 growth credits; each step with credits
//!   keeps the old tail
//! - **Score**: the body length
//!
//! # Example
//!
//! ```
//! use tui_snake_core::GameState;
//! use tui_snake_types::{GameStatus, StepOutcome};
//!
//! let mut game = GameState::new(12345);
//! game.start().unwrap();
//!
//! assert_eq!(game.step().unwrap(), StepOutcome::Alive);
//! assert_eq!(game.time_elapsed(), 1);
//!
//! game.pause().unwrap();
//! let save = game.to_json().unwrap();
//! let restored = GameState::from_json(&save, tui_snake_core::SimpleRng::new(1)).unwrap();
//! assert_eq!(restored.body(), game.body());
//! assert_eq!(restored.status(), GameStatus::Pause);
//! ```
//!
//! # Timing
//!
//! The engine counts discrete steps only. Real time (steps per second) is the
//! driver's business.

pub mod game_state;
pub mod rng;
pub mod snapshot;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use game_state::{BarrierEdit, GameState};
pub use rng::{RandomSource, SimpleRng};
pub use snapshot::GameSnapshot;
