//! Recoverable error kinds shared by the engine and its callers.

use thiserror::Error;

use crate::{Coordinate, GameStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakeError {
    /// Operation invoked in a state that does not allow it.
    #[error("cannot {action} while the game is {status}")]
    InvalidTransition {
        action: &'static str,
        status: GameStatus,
    },
    /// Save data is missing fields or carries out-of-range values.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
    /// Writing a save failed; distinct from a bad save being read.
    #[error("cannot encode snapshot: {0}")]
    Encode(String),
    #[error("no barrier at {0}")]
    NotFound(Coordinate),
    #[error("{to} is not adjacent to {from}")]
    NoSuchDirection { from: Coordinate, to: Coordinate },
    #[error("malformed coordinate {0:?}")]
    Parse(String),
    #[error("{0} is outside the board")]
    OutOfBoard(Coordinate),
    #[error("{0} is already occupied")]
    Occupied(Coordinate),
}
