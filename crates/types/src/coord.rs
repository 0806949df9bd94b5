//! Grid coordinate value type.
//!
//! Text form is `"(x, y)"`. Parsing accepts the same bracketed form with any
//! amount of whitespace around the numbers and brackets.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use crate::{Direction, SnakeError};

/// A cell position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// Marker written to save files when there is no bonus on the board.
    pub const NONE: Coordinate = Coordinate { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step towards `dir`
    pub fn next(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// The direction that leads from `self` to the adjacent cell `other`
    ///
    /// ```
    /// use tui_snake_types::{Coordinate, Direction};
    ///
    /// let a = Coordinate::new(3, 3);
    /// assert_eq!(a.direction_to(Coordinate::new(3, 2)).unwrap(), Direction::Up);
    /// assert!(a.direction_to(Coordinate::new(5, 5)).is_err());
    /// ```
    pub fn direction_to(self, other: Coordinate) -> Result<Direction, SnakeError> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.next(dir) == other)
            .ok_or(SnakeError::NoSuchDirection {
                from: self,
                to: other,
            })
    }
}

/// Componentwise order: `a <= b` iff `a.x <= b.x && a.y <= b.y`.
///
/// Pairs that disagree between axes are incomparable.
impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.x <= other.x && self.y <= other.y {
            Some(Ordering::Less)
        } else if self.x >= other.x && self.y >= other.y {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Self) -> Self::Output {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Coordinate {
    type Err = SnakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SnakeError::Parse(s.to_string());

        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;

        let mut parts = inner.split(',');
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let x = x.trim().parse::<i32>().map_err(|_| malformed())?;
        let y = y.trim().parse::<i32>().map_err(|_| malformed())?;
        Ok(Coordinate::new(x, y))
    }
}
