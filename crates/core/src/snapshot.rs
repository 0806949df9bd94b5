//! Save-file snapshot of a paused game.
//!
//! The JSON layout is fixed:
//!
//! ```text
//! {"width":40,"height":40,"body":["(4, 5)","(5, 5)"],"barriers":[],
//!  "bonus":"(-1, -1)","timeFromStart":1,"direction":0,"status":2,"bonusCnt":0}
//! ```
//!
//! Coordinates travel as `"(x, y)"` strings, direction and status as their
//! small-integer encodings. Anything missing, fractional, negative where a
//! counter is expected, or out of range is rejected with
//! [`SnakeError::InvalidSnapshot`], as is any cell that lies off the board.

use serde::{Deserialize, Serialize};

use crate::types::{Coordinate, Direction, GameStatus, SnakeError, MIN_BOARD_SIDE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    #[serde(with = "coordinate_list")]
    pub body: Vec<Coordinate>,
    #[serde(with = "coordinate_list")]
    pub barriers: Vec<Coordinate>,
    /// [`Coordinate::NONE`] when there is no bonus.
    #[serde(with = "coordinate_text")]
    pub bonus: Coordinate,
    #[serde(rename = "timeFromStart")]
    pub time_from_start: u32,
    #[serde(with = "direction_index")]
    pub direction: Direction,
    #[serde(with = "status_index")]
    pub status: GameStatus,
    #[serde(rename = "bonusCnt")]
    pub bonus_cnt: u32,
}

impl GameSnapshot {
    /// Parse and validate a snapshot; compact and pretty JSON are both accepted.
    pub fn from_json(json: &str) -> Result<Self, SnakeError> {
        let snapshot: GameSnapshot = serde_json::from_str(json)
            .map_err(|e| SnakeError::InvalidSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Compact JSON, the form written to save files.
    pub fn to_json(&self) -> Result<String, SnakeError> {
        serde_json::to_string(self).map_err(encode_error)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnakeError> {
        serde_json::to_string_pretty(self).map_err(encode_error)
    }

    /// Checks the invariants a game needs to resume from this snapshot.
    ///
    /// The board must be at least [`MIN_BOARD_SIDE`] on each side, the body
    /// at least two cells long, and every body, barrier and bonus cell on
    /// the board ([`Coordinate::NONE`] stands for "no bonus").
    pub fn validate(&self) -> Result<(), SnakeError> {
        if self.width < MIN_BOARD_SIDE || self.height < MIN_BOARD_SIDE {
            return Err(SnakeError::InvalidSnapshot(format!(
                "board must be at least {side}x{side}, got {}x{}",
                self.width,
                self.height,
                side = MIN_BOARD_SIDE
            )));
        }
        if self.body.len() < 2 {
            return Err(SnakeError::InvalidSnapshot(format!(
                "body needs at least 2 cells, got {}",
                self.body.len()
            )));
        }
        if let Some(cell) = self.body.iter().find(|&&c| !self.on_board(c)) {
            return Err(SnakeError::InvalidSnapshot(format!(
                "body cell {} is outside the board",
                cell
            )));
        }
        if let Some(cell) = self.barriers.iter().find(|&&c| !self.on_board(c)) {
            return Err(SnakeError::InvalidSnapshot(format!(
                "barrier {} is outside the board",
                cell
            )));
        }
        if self.bonus != Coordinate::NONE && !self.on_board(self.bonus) {
            return Err(SnakeError::InvalidSnapshot(format!(
                "bonus {} is outside the board",
                self.bonus
            )));
        }
        Ok(())
    }

    fn on_board(&self, cell: Coordinate) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }
}

fn encode_error(err: serde_json::Error) -> SnakeError {
    SnakeError::Encode(err.to_string())
}

mod coordinate_text {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::Coordinate;

    pub fn serialize<S>(cell: &Coordinate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(cell)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Coordinate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

mod coordinate_list {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::Coordinate;

    pub fn serialize<S>(cells: &[Coordinate], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(cells.iter().map(|c| c.to_string()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Coordinate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|text| text.parse().map_err(D::Error::custom))
            .collect()
    }
}

mod direction_index {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::Direction;

    pub fn serialize<S>(dir: &Direction, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(dir.index())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Direction, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Direction::from_index(raw)
            .ok_or_else(|| D::Error::custom(format!("direction {} out of range 0..=3", raw)))
    }
}

mod status_index {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::GameStatus;

    pub fn serialize<S>(status: &GameStatus, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(status.index())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<GameStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        GameStatus::from_index(raw)
            .ok_or_else(|| D::Error::custom(format!("status {} out of range 0..=3", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPACT: &str = r#"{"width":40,"height":40,"body":["(4, 5)","(5, 5)"],"barriers":["(1, 1)","(2, 3)"],"bonus":"(-1, -1)","timeFromStart":7,"direction":0,"status":2,"bonusCnt":2}"#;

    fn sample() -> GameSnapshot {
        GameSnapshot {
            width: 40,
            height: 40,
            body: vec![Coordinate::new(4, 5), Coordinate::new(5, 5)],
            barriers: vec![Coordinate::new(1, 1), Coordinate::new(2, 3)],
            bonus: Coordinate::NONE,
            time_from_start: 7,
            direction: Direction::Left,
            status: GameStatus::Pause,
            bonus_cnt: 2,
        }
    }

    fn rejects(json: &str) {
        match GameSnapshot::from_json(json) {
            Err(SnakeError::InvalidSnapshot(_)) => {}
            other => panic!("expected InvalidSnapshot for {}, got {:?}", json, other),
        }
    }

    #[test]
    fn writes_fixed_compact_layout() {
        assert_eq!(sample().to_json().unwrap(), COMPACT);
    }

    #[test]
    fn reads_compact_form() {
        assert_eq!(GameSnapshot::from_json(COMPACT).unwrap(), sample());
    }

    #[test]
    fn reads_pretty_form() {
        let pretty = sample().to_json_pretty().unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(GameSnapshot::from_json(&pretty).unwrap(), sample());
    }

    #[test]
    fn key_order_does_not_matter() {
        let shuffled = r#"{
            "bonusCnt": 0, "status": 2, "direction": 3, "timeFromStart": 0,
            "bonus": "(9, 9)", "barriers": [], "body": ["(1, 1)", "(1, 0)"],
            "height": 10, "width": 12
        }"#;
        let snap = GameSnapshot::from_json(shuffled).unwrap();
        assert_eq!(snap.width, 12);
        assert_eq!(snap.direction, Direction::Down);
        assert_eq!(snap.bonus, Coordinate::new(9, 9));
    }

    #[test]
    fn rejects_missing_field() {
        rejects(&COMPACT.replace(r#""bonusCnt":2"#, r#""other":2"#));
        rejects(&COMPACT.replace(r#","barriers":["(1, 1)","(2, 3)"]"#, ""));
    }

    #[test]
    fn rejects_non_integer_numbers() {
        rejects(&COMPACT.replace(r#""width":40"#, r#""width":40.5"#));
        rejects(&COMPACT.replace(r#""status":2"#, r#""status":"2""#));
        rejects(&COMPACT.replace(r#""timeFromStart":7"#, r#""timeFromStart":-1"#));
    }

    #[test]
    fn rejects_out_of_range_encodings() {
        rejects(&COMPACT.replace(r#""direction":0"#, r#""direction":4"#));
        rejects(&COMPACT.replace(r#""direction":0"#, r#""direction":-1"#));
        rejects(&COMPACT.replace(r#""status":2"#, r#""status":9"#));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        rejects(&COMPACT.replace(r#""(4, 5)""#, r#""4, 5""#));
        rejects(&COMPACT.replace(r#""bonus":"(-1, -1)""#, r#""bonus":"(x, y)""#));
    }

    #[test]
    fn rejects_impossible_games() {
        rejects(&COMPACT.replace(r#""width":40"#, r#""width":0"#));
        rejects(&COMPACT.replace(r#"["(4, 5)","(5, 5)"]"#, r#"["(4, 5)"]"#));
    }

    #[test]
    fn rejects_boards_too_small_to_restart() {
        rejects(&COMPACT.replace(r#""width":40"#, r#""width":4"#));
        rejects(&COMPACT.replace(r#""height":40"#, r#""height":2"#));
    }

    #[test]
    fn rejects_cells_off_the_board() {
        rejects(&COMPACT.replace(r#""(4, 5)""#, r#""(2147483647, 5)""#));
        rejects(&COMPACT.replace(r#""(5, 5)""#, r#""(5, 40)""#));
        rejects(&COMPACT.replace(r#""(2, 3)""#, r#""(-3, 3)""#));
        rejects(&COMPACT.replace(r#""bonus":"(-1, -1)""#, r#""bonus":"(40, 0)""#));
        rejects(&COMPACT.replace(r#""bonus":"(-1, -1)""#, r#""bonus":"(-1, 0)""#));
    }

    #[test]
    fn accepts_cells_on_the_last_row_and_column() {
        let json = COMPACT
            .replace(r#""(4, 5)""#, r#""(39, 39)""#)
            .replace(r#""(5, 5)""#, r#""(39, 38)""#)
            .replace(r#""bonus":"(-1, -1)""#, r#""bonus":"(0, 39)""#);
        let snap = GameSnapshot::from_json(&json).unwrap();
        assert_eq!(snap.body[0], Coordinate::new(39, 39));
        assert_eq!(snap.bonus, Coordinate::new(0, 39));
    }

    #[test]
    fn accepts_saturated_counters() {
        let json = COMPACT
            .replace(r#""timeFromStart":7"#, r#""timeFromStart":4294967295"#)
            .replace(r#""bonusCnt":2"#, r#""bonusCnt":4294967295"#);
        let snap = GameSnapshot::from_json(&json).unwrap();
        assert_eq!(snap.time_from_start, u32::MAX);
        assert_eq!(snap.bonus_cnt, u32::MAX);
    }

    #[test]
    fn encode_failures_are_not_load_errors() {
        use serde::ser::Error;

        let err = encode_error(serde_json::Error::custom("unencodable"));
        assert_eq!(err, SnakeError::Encode("unencodable".to_string()));
    }

    #[test]
    fn rejects_non_objects() {
        rejects("");
        rejects("[]");
        rejects("null");
    }
}
