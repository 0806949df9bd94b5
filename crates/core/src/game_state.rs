//! Game state module - the authoritative snake engine
//!
//! This module owns the board dimensions, the snake body, barriers, the bonus
//! cell, the pending direction queue and the counters. It enforces the game
//! lifecycle (Origin → Running → Pause → Over) with explicit precondition
//! checks and never touches I/O.

use std::collections::VecDeque;

use tracing::debug;

use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Which edit a barrier toggle performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierEdit {
    Added,
    Removed,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    width: i32,
    height: i32,
    /// Head first, tail last.
    body: Vec<Coordinate>,
    barriers: Vec<Coordinate>,
    direction: Direction,
    /// Turn requests accumulated between steps.
    pending_directions: VecDeque<Direction>,
    bonus: Option<Coordinate>,
    /// Number of successful steps.
    time_elapsed: u32,
    /// Steps during which the tail is kept instead of advancing.
    growth_credits: u32,
    status: GameStatus,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Create a default-size (40x40) game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT, seed)
    }

    pub fn with_size(width: i32, height: i32, seed: u32) -> Self {
        Self::with_rng(width, height, SimpleRng::new(seed))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a game in `Origin` with a freshly seeded snake and bonus.
    ///
    /// Sides smaller than [`MIN_BOARD_SIDE`] are clamped up so the initial
    /// snake always lands inside the board.
    pub fn with_rng(width: i32, height: i32, rng: R) -> Self {
        let mut state = Self::empty(width.max(MIN_BOARD_SIDE), height.max(MIN_BOARD_SIDE), rng);
        state.seed_snake();
        state
    }

    /// Rebuild a game from a snapshot, restoring every field verbatim.
    pub fn from_snapshot(snapshot: GameSnapshot, rng: R) -> Result<Self, SnakeError> {
        let mut state = Self::empty(snapshot.width, snapshot.height, rng);
        state.restore(snapshot)?;
        Ok(state)
    }

    /// Parse a JSON save (compact or pretty) and rebuild the game from it.
    pub fn from_json(json: &str, rng: R) -> Result<Self, SnakeError> {
        Self::from_snapshot(GameSnapshot::from_json(json)?, rng)
    }

    fn empty(width: i32, height: i32, rng: R) -> Self {
        Self {
            width,
            height,
            body: Vec::new(),
            barriers: Vec::new(),
            direction: Direction::Left,
            pending_directions: VecDeque::new(),
            bonus: None,
            time_elapsed: 0,
            growth_credits: 0,
            status: GameStatus::Origin,
            rng,
        }
    }

    /// Replace the whole game with `snapshot`, keeping only the random source.
    ///
    /// The snapshot is validated first; on error the current game is untouched.
    pub fn restore(&mut self, snapshot: GameSnapshot) -> Result<(), SnakeError> {
        snapshot.validate()?;

        self.width = snapshot.width;
        self.height = snapshot.height;
        self.body = snapshot.body;
        self.barriers = snapshot.barriers;
        self.direction = snapshot.direction;
        self.pending_directions.clear();
        self.bonus = if snapshot.bonus == Coordinate::NONE {
            None
        } else {
            Some(snapshot.bonus)
        };
        self.time_elapsed = snapshot.time_from_start;
        self.growth_credits = snapshot.bonus_cnt;
        self.status = snapshot.status;
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn time_elapsed(&self) -> u32 {
        self.time_elapsed
    }

    /// Score is the current body length.
    pub fn score(&self) -> usize {
        self.body.len()
    }

    /// Body cells, head first.
    pub fn body(&self) -> &[Coordinate] {
        &self.body
    }

    pub fn head(&self) -> Option<Coordinate> {
        self.body.first().copied()
    }

    pub fn tail(&self) -> Option<Coordinate> {
        self.body.last().copied()
    }

    pub fn barriers(&self) -> &[Coordinate] {
        &self.barriers
    }

    pub fn bonus(&self) -> Option<Coordinate> {
        self.bonus
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn growth_credits(&self) -> u32 {
        self.growth_credits
    }

    pub fn pending_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.pending_directions.iter().copied()
    }

    pub fn in_board(&self, cell: Coordinate) -> bool {
        Coordinate::new(0, 0) <= cell && cell <= Coordinate::new(self.width - 1, self.height - 1)
    }

    pub fn in_barrier(&self, cell: Coordinate) -> bool {
        self.barriers.contains(&cell)
    }

    pub fn in_body(&self, cell: Coordinate) -> bool {
        self.body.contains(&cell)
    }

    /// Body cells joined head to tail, e.g. `"(4, 5) - (5, 5)"`.
    pub fn body_info(&self) -> String {
        self.body
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" - ")
    }

    fn invalid(&self, action: &'static str) -> SnakeError {
        SnakeError::InvalidTransition {
            action,
            status: self.status,
        }
    }

    /// Origin or Pause → Running. Already running is a no-op.
    ///
    /// Starting a cleared board seeds a new snake first.
    pub fn start(&mut self) -> Result<(), SnakeError> {
        match self.status {
            GameStatus::Origin | GameStatus::Pause => {
                if self.body.is_empty() {
                    self.seed_snake();
                }
                self.status = GameStatus::Running;
                Ok(())
            }
            GameStatus::Running => Ok(()),
            GameStatus::Over => Err(self.invalid("start")),
        }
    }

    pub fn pause(&mut self) -> Result<(), SnakeError> {
        if self.status != GameStatus::Running {
            return Err(self.invalid("pause"));
        }
        self.status = GameStatus::Pause;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SnakeError> {
        if self.status != GameStatus::Pause {
            return Err(self.invalid("resume"));
        }
        self.status = GameStatus::Running;
        Ok(())
    }

    /// End the game immediately.
    pub fn over(&mut self) {
        self.status = GameStatus::Over;
    }

    /// Throw the current game away and start a fresh one on the same board size.
    pub fn restart(&mut self) {
        self.reset_board();
        self.seed_snake();
        self.status = GameStatus::Running;
    }

    /// Back to `Origin` with no snake, barriers or bonus.
    pub fn clear(&mut self) {
        self.reset_board();
    }

    fn reset_board(&mut self) {
        self.body.clear();
        self.barriers.clear();
        self.pending_directions.clear();
        self.bonus = None;
        self.time_elapsed = 0;
        self.growth_credits = 0;
        self.direction = Direction::Left;
        self.status = GameStatus::Origin;
    }

    /// Queue a turn; it is considered on the next step.
    pub fn change_direction(&mut self, direction: Direction) {
        self.pending_directions.push_back(direction);
    }

    /// Advance the snake by one cell.
    ///
    /// A collision is not an error: it moves the game to `Over` and reports
    /// [`StepOutcome::Dead`] with the body left exactly as it was.
    pub fn step(&mut self) -> Result<StepOutcome, SnakeError> {
        if self.status != GameStatus::Running {
            return Err(self.invalid("step"));
        }
        let Some(head) = self.head() else {
            return Err(self.invalid("step"));
        };

        self.update_direction();
        let target = head.next(self.direction);

        if let Some(cause) = self.collision_at(target) {
            self.status = GameStatus::Over;
            debug!(
                cell = %target,
                cause = cause.as_str(),
                length = self.body.len(),
                "snake died"
            );
            return Ok(StepOutcome::Dead(cause));
        }

        // Counters restored from a save may already sit at the top of the range.
        self.time_elapsed = self.time_elapsed.saturating_add(1);

        if self.bonus == Some(target) {
            self.growth_credits = self.growth_credits.saturating_add(BONUS_GROWTH);
            self.spawn_bonus();
        }

        let old_tail = self.body[self.body.len() - 1];
        self.body.rotate_right(1);
        self.body[0] = target;

        if self.growth_credits > 0 {
            self.body.push(old_tail);
            self.growth_credits -= 1;
        }

        Ok(StepOutcome::Alive)
    }

    /// Commit the first queued turn that is not a 180° reversal.
    ///
    /// Reversals in front of it are discarded; turns behind it stay queued.
    fn update_direction(&mut self) {
        while let Some(next) = self.pending_directions.pop_front() {
            if next.is_opposite(self.direction) {
                continue;
            }
            self.direction = next;
            break;
        }
    }

    fn collision_at(&self, target: Coordinate) -> Option<DeathCause> {
        if !self.in_board(target) {
            Some(DeathCause::Wall)
        } else if self.in_barrier(target) {
            Some(DeathCause::Barrier)
        } else if self.in_body(target) {
            // No tail grace: the tail has not vacated its cell yet.
            Some(DeathCause::SelfBody)
        } else {
            None
        }
    }

    pub fn add_barrier(&mut self, cell: Coordinate) -> Result<(), SnakeError> {
        if !self.status.allows_editing() {
            return Err(self.invalid("add a barrier"));
        }
        if !self.in_board(cell) {
            return Err(SnakeError::OutOfBoard(cell));
        }
        if self.in_body(cell) || self.in_barrier(cell) {
            return Err(SnakeError::Occupied(cell));
        }
        self.barriers.push(cell);
        Ok(())
    }

    pub fn erase_barrier(&mut self, cell: Coordinate) -> Result<(), SnakeError> {
        if !self.status.allows_editing() {
            return Err(self.invalid("erase a barrier"));
        }
        let index = self
            .barriers
            .iter()
            .position(|&b| b == cell)
            .ok_or(SnakeError::NotFound(cell))?;
        self.barriers.remove(index);
        Ok(())
    }

    /// Erase the barrier at `cell` if there is one, otherwise place one.
    pub fn toggle_barrier(&mut self, cell: Coordinate) -> Result<BarrierEdit, SnakeError> {
        if self.in_barrier(cell) {
            self.erase_barrier(cell)?;
            Ok(BarrierEdit::Removed)
        } else {
            self.add_barrier(cell)?;
            Ok(BarrierEdit::Added)
        }
    }

    /// Capture the game for saving. Only allowed while paused.
    pub fn to_snapshot(&self) -> Result<GameSnapshot, SnakeError> {
        if self.status != GameStatus::Pause {
            return Err(self.invalid("save"));
        }
        Ok(GameSnapshot {
            width: self.width,
            height: self.height,
            body: self.body.clone(),
            barriers: self.barriers.clone(),
            bonus: self.bonus.unwrap_or(Coordinate::NONE),
            time_from_start: self.time_elapsed,
            direction: self.direction,
            status: self.status,
            bonus_cnt: self.growth_credits,
        })
    }

    /// Compact JSON save. Only allowed while paused.
    pub fn to_json(&self) -> Result<String, SnakeError> {
        self.to_snapshot()?.to_json()
    }

    /// Place a two-cell snake at a random safe spot and spawn a bonus.
    fn seed_snake(&mut self) {
        let head = self.safe_coordinate();
        // Draws from [0, 3): the tail never starts below the head.
        let tail_side = Direction::from_index(self.rng.bounded(0, 3) as i64)
            .unwrap_or(Direction::Left);
        let tail = head.next(tail_side);

        self.body.clear();
        self.body.push(head);
        self.body.push(tail);
        self.direction = tail_side.opposite();
        self.spawn_bonus();
    }

    /// A random cell inside the inset rectangle used for seeding and bonuses.
    fn safe_coordinate(&mut self) -> Coordinate {
        let margin_x = self.width / 5;
        let margin_y = self.height / 5;
        // The x upper bound uses the vertical margin. Kept as-is for save and
        // replay compatibility; it only matters on non-square boards.
        let x = self.rng.bounded(margin_x, self.width - margin_y);
        let y = self.rng.bounded(margin_y, self.height - margin_y);
        Coordinate::new(x, y)
    }

    /// Pick a new bonus cell, retrying while it lands on the body.
    ///
    /// After [`BONUS_SPAWN_ATTEMPTS`] candidates the last one is kept even if
    /// it overlaps the body. Returns whether the bonus ended up clear.
    fn spawn_bonus(&mut self) -> bool {
        let mut candidate = self.safe_coordinate();
        let mut attempts = 1;
        while self.in_body(candidate) && attempts < BONUS_SPAWN_ATTEMPTS {
            candidate = self.safe_coordinate();
            attempts += 1;
        }

        self.bonus = Some(candidate);
        let clear = !self.in_body(candidate);
        debug!(bonus = %candidate, attempts, clear, "bonus spawned");
        clear
    }
}
