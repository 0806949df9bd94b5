//! The driver owns a game and turns player commands and elapsed time into
//! engine calls.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::DriverConfig;
use crate::controls::{control_enabled, speed_editable, Control};
use crate::core::{BarrierEdit, GameSnapshot, GameState, RandomSource, SimpleRng};
use crate::types::{
    Coordinate, Direction, GameStatus, SnakeError, StepOutcome, MAX_STEPS_PER_SECOND,
    MIN_STEPS_PER_SECOND,
};

pub const DEATH_NOTICE: &str = "You are dead.";

/// Errors surfaced by [`Driver`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Game(#[from] SnakeError),
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A player intent, produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Start,
    TogglePause,
    Restart,
    Save,
    Load,
    ToggleBarrier(Coordinate),
    SpeedUp,
    SpeedDown,
    Exit,
}

#[derive(Debug)]
pub struct Driver<R = SimpleRng> {
    game: GameState<R>,
    config: DriverConfig,
    accumulator_ms: u32,
    notice: Option<String>,
    exit_requested: bool,
}

impl Driver<SimpleRng> {
    /// Build a driver with a fresh board sized by `config`.
    pub fn new(config: DriverConfig, seed: u32) -> Self {
        let rng = SimpleRng::new(config.seed.unwrap_or(seed));
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> Driver<R> {
    pub fn with_rng(config: DriverConfig, rng: R) -> Self {
        let game = GameState::with_rng(config.board_width, config.board_height, rng);
        Self::with_game(config, game)
    }

    pub fn with_game(config: DriverConfig, game: GameState<R>) -> Self {
        Self {
            game,
            config,
            accumulator_ms: 0,
            notice: None,
            exit_requested: false,
        }
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn steps_per_second(&self) -> u32 {
        self.config.steps_per_second
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn require(&self, control: Control) -> Result<(), SnakeError> {
        let status = self.game.status();
        if control_enabled(status, control) {
            Ok(())
        } else {
            Err(SnakeError::InvalidTransition {
                action: control.as_str(),
                status,
            })
        }
    }

    /// Apply a command; refusals come back as errors and leave the game as it was.
    pub fn dispatch(&mut self, command: Command) -> Result<(), DriverError> {
        match command {
            // Queued in any status; a restart or load drops the queue.
            Command::Turn(direction) => self.game.change_direction(direction),
            Command::Start => {
                self.require(Control::Start)?;
                self.game.start()?;
                self.accumulator_ms = 0;
                self.notice = None;
                info!(status = %self.game.status(), "game started");
            }
            Command::TogglePause => {
                self.require(Control::Pause)?;
                if self.game.status() == GameStatus::Pause {
                    self.game.resume()?;
                    self.accumulator_ms = 0;
                    self.notice = None;
                    info!("game resumed");
                } else {
                    self.game.pause()?;
                    info!(time = self.game.time_elapsed(), "game paused");
                }
            }
            Command::Restart => {
                self.require(Control::Restart)?;
                self.game.restart();
                self.accumulator_ms = 0;
                self.notice = None;
                info!("game restarted");
            }
            Command::Save => {
                self.require(Control::Save)?;
                let path = self.config.save_path.clone();
                self.save_to(&path)?;
                self.notice = Some(format!("Saved to {}", path.display()));
            }
            Command::Load => {
                self.require(Control::Load)?;
                let path = self.config.save_path.clone();
                self.load_from(&path)?;
                self.notice = Some(format!("Loaded {}", path.display()));
            }
            Command::ToggleBarrier(cell) => {
                let edit = self.game.toggle_barrier(cell)?;
                info!(cell = %cell, ?edit, "barrier edited");
            }
            Command::SpeedUp => {
                let speed = self.config.steps_per_second.saturating_add(1);
                self.set_speed(speed)?;
            }
            Command::SpeedDown => {
                let speed = self.config.steps_per_second.saturating_sub(1);
                self.set_speed(speed)?;
            }
            Command::Exit => {
                self.exit_requested = true;
            }
        }
        Ok(())
    }

    /// Dispatch and turn any refusal into the on-screen notice.
    pub fn apply(&mut self, command: Command) {
        if let Err(err) = self.dispatch(command) {
            warn!(?command, error = %err, "command refused");
            self.notice = Some(err.to_string());
        }
    }

    /// Change the step rate, clamped to the supported range.
    pub fn set_speed(&mut self, steps_per_second: u32) -> Result<(), DriverError> {
        let status = self.game.status();
        if !speed_editable(status) {
            return Err(SnakeError::InvalidTransition {
                action: "change speed",
                status,
            }
            .into());
        }
        self.config.steps_per_second =
            steps_per_second.clamp(MIN_STEPS_PER_SECOND, MAX_STEPS_PER_SECOND);
        Ok(())
    }

    /// Advance real time by `elapsed_ms`, stepping once per full step interval.
    ///
    /// Returns how many steps were taken. Time only accumulates while running;
    /// a death discards whatever remains.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<u32, DriverError> {
        if self.game.status() != GameStatus::Running {
            self.accumulator_ms = 0;
            return Ok(0);
        }

        let interval = self.config.step_interval_ms().max(1);
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);

        let mut steps = 0;
        while self.accumulator_ms >= interval {
            self.accumulator_ms -= interval;
            steps += 1;
            if let StepOutcome::Dead(cause) = self.game.step()? {
                self.accumulator_ms = 0;
                self.notice = Some(DEATH_NOTICE.to_string());
                info!(
                    cause = cause.as_str(),
                    score = self.game.score(),
                    time = self.game.time_elapsed(),
                    "game over"
                );
                break;
            }
        }
        Ok(steps)
    }

    /// Write the paused game to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), DriverError> {
        let json = self.game.to_json()?;
        fs::write(path, json).map_err(|source| DriverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "game saved");
        Ok(())
    }

    /// Replace the current game with the one stored at `path`.
    ///
    /// Nothing changes unless the file reads and validates completely.
    pub fn load_from(&mut self, path: &Path) -> Result<(), DriverError> {
        let json = fs::read_to_string(path).map_err(|source| DriverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = GameSnapshot::from_json(&json)?;
        self.game.restore(snapshot)?;
        self.accumulator_ms = 0;
        info!(
            path = %path.display(),
            status = %self.game.status(),
            length = self.game.score(),
            "game loaded"
        );
        Ok(())
    }

    /// Toggle a barrier, returning what happened.
    pub fn toggle_barrier(&mut self, cell: Coordinate) -> Result<BarrierEdit, DriverError> {
        Ok(self.game.toggle_barrier(cell)?)
    }
}
