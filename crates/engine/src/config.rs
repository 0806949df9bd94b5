//! Driver configuration.
//!
//! Defaults can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SNAKE_BOARD_WIDTH` | 40 | Board width in cells |
//! | `SNAKE_BOARD_HEIGHT` | 40 | Board height in cells |
//! | `SNAKE_SPEED` | 10 | Steps per second (1..=50) |
//! | `SNAKE_SEED` | wall clock | RNG seed |
//! | `SNAKE_SAVE_PATH` | `snake-save.json` | Archive used by save/load |
//! | `SNAKE_LOG_PATH` | unset | Write tracing output to this file |

use std::env;
use std::path::PathBuf;

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_STEPS_PER_SECOND, MAX_STEPS_PER_SECOND, MIN_BOARD_SIDE,
    MIN_STEPS_PER_SECOND,
};

pub const DEFAULT_SAVE_PATH: &str = "snake-save.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub board_width: i32,
    pub board_height: i32,
    pub steps_per_second: u32,
    pub seed: Option<u32>,
    pub save_path: PathBuf,
    pub log_path: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            steps_per_second: DEFAULT_STEPS_PER_SECOND,
            seed: None,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            log_path: None,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`DriverConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<i64>().ok());

        let board_width = parsed("SNAKE_BOARD_WIDTH")
            .filter(|&w| w >= MIN_BOARD_SIDE as i64 && w <= 500)
            .map(|w| w as i32)
            .unwrap_or(defaults.board_width);

        let board_height = parsed("SNAKE_BOARD_HEIGHT")
            .filter(|&h| h >= MIN_BOARD_SIDE as i64 && h <= 500)
            .map(|h| h as i32)
            .unwrap_or(defaults.board_height);

        let steps_per_second = parsed("SNAKE_SPEED")
            .filter(|&s| s >= MIN_STEPS_PER_SECOND as i64 && s <= MAX_STEPS_PER_SECOND as i64)
            .map(|s| s as u32)
            .unwrap_or(defaults.steps_per_second);

        let seed = parsed("SNAKE_SEED")
            .filter(|&s| s >= 0 && s <= u32::MAX as i64)
            .map(|s| s as u32);

        let save_path = lookup("SNAKE_SAVE_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.save_path);

        let log_path = lookup("SNAKE_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            board_width,
            board_height,
            steps_per_second,
            seed,
            save_path,
            log_path,
        }
    }

    /// Milliseconds between two engine steps.
    pub fn step_interval_ms(&self) -> u32 {
        1000 / self.steps_per_second.clamp(MIN_STEPS_PER_SECOND, MAX_STEPS_PER_SECOND)
    }
}
