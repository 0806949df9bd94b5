//! Game driver: real-time stepping, control gating and save files.
//!
//! The engine in `tui-snake-core` only knows discrete steps. This crate owns a
//! [`GameState`](crate::core::GameState), feeds it elapsed milliseconds and
//! player [`Command`]s, and reads/writes the JSON archive on disk.

pub mod config;
pub mod controls;
pub mod driver;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use config::DriverConfig;
pub use controls::{control_enabled, enabled_controls, pause_label, speed_editable, Control};
pub use driver::{Command, Driver, DriverError, DEATH_NOTICE};
