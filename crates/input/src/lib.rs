//! Terminal input module (driver-facing).
//!
//! Maps `crossterm` key and mouse events into driver
//! [`Command`](crate::engine::Command)s. It knows nothing about the screen
//! layout; mouse positions are resolved by a caller-supplied locator.

pub mod map;

pub use tui_snake_engine as engine;
pub use tui_snake_types as types;

pub use map::{handle_key_event, handle_mouse_event, should_quit};
