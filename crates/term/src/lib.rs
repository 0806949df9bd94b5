//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids ratatui widgets/layout and instead renders into a simple
//! framebuffer that can be flushed to a terminal backend.
//!
//! - The core stays deterministic and testable
//! - Board cells are 2 columns wide to keep them roughly square
//! - Screen positions map back to board cells for mouse editing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_engine as engine;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Hud, Viewport};
pub use renderer::{changed_spans, encode_diff_into, encode_full_into, Span, TerminalRenderer};
