//! Which player controls are available in each game state.

use arrayvec::ArrayVec;

use crate::types::GameStatus;

/// A player-facing control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Start,
    Pause,
    Restart,
    Load,
    Exit,
    Save,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::Start,
        Control::Pause,
        Control::Restart,
        Control::Load,
        Control::Exit,
        Control::Save,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Control::Start => "start",
            Control::Pause => "pause",
            Control::Restart => "restart",
            Control::Load => "load",
            Control::Exit => "exit",
            Control::Save => "save",
        }
    }
}

/// Rows: Origin, Running, Pause, Over. Columns follow [`Control::ALL`].
const ENABLED: [[bool; 6]; 4] = [
    /* Origin  */ [true, false, false, true, true, false],
    /* Running */ [false, true, false, false, true, false],
    /* Pause   */ [false, true, true, true, true, true],
    /* Over    */ [false, false, true, true, true, false],
];

pub fn control_enabled(status: GameStatus, control: Control) -> bool {
    ENABLED[status.index() as usize][control as usize]
}

/// Enabled controls for `status`, in display order.
pub fn enabled_controls(status: GameStatus) -> ArrayVec<Control, 6> {
    Control::ALL
        .into_iter()
        .filter(|&c| control_enabled(status, c))
        .collect()
}

/// Speed can only change while the snake is not moving.
pub fn speed_editable(status: GameStatus) -> bool {
    matches!(status, GameStatus::Origin | GameStatus::Pause)
}

/// Label for the pause control, which doubles as "continue" while paused.
pub fn pause_label(status: GameStatus) -> &'static str {
    if status == GameStatus::Pause {
        "Continue"
    } else {
        "Pause"
    }
}
