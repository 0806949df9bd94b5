//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameState, RandomSource};
use crate::engine::{enabled_controls, pause_label, speed_editable, Control};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Coordinate, GameStatus, DEFAULT_STEPS_PER_SECOND};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Driver-side facts the side panel shows next to the game itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud<'a> {
    pub steps_per_second: u32,
    pub notice: Option<&'a str>,
    /// Board cell under the mouse pointer. Outlined while barriers are editable.
    pub hover: Option<Coordinate>,
}

impl Default for Hud<'_> {
    fn default() -> Self {
        Self {
            steps_per_second: DEFAULT_STEPS_PER_SECOND,
            notice: None,
            hover: None,
        }
    }
}

pub const BACKGROUND: Rgb = Rgb::from_hex(0x28292A);
pub const BARRIER: Rgb = Rgb::from_hex(0x202124);
pub const BODY: Rgb = Rgb::from_hex(0xB5B6B7);
pub const HEAD: Rgb = Rgb::from_hex(0xEEEEEE);
pub const BONUS: Rgb = Rgb::from_hex(0xF4B458);
pub const SELECT: Rgb = Rgb::from_hex(0x000000);

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const HELP: [&str; 7] = [
    "arrows/wasd turn",
    "space start/pause",
    "r     restart",
    "^S/^O save/load",
    "+/-   speed",
    "click barrier",
    "q     quit",
];

/// Board placement inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the snake game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn frame(&self, board_w: i32, board_h: i32, viewport: Viewport) -> Frame {
        let board_px_w = (board_w.max(0) as u16).saturating_mul(self.cell_w);
        let board_px_h = (board_h.max(0) as u16).saturating_mul(self.cell_h);
        let w = board_px_w.saturating_add(2);
        let h = board_px_h.saturating_add(2);
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Board cell under terminal position (`col`, `row`), if any.
    pub fn cell_at<R: RandomSource>(
        &self,
        game: &GameState<R>,
        viewport: Viewport,
        col: u16,
        row: u16,
    ) -> Option<Coordinate> {
        let frame = self.frame(game.width(), game.height(), viewport);
        let dx = col.checked_sub(frame.x + 1)?;
        let dy = row.checked_sub(frame.y + 1)?;
        let cell = Coordinate::new((dx / self.cell_w) as i32, (dy / self.cell_h) as i32);
        game.in_board(cell).then_some(cell)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into<R: RandomSource>(
        &self,
        game: &GameState<R>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.render_into_with_hud(game, &Hud::default(), viewport, fb);
    }

    pub fn render_into_with_hud<R: RandomSource>(
        &self,
        game: &GameState<R>,
        hud: &Hud<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame(game.width(), game.height(), viewport);
        let border = CellStyle::fg_on(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            CellStyle::fg_on(BODY, BACKGROUND),
        );
        self.draw_border(fb, frame, border);

        if let Some(bonus) = game.bonus() {
            let style = CellStyle {
                bold: true,
                ..CellStyle::fg_on(BONUS, BACKGROUND)
            };
            self.draw_board_cell(fb, frame, bonus, style);
        }
        // Tail first so the head wins if anything overlaps.
        for &cell in game.body().iter().skip(1).rev() {
            self.draw_board_cell(fb, frame, cell, CellStyle::fg_on(BODY, BACKGROUND));
        }
        if let Some(head) = game.head() {
            let style = CellStyle {
                bold: true,
                ..CellStyle::fg_on(HEAD, BACKGROUND)
            };
            self.draw_board_cell(fb, frame, head, style);
        }
        if let Some(cell) = hud.hover {
            if game.status().allows_editing() && game.in_board(cell) {
                self.draw_hover(fb, frame, cell);
            }
        }
        // Barriers cover everything else, the bonus included.
        for &cell in game.barriers() {
            self.draw_board_cell(fb, frame, cell, CellStyle::fg_on(BARRIER, BACKGROUND));
        }

        self.draw_side_panel(fb, game, hud, viewport, frame);

        match game.status() {
            GameStatus::Origin => self.draw_overlay_text(fb, frame, "PRESS SPACE"),
            GameStatus::Pause => self.draw_overlay_text(fb, frame, "PAUSED"),
            GameStatus::Over => self.draw_overlay_text(fb, frame, "GAME OVER"),
            GameStatus::Running => {}
        }

        if let Some(notice) = hud.notice {
            self.draw_notice(fb, frame, viewport, notice);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render<R: RandomSource>(&self, game: &GameState<R>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, viewport, &mut fb);
        fb
    }

    pub fn render_with_hud<R: RandomSource>(
        &self,
        game: &GameState<R>,
        hud: &Hud<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_hud(game, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, cell: Coordinate, style: CellStyle) {
        if cell.x < 0 || cell.y < 0 {
            return;
        }
        let px = (cell.x as u16)
            .saturating_mul(self.cell_w)
            .saturating_add(frame.x + 1);
        let py = (cell.y as u16)
            .saturating_mul(self.cell_h)
            .saturating_add(frame.y + 1);
        if px >= frame.x + frame.w - 1 || py >= frame.y + frame.h - 1 {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    /// Bracket the cell, keeping whatever fill it already has.
    fn draw_hover(&self, fb: &mut FrameBuffer, frame: Frame, cell: Coordinate) {
        let px = (cell.x as u16)
            .saturating_mul(self.cell_w)
            .saturating_add(frame.x + 1);
        let py = (cell.y as u16)
            .saturating_mul(self.cell_h)
            .saturating_add(frame.y + 1);
        let style = CellStyle {
            bold: true,
            ..CellStyle::fg_on(SELECT, BACKGROUND)
        };
        let right = px.saturating_add(self.cell_w - 1);
        for dy in 0..self.cell_h {
            let y = py.saturating_add(dy);
            fb.put_char(px, y, '[', style);
            fb.put_char(right, y, ']', style);
        }
    }

    fn draw_side_panel<R: RandomSource>(
        &self,
        fb: &mut FrameBuffer,
        game: &GameState<R>,
        hud: &Hud<'_>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::fg_on(Rgb::new(220, 220, 220), PANEL_BG)
        };
        let value = CellStyle::fg_on(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = CellStyle { dim: true, ..value };

        let status = game.status();
        let mut y = frame.y;

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, game.score() as u32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, game.time_elapsed(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, hud.steps_per_second, value);
        if !speed_editable(status) {
            fb.put_str(panel_x + 4, y, "locked", dim);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATUS", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, status.as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "CONTROLS", label);
        y = y.saturating_add(1);
        for control in enabled_controls(status) {
            if y >= viewport.height {
                return;
            }
            fb.put_str(panel_x, y, control_label(control, status), value);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        for line in HELP {
            if y >= viewport.height {
                return;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::fg_on(Rgb::new(255, 255, 255), PANEL_BG)
        };
        fb.put_str(x, mid_y, text, style);
    }

    /// One line under the board, or the last terminal row when the board fills it.
    fn draw_notice(&self, fb: &mut FrameBuffer, frame: Frame, viewport: Viewport, text: &str) {
        if viewport.height == 0 {
            return;
        }
        let below = frame.y.saturating_add(frame.h);
        let y = if below < viewport.height {
            below
        } else {
            viewport.height - 1
        };
        let style = CellStyle {
            bold: true,
            ..CellStyle::fg_on(BONUS, PANEL_BG)
        };
        fb.put_str(frame.x, y, text, style);
    }
}

fn control_label(control: Control, status: GameStatus) -> &'static str {
    match control {
        Control::Start => "Start",
        Control::Pause => pause_label(status),
        Control::Restart => "Restart",
        Control::Load => "Load",
        Control::Exit => "Exit",
        Control::Save => "Save",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSnapshot;
    use crate::core::SimpleRng;
    use crate::types::Direction;

    fn game(status: GameStatus) -> GameState {
        let snapshot = GameSnapshot {
            width: 10,
            height: 8,
            body: vec![
                Coordinate::new(4, 3),
                Coordinate::new(5, 3),
                Coordinate::new(6, 3),
            ],
            barriers: vec![Coordinate::new(0, 0)],
            bonus: Coordinate::new(9, 7),
            time_from_start: 12,
            direction: Direction::Left,
            status,
            bonus_cnt: 0,
        };
        GameState::from_snapshot(snapshot, SimpleRng::new(1)).unwrap()
    }

    /// 10x8 board at 2x1 in a 60x30 viewport: frame is 22x10 at (19, 10).
    const VIEW: Viewport = Viewport {
        width: 60,
        height: 30,
    };

    fn screen_of(cell: Coordinate) -> (u16, u16) {
        (20 + cell.x as u16 * 2, 11 + cell.y as u16)
    }

    fn fg_at(fb: &FrameBuffer, cell: Coordinate) -> Rgb {
        let (x, y) = screen_of(cell);
        fb.get(x, y).unwrap().style.fg
    }

    #[test]
    fn paints_snake_bonus_and_barriers() {
        let g = game(GameStatus::Running);
        let fb = GameView::default().render(&g, VIEW);

        assert_eq!(fg_at(&fb, Coordinate::new(4, 3)), HEAD);
        assert_eq!(fg_at(&fb, Coordinate::new(5, 3)), BODY);
        assert_eq!(fg_at(&fb, Coordinate::new(6, 3)), BODY);
        assert_eq!(fg_at(&fb, Coordinate::new(9, 7)), BONUS);
        assert_eq!(fg_at(&fb, Coordinate::new(0, 0)), BARRIER);

        let (x, y) = screen_of(Coordinate::new(4, 3));
        assert_eq!(fb.get(x, y).unwrap().ch, '█');
        assert_eq!(fb.get(x + 1, y).unwrap().ch, '█');

        let (x, y) = screen_of(Coordinate::new(2, 5));
        let empty = fb.get(x, y).unwrap();
        assert_eq!(empty.ch, ' ');
        assert_eq!(empty.style.bg, BACKGROUND);
    }

    #[test]
    fn barriers_paint_over_a_bonus() {
        let snapshot = GameSnapshot {
            barriers: vec![Coordinate::new(0, 0), Coordinate::new(9, 7)],
            ..game(GameStatus::Pause).to_snapshot().unwrap()
        };
        let g = GameState::from_snapshot(snapshot, SimpleRng::new(1)).unwrap();
        let fb = GameView::default().render(&g, VIEW);
        assert_eq!(g.bonus(), Some(Coordinate::new(9, 7)));
        assert_eq!(fg_at(&fb, Coordinate::new(9, 7)), BARRIER);
    }

    #[test]
    fn hover_outline_only_while_editable() {
        let view = GameView::default();
        let hover = Coordinate::new(2, 5);
        let hud = Hud {
            hover: Some(hover),
            ..Hud::default()
        };
        let (x, y) = screen_of(hover);

        let fb = view.render_with_hud(&game(GameStatus::Pause), &hud, VIEW);
        assert_eq!(fb.get(x, y).unwrap().ch, '[');
        assert_eq!(fb.get(x + 1, y).unwrap().ch, ']');
        assert_eq!(fb.get(x, y).unwrap().style.fg, SELECT);

        let fb = view.render_with_hud(&game(GameStatus::Running), &hud, VIEW);
        assert_eq!(fb.get(x, y).unwrap().ch, ' ');

        // A barrier under the pointer stays a barrier.
        let on_barrier = Hud {
            hover: Some(Coordinate::new(0, 0)),
            ..Hud::default()
        };
        let fb = view.render_with_hud(&game(GameStatus::Pause), &on_barrier, VIEW);
        assert_eq!(fg_at(&fb, Coordinate::new(0, 0)), BARRIER);
        assert_eq!(fb.get(20, 11).unwrap().ch, '█');

        let outside = Hud {
            hover: Some(Coordinate::new(10, 0)),
            ..Hud::default()
        };
        let fb = view.render_with_hud(&game(GameStatus::Pause), &outside, VIEW);
        assert_eq!(fb.get(40, 11).unwrap().ch, '│');
    }

    #[test]
    fn draws_border_around_board() {
        let g = game(GameStatus::Running);
        let fb = GameView::default().render(&g, VIEW);
        assert_eq!(fb.get(19, 10).unwrap().ch, '┌');
        assert_eq!(fb.get(40, 10).unwrap().ch, '┐');
        assert_eq!(fb.get(19, 19).unwrap().ch, '└');
        assert_eq!(fb.get(40, 19).unwrap().ch, '┘');
    }

    #[test]
    fn cell_at_inverts_board_geometry() {
        let g = game(GameStatus::Pause);
        let view = GameView::default();
        for cell in [
            Coordinate::new(0, 0),
            Coordinate::new(9, 7),
            Coordinate::new(4, 3),
        ] {
            let (x, y) = screen_of(cell);
            assert_eq!(view.cell_at(&g, VIEW, x, y), Some(cell));
            assert_eq!(view.cell_at(&g, VIEW, x + 1, y), Some(cell));
        }

        // Border and outside.
        assert_eq!(view.cell_at(&g, VIEW, 19, 11), None);
        assert_eq!(view.cell_at(&g, VIEW, 20, 10), None);
        assert_eq!(view.cell_at(&g, VIEW, 40, 11), None);
        assert_eq!(view.cell_at(&g, VIEW, 0, 0), None);
    }

    #[test]
    fn side_panel_lists_stats_and_controls() {
        let g = game(GameStatus::Pause);
        let hud = Hud {
            steps_per_second: 15,
            ..Hud::default()
        };
        let fb = GameView::default().render_with_hud(&g, &hud, VIEW);
        let text: Vec<String> = (0..VIEW.height).map(|y| fb.row_text(y)).collect();
        let all = text.join("\n");

        assert!(all.contains("SCORE"));
        assert!(text[11].contains(" 3"));
        assert!(all.contains("TIME"));
        assert!(text[14].contains("12"));
        assert!(all.contains("SPEED"));
        assert!(all.contains("15"));
        assert!(all.contains("paused"));
        assert!(all.contains("Continue"));
        assert!(all.contains("Save"));
        assert!(!all.contains("Start"));
    }

    #[test]
    fn overlays_follow_status() {
        let view = GameView::default();
        let row = |status| view.render(&game(status), VIEW).row_text(15);

        assert!(row(GameStatus::Origin).contains("PRESS SPACE"));
        assert!(row(GameStatus::Pause).contains("PAUSED"));
        assert!(row(GameStatus::Over).contains("GAME OVER"));
        assert!(!row(GameStatus::Running).contains("PAUSED"));
    }

    #[test]
    fn notice_goes_under_board() {
        let g = game(GameStatus::Over);
        let hud = Hud {
            notice: Some("You are dead."),
            ..Hud::default()
        };
        let fb = GameView::default().render_with_hud(&g, &hud, VIEW);
        assert!(fb.row_text(20).contains("You are dead."));

        let tiny = Viewport::new(30, 4);
        let fb = GameView::default().render_with_hud(&g, &hud, tiny);
        assert!(fb.row_text(3).contains("You are dead."));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let g = game(GameStatus::Running);
        let view = GameView::default();
        for (w, h) in [(0, 0), (1, 1), (5, 3), (22, 10)] {
            let fb = view.render(&g, Viewport::new(w, h));
            assert_eq!(fb.width(), w);
            assert_eq!(fb.height(), h);
        }
    }
}
