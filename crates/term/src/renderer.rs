//! TerminalRenderer: puts framebuffers on a real terminal.
//!
//! A frame after `enter`, `invalidate` or a size change repaints every row.
//! Other frames only rewrite the spans that differ from what is on screen.
//! Mouse reporting stays on while the renderer owns the terminal.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Up to this many unchanged cells between two changes are reprinted rather
/// than skipped with a cursor move.
const SPAN_GAP: usize = 3;

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

#[derive(Debug)]
pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows; `None` forces a full repaint.
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            scratch: Vec::with_capacity(32 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?
            .queue(EnableMouseCapture)?;
        self.shown = None;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch
            .queue(DisableMouseCapture)?
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Put `fb` on screen and take it as the new reference frame.
    ///
    /// On return `fb` holds the previous frame's buffer, ready to be drawn
    /// into again, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        let mut prev = match self.shown.take() {
            Some(prev) if same_size(&prev, fb) => {
                encode_diff_into(&prev, fb, &mut self.scratch)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.scratch)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush()?;

        std::mem::swap(&mut prev, fb);
        self.shown = Some(prev);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.scratch.is_empty() {
            self.stdout.write_all(&self.scratch)?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Clear the screen and print every row of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let width = fb.width() as usize;
    if width == 0 {
        return Ok(());
    }

    let mut pen = Pen::new(out);
    for (y, row) in fb.cells().chunks(width).enumerate() {
        pen.move_to(0, y as u16)?;
        pen.print(row)?;
    }
    pen.finish()?;
    Ok(())
}

/// Print only what changed from `prev` to `next` into `out`.
///
/// Frames of different sizes fall back to [`encode_full_into`]. Identical
/// frames write nothing.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if !same_size(prev, next) {
        return encode_full_into(next, out);
    }

    let width = next.width() as usize;
    let mut pen = Pen::new(out);
    let mut touched = false;
    for span in changed_spans(prev, next) {
        let start = span.y as usize * width + span.x as usize;
        pen.move_to(span.x, span.y)?;
        pen.print(&next.cells()[start..start + span.len as usize])?;
        touched = true;
    }
    if touched {
        pen.finish()?;
    }
    Ok(())
}

/// A run of cells on one row that needs rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Changed spans of `next` against `prev`, top to bottom. Both frames must
/// have the same size.
pub fn changed_spans<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = Span> + 'a {
    let width = (next.width() as usize).max(1);
    prev.cells()
        .chunks(width)
        .zip(next.cells().chunks(width))
        .enumerate()
        .flat_map(|(y, (old, new))| {
            RowSpans { old, new, x: 0 }.map(move |(x, len)| Span {
                x: x as u16,
                y: y as u16,
                len: len as u16,
            })
        })
}

struct RowSpans<'a> {
    old: &'a [Cell],
    new: &'a [Cell],
    x: usize,
}

impl Iterator for RowSpans<'_> {
    /// `(start, len)` within the row.
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (old, new) = (self.old, self.new);
        let differs = |i: usize| old[i] != new[i];

        let start = (self.x..new.len()).find(|&i| differs(i))?;
        let mut end = start + 1;
        while let Some(i) = (end..new.len().min(end + SPAN_GAP + 1)).find(|&i| differs(i)) {
            end = i + 1;
        }
        self.x = end;
        Some((start, end - start))
    }
}

/// Writes cells while remembering the terminal's current style, so a colour
/// or attribute is only sent when it changes.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn print(&mut self, cells: &[Cell]) -> io::Result<()> {
        for cell in cells {
            self.restyle(cell.style)?;
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn restyle(&mut self, next: CellStyle) -> io::Result<()> {
        let prev = self.style.replace(next);
        if prev == Some(next) {
            return Ok(());
        }

        // SGR has no portable "bold off"; a reset drops colours as well.
        let reset = prev.map_or(true, |p| (p.bold && !next.bold) || (p.dim && !next.dim));
        let last = if reset {
            self.out.queue(SetAttribute(Attribute::Reset))?;
            None
        } else {
            prev
        };

        if last.map(|p| p.fg) != Some(next.fg) {
            self.out.queue(SetForegroundColor(next.fg.into()))?;
        }
        if last.map(|p| p.bg) != Some(next.bg) {
            self.out.queue(SetBackgroundColor(next.bg.into()))?;
        }
        if next.bold && !last.is_some_and(|p| p.bold) {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if next.dim && !last.is_some_and(|p| p.dim) {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }

    fn finish(self) -> io::Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}
