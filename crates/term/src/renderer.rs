//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; every other frame only emits the runs of cells that
//! changed since the previous one.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use tracing::debug;

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

/// What one flush wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// The whole screen was repainted.
    pub full: bool,
    /// Contiguous runs of changed cells emitted.
    pub runs: u32,
    /// Cells emitted.
    pub cells: u32,
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Render into any byte sink (a `Vec<u8>` in tests).
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enabling raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        debug!("terminal entered");
        Ok(())
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        debug!("terminal restored");
        Ok(())
    }

    /// Force the next draw to be a full redraw (terminal resized).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// Keep one framebuffer and pass it in every frame: on return it holds
    /// the frame before this one, ready to be overwritten, so nothing is
    /// cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<FrameStats> {
        self.buf.clear();
        let (stats, mut prev) = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                (encode_diff_into(&prev, fb, &mut self.buf)?, prev)
            }
            stale => {
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                (encode_full_into(fb, &mut self.buf)?, prev)
            }
        };
        if stats.full || stats.runs > 0 {
            self.flush_buf()?;
        }

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(stats)
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out
            .write_all(&self.buf)
            .context("writing frame to terminal")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Emits style changes only when the style actually differs.
#[derive(Default)]
struct StyleState {
    current: Option<CellStyle>,
}

impl StyleState {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(color(style.fg)))?;
        out.queue(SetBackgroundColor(color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        self.current = Some(style);
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode a full-frame redraw into `out` without touching the terminal.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<FrameStats> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut style = StyleState::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            style.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }
    finish(out)?;

    Ok(FrameStats {
        full: true,
        runs: fb.height() as u32,
        cells: fb.width() as u32 * fb.height() as u32,
    })
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Both frames must have the same size; otherwise every row of `next` is
/// treated as changed.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<FrameStats> {
    let mut stats = FrameStats::default();
    let mut style = StyleState::default();

    for (x, y, len) in ChangedRuns::new(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            style.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        stats.runs += 1;
        stats.cells += len as u32;
    }

    if stats.runs > 0 {
        finish(out)?;
    }
    Ok(stats)
}

/// Iterator over `(x, y, len)` runs of horizontally adjacent changed cells.
struct ChangedRuns<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    same_size: bool,
    x: u16,
    y: u16,
}

impl<'a> ChangedRuns<'a> {
    fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self {
            prev,
            next,
            same_size: prev.width() == next.width() && prev.height() == next.height(),
            x: 0,
            y: 0,
        }
    }

    fn differs(&self, x: u16, y: u16) -> bool {
        self.prev.get(x, y) != self.next.get(x, y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = (u16, u16, u16);

    fn next(&mut self) -> Option<Self::Item> {
        let w = self.next.width();
        let h = self.next.height();

        if !self.same_size {
            if self.y >= h {
                return None;
            }
            let row = self.y;
            self.y += 1;
            return Some((0, row, w));
        }

        while self.y < h {
            while self.x < w && !self.differs(self.x, self.y) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && self.differs(self.x, self.y) {
                    self.x += 1;
                }
                return Some((start, self.y, self.x - start));
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    fn glyph(ch: char) -> Cell {
        Cell {
            ch,
            style: CellStyle::default(),
        }
    }

    #[test]
    fn full_encode_prints_every_glyph() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set(0, 0, glyph('A'));
        fb.set(1, 0, glyph('B'));
        fb.set(0, 1, glyph('C'));
        fb.set(1, 1, glyph('D'));

        let mut out = Vec::new();
        let stats = encode_full_into(&fb, &mut out).unwrap();
        assert!(stats.full);
        assert_eq!(stats.cells, 4);
        let text = String::from_utf8_lossy(&out);
        for ch in ["A", "B", "C", "D"] {
            assert!(text.contains(ch));
        }
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(8, 2);
        let mut b = FrameBuffer::new(8, 2);
        for x in 1..=3 {
            b.set(x, 0, glyph('X'));
        }
        b.set(7, 0, glyph('Y'));
        b.set(0, 1, glyph('Z'));

        let runs: Vec<_> = ChangedRuns::new(&a, &b).collect();
        assert_eq!(runs, vec![(1, 0, 3), (7, 0, 1), (0, 1, 1)]);
    }

    #[test]
    fn resized_frame_marks_every_row() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        let runs: Vec<_> = ChangedRuns::new(&a, &b).collect();
        assert_eq!(runs, vec![(0, 0, 4), (0, 1, 4)]);
    }

    #[test]
    fn draw_swap_sends_only_changes() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(10, 3);

        let first = term.draw_swap(&mut fb).unwrap();
        assert!(first.full);
        let written = term.writer().len();

        // Same picture again: nothing to send.
        fb.resize(10, 3);
        fb.clear(Cell::default());
        let second = term.draw_swap(&mut fb).unwrap();
        assert_eq!(second, FrameStats::default());
        assert_eq!(term.writer().len(), written);

        fb.clear(Cell::default());
        fb.put_str(2, 1, "ab", CellStyle::default());
        let third = term.draw_swap(&mut fb).unwrap();
        assert_eq!((third.full, third.runs, third.cells), (false, 1, 2));

        term.invalidate();
        fb.clear(Cell::default());
        assert!(term.draw_swap(&mut fb).unwrap().full);
    }
}
