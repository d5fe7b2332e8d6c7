//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{catalog_shape, ActivePiece, Effects, GameSnapshot, RowFlash};
use crate::fb::{Cell, CellStyle, FrameBuffer};
use crate::types::{Phase, Rgb, BLACK, GRID_HEIGHT, GRID_WIDTH, WHITE};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const GRID_DOT: Rgb = Rgb::new(70, 70, 80);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const DIM_TEXT: Rgb = Rgb::new(140, 140, 150);

/// Darkening applied to the field under the pause / game-over overlays.
const OVERLAY_DIM: u8 = 140;

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

/// Screen-space placement of the bordered play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
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

    /// Render one frame into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        effects: &Effects,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        if !snap.shows_field() {
            self.draw_menu(fb, snap, viewport);
            return;
        }

        let frame = self.frame(viewport);
        self.draw_field(fb, snap, frame);
        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            Phase::Paused => self.draw_overlay(fb, frame, "PAUSED", None),
            Phase::GameOver => self.draw_overlay(fb, frame, "GAME OVER", Some("R restart")),
            Phase::Menu | Phase::Playing => {}
        }

        for flash in effects.flashes() {
            self.draw_row_flash(fb, frame, flash);
        }

        let fade = effects.fade();
        if !fade.is_done() {
            fb.map_rect(0, 0, viewport.width, viewport.height, |s| {
                s.darkened(fade.alpha)
            });
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, effects: &Effects, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, effects, viewport, &mut fb);
        fb
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = GRID_WIDTH as u16 * self.cell_w + 2;
        let h = GRID_HEIGHT as u16 * self.cell_h + 2;
        Frame {
            x: viewport.width.saturating_sub(w + PANEL_W) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let title = CellStyle::new(WHITE, BLACK).bold();
        let text = CellStyle::new(TEXT, BLACK);
        let hint = CellStyle::new(DIM_TEXT, BLACK);

        let mid = viewport.height / 2;
        let top = mid.saturating_sub(3);
        put_centered(fb, viewport.width, top, "T E T R I S", title);
        put_centered(fb, viewport.width, top + 2, "SPACE  start", text);
        put_centered(fb, viewport.width, top + 3, "ESC    exit ", text);

        let label = "BEST ";
        let digits = decimal_width(snap.high_score);
        let w = label.len() as u16 + digits;
        let x = viewport.width.saturating_sub(w) / 2;
        fb.put_str(x, top + 5, label, hint);
        fb.put_u32(x + label.len() as u16, top + 5, snap.high_score, hint);
    }

    fn draw_field(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        let empty = CellStyle::new(GRID_DOT, FIELD_BG);

        draw_border(fb, frame, border);

        for (row, cells) in snap.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, frame, col as u16, row as u16, *color),
                    None => self.fill_cell(fb, frame, col as u16, row as u16, '·', empty),
                }
            }
        }

        // The spawn that ended the run overlaps locked cells; skip it.
        if snap.phase != Phase::GameOver {
            self.draw_piece(fb, frame, &snap.active);
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, frame: Frame, piece: &ActivePiece) {
        let color = piece.color();
        for (row, col) in piece.grid_cells() {
            if (0..GRID_HEIGHT as i16).contains(&row) && (0..GRID_WIDTH as i16).contains(&col) {
                self.draw_block(fb, frame, col as u16, row as u16, color);
            }
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, col: u16, row: u16, color: Rgb) {
        self.fill_cell(fb, frame, col, row, '█', CellStyle::new(color, FIELD_BG));
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, col: u16, row: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + col * self.cell_w;
        let py = frame.y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(PANEL_W - 2) > viewport.width {
            return;
        }

        let label = CellStyle::new(TEXT, BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("BEST", snap.high_score),
            ("LINES", snap.lines_cleared),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let shape = catalog_shape(snap.next.kind);
        let style = CellStyle::new(snap.next.color(), BLACK);
        for (row, col) in shape.cells() {
            let px = panel_x + col as u16 * self.cell_w;
            let py = y + row as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, text: &str, hint: Option<&str>) {
        fb.map_rect(frame.x + 1, frame.y + 1, frame.w - 2, frame.h - 2, |s| {
            s.darkened(OVERLAY_DIM)
        });

        let mid_y = frame.y.saturating_add(frame.h / 2);
        let style = CellStyle::new(WHITE, BLACK).bold();
        put_centered_in(fb, frame.x, frame.w, mid_y, text, style);
        if let Some(hint) = hint {
            let style = CellStyle::new(TEXT, BLACK);
            put_centered_in(fb, frame.x, frame.w, mid_y.saturating_add(2), hint, style);
        }
    }

    fn draw_row_flash(&self, fb: &mut FrameBuffer, frame: Frame, flash: &RowFlash) {
        if flash.row >= GRID_HEIGHT || flash.is_done() {
            return;
        }
        let inner_w = frame.w - 2;
        let w = ((inner_w as f32) * flash.coverage()).round() as u16;
        if w == 0 {
            return;
        }
        let x = frame.x + 1 + (inner_w - w.min(inner_w)) / 2;
        let y = frame.y + 1 + flash.row as u16 * self.cell_h;
        let color = FIELD_BG.blend(WHITE, flash.alpha);
        fb.fill_rect(x, y, w, self.cell_h, ' ', CellStyle::new(color, color));
    }
}

/// Columns reserved right of the field for the side panel.
const PANEL_W: u16 = 12;

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
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

fn put_centered(fb: &mut FrameBuffer, width: u16, y: u16, text: &str, style: CellStyle) {
    put_centered_in(fb, 0, width, y, text, style);
}

fn put_centered_in(fb: &mut FrameBuffer, x: u16, width: u16, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    fb.put_str(x.saturating_add(width.saturating_sub(text_w) / 2), y, text, style);
}

fn decimal_width(mut n: u32) -> u16 {
    let mut w = 1;
    while n >= 10 {
        n /= 10;
        w += 1;
    }
    w
}
