//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write;

use arrayvec::ArrayString;

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};
use crate::types::{GamePhase, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// A lightweight terminal view of the playfield.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Size of the bordered field in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            FIELD_WIDTH as u16 * self.cell_w + 2,
            FIELD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        let active_cells = snap.active.map(|a| a.cells());
        for (row, line) in snap.board.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                let (x, y) = (col as u16, row as u16);
                match cell {
                    Some(kind) => {
                        let falling = active_cells
                            .is_some_and(|cells| cells.contains(&(row as i8, col as i8)));
                        self.fill_cell(fb, start_x, start_y, x, y, '█', block_style(*kind, falling));
                    }
                    None => {
                        let style = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
                        self.fill_cell(fb, start_x, start_y, x, y, '·', style);
                    }
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        match snap.phase {
            GamePhase::Pause => {
                self.draw_overlay(fb, start_x, start_y, frame_w, frame_h, &["PAUSED"]);
            }
            GamePhase::Finished => {
                self.draw_overlay(
                    fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    &["GAME OVER", "R: restart"],
                );
            }
            GamePhase::NewBlock | GamePhase::Play => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

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

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        // Preview of the next piece in spawn orientation, one glyph column pair per cell.
        for (dr, dc) in get_shape(snap.next, Rotation::North) {
            let px = panel_x + (dc as u16) * 2;
            let py = y + dr as u16;
            fb.put_str(px, py, "██", CellStyle::new(kind_color(snap.next), PANEL_BG));
        }
        y += 3;

        fb.put_str(panel_x, y, "SPEED", label);
        y += 1;
        let speed = if snap.soft_drop { "fast" } else { "normal" };
        // "normal 4294967295ms" is the longest value.
        let mut text = ArrayString::<20>::new();
        let _ = write!(text, "{speed} {}ms", snap.drop_interval_ms);
        fb.put_str(panel_x, y, &text, value);
        y += 2;

        fb.put_str(panel_x, y, "STATE", label);
        y += 1;
        fb.put_str(panel_x, y, snap.phase.as_str(), value);
        y += 2;

        for line in ["←/→  move", "↑    rotate", "↓    soft drop", "r    restart", "q    quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let top = start_y + frame_h / 2 - (lines.len() as u16) / 2;
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = start_x + frame_w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}

fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

fn block_style(kind: PieceKind, falling: bool) -> CellStyle {
    let style = CellStyle::new(kind_color(kind), FIELD_BG);
    if falling {
        style.bold()
    } else {
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_includes_border() {
        assert_eq!(GameView::default().frame_size(), (22, 22));
        assert_eq!(GameView::new(1, 1).frame_size(), (12, 22));
    }

    #[test]
    fn falling_piece_is_bold_and_stack_is_not() {
        assert!(block_style(PieceKind::T, true).bold);
        assert!(!block_style(PieceKind::T, false).bold);
    }
}
