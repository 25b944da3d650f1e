//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Connectors, Direction, Position};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Terminal renderer for the board and its side panel.
pub struct GameView {
    /// Piece width in terminal columns.
    cell_w: u16,
    /// Piece height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

/// Where the board frame lands for a given snapshot and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 100);
const SOURCE_BG: Rgb = Rgb::new(110, 70, 20);
const WIRE_DARK: Rgb = Rgb::new(100, 100, 115);
const WIRE_DIM: Rgb = Rgb::new(130, 120, 60);
const WIRE_LIT: Rgb = Rgb::new(255, 230, 90);

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for a horizontal arm on each side of the glyph.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Allocation-free once `fb` has been sized for the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, viewport);
        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: BOARD_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: if snap.won {
                WIRE_LIT
            } else {
                Rgb::new(200, 200, 200)
            },
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w.saturating_sub(2),
            layout.frame_h.saturating_sub(2),
            ' ',
            bg,
        );
        self.draw_border(
            fb,
            layout.start_x,
            layout.start_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for piece in &snap.pieces {
            let selected = cursor == Some(piece.position());
            self.draw_piece(fb, layout, piece, snap.radius, selected);
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.won {
            self.draw_overlay_text(fb, layout, " YOU WON ");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    /// Board piece under terminal cell `(x, y)`, if any.
    pub fn cell_at(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<Position> {
        let layout = self.layout(snap, viewport);
        let px = x.checked_sub(layout.start_x + 1)?;
        let py = y.checked_sub(layout.start_y + 1)?;
        let col = (px / self.cell_w) as usize;
        let row = (py / self.cell_h) as usize;
        if row >= snap.height || col >= snap.width {
            return None;
        }
        Some(Position::new(row, col))
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let board_px_w = clamp_u16(snap.width).saturating_mul(self.cell_w);
        let board_px_h = clamp_u16(snap.height).saturating_mul(self.cell_h);
        let frame_w = board_px_w.saturating_add(2);
        let frame_h = board_px_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        piece: &PieceSnapshot,
        radius: u8,
        selected: bool,
    ) {
        let px = (layout.start_x + 1).saturating_add(clamp_u16(piece.col).saturating_mul(self.cell_w));
        let py = (layout.start_y + 1).saturating_add(clamp_u16(piece.row).saturating_mul(self.cell_h));
        // Pieces past the terminal edge are clipped.
        if px >= fb.width() || py >= fb.height() {
            return;
        }

        let bg = if selected {
            CURSOR_BG
        } else if piece.power_source {
            SOURCE_BG
        } else {
            BOARD_BG
        };
        let style = CellStyle {
            fg: wire_color(piece.power_amount, radius),
            bg,
            bold: piece.is_powered(),
            dim: !piece.is_powered(),
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let c = piece.connectors();
        let cx = px.saturating_add(self.cell_w / 2);
        let cy = py.saturating_add(self.cell_h / 2);
        let right_end = px.saturating_add(self.cell_w);
        let bottom_end = py.saturating_add(self.cell_h);

        for x in px..cx {
            if c.contains(Direction::Left) {
                fb.put_char(x, cy, '─', style);
            }
        }
        for x in cx.saturating_add(1)..right_end {
            if c.contains(Direction::Right) {
                fb.put_char(x, cy, '─', style);
            }
        }
        for y in py..cy {
            if c.contains(Direction::Up) {
                fb.put_char(cx, y, '│', style);
            }
        }
        for y in cy.saturating_add(1)..bottom_end {
            if c.contains(Direction::Down) {
                fb.put_char(cx, y, '│', style);
            }
        }

        let center = if piece.power_source {
            '◆'
        } else {
            connector_glyph(c)
        };
        fb.put_char(cx, cy, center, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 10 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "SIZE", label);
        y = y.saturating_add(1);
        let w = fb.put_u32(panel_x, y, clamp_u32(snap.width), value);
        fb.put_char(panel_x.saturating_add(w), y, 'x', value);
        fb.put_u32(panel_x.saturating_add(w).saturating_add(1), y, clamp_u32(snap.height), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "POWERED", label);
        y = y.saturating_add(1);
        let w = fb.put_u32(panel_x, y, clamp_u32(snap.powered), value);
        fb.put_char(panel_x.saturating_add(w), y, '/', value);
        fb.put_u32(panel_x.saturating_add(w).saturating_add(1), y, clamp_u32(snap.pieces.len()), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SEED", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.seed, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATUS", label);
        y = y.saturating_add(1);
        let status = if snap.won { "SOLVED" } else { "UNSOLVED" };
        fb.put_str(panel_x, y, status, value);
        y = y.saturating_add(2);

        if panel_w < 18 {
            return;
        }
        let dim = CellStyle { dim: true, ..value };
        for (keys, what) in [
            ("arrows", "power"),
            ("hjkl", "cursor"),
            ("space", "rotate"),
            ("click", "rotate"),
            ("q", "quit"),
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, keys, dim);
            fb.put_str(panel_x + 8, y, what, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: Layout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(20, 20, 20),
            bg: WIRE_LIT,
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Box-drawing glyph for a connector set.
pub fn connector_glyph(c: Connectors) -> char {
    match (c.top(), c.right(), c.bottom(), c.left()) {
        (false, false, false, false) => '·',
        (true, false, false, false) => '╵',
        (false, true, false, false) => '╶',
        (false, false, true, false) => '╷',
        (false, false, false, true) => '╴',
        (true, false, true, false) => '│',
        (false, true, false, true) => '─',
        (true, true, false, false) => '└',
        (false, true, true, false) => '┌',
        (false, false, true, true) => '┐',
        (true, false, false, true) => '┘',
        (true, true, true, false) => '├',
        (false, true, true, true) => '┬',
        (true, false, true, true) => '┤',
        (true, true, false, true) => '┴',
        (true, true, true, true) => '┼',
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn clamp_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn wire_color(power: u8, radius: u8) -> Rgb {
    if power == 0 {
        return WIRE_DARK;
    }
    WIRE_DIM.blend(WIRE_LIT, power as u32, radius.max(1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for bits in 0..16u8 {
            let c = Connectors::from_bits(bits).unwrap();
            assert!(seen.insert(connector_glyph(c)), "duplicate glyph for {bits}");
        }
    }

    #[test]
    fn test_glyph_follows_rotation() {
        let elbow = Connectors::empty().with(Direction::Up).with(Direction::Right);
        assert_eq!(connector_glyph(elbow), '└');
        assert_eq!(connector_glyph(elbow.rotate_cw()), '┌');
        assert_eq!(connector_glyph(elbow.rotated(2)), '┐');
        assert_eq!(connector_glyph(elbow.rotated(3)), '┘');
    }

    #[test]
    fn test_wire_color_scales_with_power() {
        assert_eq!(wire_color(0, 10), WIRE_DARK);
        assert_eq!(wire_color(10, 10), WIRE_LIT);
        assert_ne!(wire_color(5, 10), WIRE_LIT);
    }
}
