//! GameView: maps a session [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Piece, Snapshot};
use crate::fb::{FrameBuffer, Glyph, Rect, Rgb, Style};
use crate::types::{Color, Phase, BOARD_HEIGHT, BOARD_WIDTH};

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

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const FRAME: Style = Style::new(Rgb::new(200, 200, 200));
const EMPTY: Glyph = Glyph::new('·', Style::new(Rgb::new(90, 90, 100)).on(PLAY_BG).dim());
const LABEL: Style = Style::new(Rgb::new(220, 220, 220)).bold();
const VALUE: Style = Style::new(Rgb::new(200, 200, 200));
const BANNER: Style = Style::new(Rgb::WHITE).bold();

/// Narrowest side panel worth drawing.
const PANEL_MIN_W: u16 = 12;

/// Text shown when a game ends.
pub fn game_over_message(player: &str, score: u32) -> String {
    format!("{player}, your score is: {score}")
}

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render a snapshot into an existing framebuffer, resizing it to the
    /// viewport.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height, Glyph::default());

        let well_w = BOARD_WIDTH as u16 * self.cell_w;
        let well_h = BOARD_HEIGHT as u16 * self.cell_h;
        let frame = Rect::centered(fb.area(), well_w + 2, well_h + 2);
        let well = frame.inset(1);

        fb.outline(frame, FRAME);
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                let glyph = match snap.board.get(row, col) {
                    Some(color) => block(color, PLAY_BG),
                    None => EMPTY,
                };
                fb.fill(self.cell_rect(well, row as u16, col as u16), glyph);
            }
        }

        if snap.phase == Phase::Playing {
            if let Some(piece) = snap.current {
                self.draw_piece(fb, well, &piece);
            }
        }

        let panel_x = frame.right().saturating_add(2);
        if viewport.width.saturating_sub(panel_x) >= PANEL_MIN_W {
            self.draw_side_panel(fb, snap, panel_x, frame.y);
        }

        match snap.phase {
            Phase::Idle => banner(fb, frame, &["PRESS ENTER", "1/2/3 DIFFICULTY"]),
            Phase::GameOver => {
                let message = game_over_message(&snap.player, snap.score);
                banner(fb, frame, &["GAME OVER", &message, "R TO RESTART"]);
            }
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Terminal area covered by one board cell.
    fn cell_rect(&self, origin: Rect, row: u16, col: u16) -> Rect {
        Rect::new(
            origin.x.saturating_add(col * self.cell_w),
            origin.y.saturating_add(row * self.cell_h),
            self.cell_w,
            self.cell_h,
        )
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, well: Rect, piece: &Piece) {
        let rows = 0..BOARD_HEIGHT as i16;
        let cols = 0..BOARD_WIDTH as i16;
        for (row, col) in piece.cells() {
            // Cells above the top row are not visible yet.
            if rows.contains(&row) && cols.contains(&col) {
                let rect = self.cell_rect(well, row as u16, col as u16);
                fb.fill(rect, block(piece.color, PLAY_BG));
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot, x: u16, top: u16) {
        let fields = [
            ("PLAYER", snap.player.clone()),
            ("DIFFICULTY", snap.difficulty.as_str().to_owned()),
            ("SCORE", snap.score.to_string()),
            ("LINES", snap.lines.to_string()),
        ];
        let mut y = top;
        for (label, value) in &fields {
            fb.text(x, y, label, LABEL);
            fb.text(x, y.saturating_add(1), value, VALUE);
            y = y.saturating_add(3);
        }

        fb.text(x, y, "NEXT", LABEL);
        let preview = Rect::new(x, y.saturating_add(1), 0, 0);
        for (row, col) in snap.next.shape.cells() {
            let rect = self.cell_rect(preview, row as u16, col as u16);
            fb.fill(rect, block(snap.next.color, Rgb::BLACK));
        }
    }
}

/// A solid board block in the given piece color.
fn block(color: Color, bg: Rgb) -> Glyph {
    Glyph::new('█', Style::new(color.into()).on(bg).bold())
}

/// Center `lines` over the playfield, one per row.
fn banner(fb: &mut FrameBuffer, frame: Rect, lines: &[&str]) {
    let area = Rect::centered(frame, frame.w, lines.len() as u16);
    for (y, text) in (area.y..).zip(lines) {
        let line = Rect::centered(area, text.chars().count() as u16, 1);
        fb.text(line.x, y, text, BANNER);
    }
}
