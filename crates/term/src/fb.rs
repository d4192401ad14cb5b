//! Character-grid canvas the game view paints into.
//!
//! Coordinates are terminal columns and rows. Anything drawn outside the
//! grid is dropped, so callers can lay out against a small terminal without
//! bounds checks of their own.

use std::slice::ChunksExact;

use crate::types::Color;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let (r, g, b) = color.rgb();
        Self::new(r, g, b)
    }
}

/// Colors and attributes of a glyph. Built up with the chaining methods:
/// `Style::new(fg).on(bg).bold()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn new(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::BLACK,
            bold: false,
            dim: false,
        }
    }

    pub const fn on(self, bg: Rgb) -> Self {
        Self { bg, ..self }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220))
    }
}

/// One character position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

/// Axis-aligned block of terminal positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// A `w` by `h` rect centered in `outer`, pinned to its top-left corner
    /// when it does not fit.
    pub fn centered(outer: Rect, w: u16, h: u16) -> Self {
        Self::new(
            outer.x.saturating_add(outer.w.saturating_sub(w) / 2),
            outer.y.saturating_add(outer.h.saturating_sub(h) / 2),
            w,
            h,
        )
    }

    /// Shrink by `n` on every side.
    pub fn inset(self, n: u16) -> Self {
        Self::new(
            self.x.saturating_add(n),
            self.y.saturating_add(n),
            self.w.saturating_sub(n * 2),
            self.h.saturating_sub(n * 2),
        )
    }

    pub fn right(self) -> u16 {
        self.x.saturating_add(self.w)
    }
}

/// Row-major grid of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut fb = Self {
            width: 0,
            height: 0,
            glyphs: Vec::new(),
        };
        fb.reset(width, height, Glyph::default());
        fb
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Start a new frame: adopt the given size and paint every position with
    /// `blank`. The allocation is reused across frames.
    pub fn reset(&mut self, width: u16, height: u16, blank: Glyph) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs.resize(width as usize * height as usize, blank);
    }

    fn slot(&mut self, x: u16, y: u16) -> Option<&mut Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs.get_mut(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Rows top to bottom, each exactly `width` glyphs long.
    pub fn rows(&self) -> ChunksExact<'_, Glyph> {
        // chunks_exact panics on zero; an empty grid yields no rows either way.
        self.glyphs.chunks_exact(usize::from(self.width.max(1)))
    }

    pub fn put(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(slot) = self.slot(x, y) {
            *slot = glyph;
        }
    }

    /// Write `text` left to right from `(x, y)`, clipping at the right edge.
    /// Returns the column just past the last character written.
    pub fn text(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width {
                break;
            }
            self.put(cx, y, Glyph::new(ch, style));
            cx += 1;
        }
        cx
    }

    pub fn fill(&mut self, rect: Rect, glyph: Glyph) {
        let bottom = rect.y.saturating_add(rect.h).min(self.height);
        let right = rect.right().min(self.width);
        for y in rect.y..bottom {
            for x in rect.x..right {
                self.put(x, y, glyph);
            }
        }
    }

    /// Draw a single-line box around the edge of `rect`.
    pub fn outline(&mut self, rect: Rect, style: Style) {
        if rect.w < 2 || rect.h < 2 {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.y.saturating_add(rect.h) - 1);
        for x in left + 1..right {
            self.put(x, top, Glyph::new('─', style));
            self.put(x, bottom, Glyph::new('─', style));
        }
        for y in top + 1..bottom {
            self.put(left, y, Glyph::new('│', style));
            self.put(right, y, Glyph::new('│', style));
        }
        self.put(left, top, Glyph::new('┌', style));
        self.put(right, top, Glyph::new('┐', style));
        self.put(left, bottom, Glyph::new('└', style));
        self.put(right, bottom, Glyph::new('┘', style));
    }

    /// The characters of one row, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.rows()
            .nth(usize::from(y))
            .map(|row| row.iter().map(|g| g.ch).collect())
            .unwrap_or_default()
    }
}
