//! Piece module - a shape with a color and a board position
//!
//! Pieces are `Copy` values. Every transform returns a new candidate piece and
//! leaves the original untouched, so a rejected move needs no rollback.

use crate::shape::Shape;
use crate::types::{Color, PieceKind, BOARD_WIDTH};

/// A piece on (or about to enter) the board.
///
/// `row`/`col` locate the shape's top-left cell in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
    pub row: i8,
    pub col: i8,
}

impl Piece {
    /// Create a piece at its spawn position: row 0, horizontally centered.
    pub fn new(kind: PieceKind) -> Self {
        let shape = Shape::of(kind);
        Self {
            kind,
            shape,
            color: kind.color(),
            row: 0,
            col: spawn_col(shape.width()),
        }
    }

    /// Create a spawn-orientation piece at an explicit position.
    pub fn at(kind: PieceKind, row: i8, col: i8) -> Self {
        Self {
            row,
            col,
            ..Self::new(kind)
        }
    }

    /// Candidate offset by `d_row` rows and `d_col` columns, or `None` when
    /// the new position does not fit in `i8`.
    pub fn translated(&self, d_row: i8, d_col: i8) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
            ..*self
        })
    }

    /// Candidate rotated 90° clockwise about its top-left corner.
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Absolute `(row, col)` of every occupied cell. Rows may be negative.
    ///
    /// Widened to `i16` so a piece near the `i8` limits still yields its
    /// true cells.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        let (row, col) = (i16::from(self.row), i16::from(self.col));
        self.shape
            .cells()
            .map(move |(dy, dx)| (row + dy as i16, col + dx as i16))
    }
}

/// Spawn column for a shape of the given width:
/// `floor(BOARD_WIDTH / 2) - floor(width / 2)`.
pub fn spawn_col(shape_width: usize) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape_width / 2) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_columns() {
        assert_eq!(Piece::new(PieceKind::I).col, 3);
        assert_eq!(Piece::new(PieceKind::O).col, 4);
        assert_eq!(Piece::new(PieceKind::T).col, 4);
        for kind in PieceKind::ALL {
            assert_eq!(Piece::new(kind).row, 0);
        }
    }

    #[test]
    fn test_color_follows_kind() {
        let p = Piece::new(PieceKind::Z);
        assert_eq!(p.color, Color::Purple);
    }

    #[test]
    fn test_translated_is_pure() {
        let p = Piece::new(PieceKind::T);
        let moved = p.translated(1, -2).unwrap();
        assert_eq!((p.row, p.col), (0, 4));
        assert_eq!((moved.row, moved.col), (1, 2));
        assert_eq!(moved.shape, p.shape);
    }

    #[test]
    fn test_rotated_keeps_position() {
        let p = Piece::at(PieceKind::I, 5, 2);
        let r = p.rotated();
        assert_eq!((r.row, r.col), (5, 2));
        assert_eq!(r.shape.height(), 4);
        assert_eq!(p.shape.height(), 1);
    }

    #[test]
    fn test_translated_overflow_is_none() {
        let p = Piece::at(PieceKind::I, 0, 3);
        assert_eq!(p.translated(0, i8::MAX), None);
        assert_eq!(p.translated(i8::MIN, 0).map(|m| m.row), Some(i8::MIN));
        assert_eq!(Piece::at(PieceKind::O, i8::MAX, 0).translated(1, 0), None);
    }

    #[test]
    fn test_cells_near_i8_limit() {
        let p = Piece::at(PieceKind::O, i8::MAX, i8::MAX);
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells[3], (128, 128));
    }

    #[test]
    fn test_absolute_cells() {
        let p = Piece::at(PieceKind::O, 18, 0);
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells, vec![(18, 0), (18, 1), (19, 0), (19, 1)]);
    }
}
