//! Movement and rotation transforms with collision checks
//!
//! Each operation builds a candidate piece and returns it only if it fits.
//! The input piece is never modified.

use crate::board::Board;
use crate::collision::collides;
use crate::piece::Piece;

/// Result of trying to move a piece down one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// The piece moved; this is its new position.
    Moved(Piece),
    /// The row below is taken. The caller must lock the piece.
    Blocked,
}

/// Shift a piece horizontally by `d_col` columns.
///
/// Offsets that leave the representable range are rejected like any other
/// illegal placement.
pub fn try_move(piece: &Piece, board: &Board, d_col: i8) -> Option<Piece> {
    piece
        .translated(0, d_col)
        .filter(|candidate| !collides(candidate, board))
}

/// Rotate a piece 90° clockwise in place. No wall kicks are attempted.
pub fn try_rotate(piece: &Piece, board: &Board) -> Option<Piece> {
    let candidate = piece.rotated();
    (!collides(&candidate, board)).then_some(candidate)
}

/// Move a piece down one row.
pub fn try_descend(piece: &Piece, board: &Board) -> Descent {
    match piece.translated(1, 0) {
        Some(candidate) if !collides(&candidate, board) => Descent::Moved(candidate),
        _ => Descent::Blocked,
    }
}
