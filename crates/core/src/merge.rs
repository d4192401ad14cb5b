//! Merge & clear - lock a piece into the board and remove completed rows

use crate::board::Board;
use crate::piece::Piece;

/// Write every occupied cell of `piece` into the board with the piece's
/// color, then clear all full rows. Returns the number of rows cleared.
///
/// The piece must be at a position that does not collide, and must not have
/// cells above the top row; violating either is a bug in the caller and
/// panics.
pub fn lock(piece: &Piece, board: &mut Board) -> usize {
    for (row, col) in piece.cells() {
        assert!(
            row >= 0,
            "cannot lock {:?} with a cell above the board (row {})",
            piece.kind,
            row
        );
        board.set(row as usize, col as usize, Some(piece.color));
    }

    board.clear_full_rows().len()
}
