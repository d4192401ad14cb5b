//! Collision detection between a piece and the settled board.

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `piece` overlaps a wall, the floor, or a settled cell.
///
/// Cells above the top edge (negative rows) never collide on their own, so a
/// piece may sit partly above the board after spawning or rotating.
pub fn collides(piece: &Piece, board: &Board) -> bool {
    piece.cells().any(|(row, col)| {
        col < 0
            || col >= BOARD_WIDTH as i16
            || row >= BOARD_HEIGHT as i16
            || (row >= 0 && board.get(row as usize, col as usize).is_some())
    })
}

/// Inverse of [`collides`].
pub fn fits(piece: &Piece, board: &Board) -> bool {
    !collides(piece, board)
}
