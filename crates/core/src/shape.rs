//! Shape module - occupied-cell matrices for the seven pieces
//!
//! A shape is a small rectangular boolean matrix in its own local frame,
//! stored inline (no allocation). Rotating a shape returns a new matrix.

use crate::types::PieceKind;

/// Largest shape extent in either direction.
pub const MAX_SHAPE_DIM: usize = 4;

/// Rectangular occupied-cell matrix, at most 4x4.
///
/// Cells outside `height x width` are always `false`, so two shapes compare
/// equal exactly when their visible matrices match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    height: u8,
    width: u8,
    filled: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a 0/1 matrix.
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let t = Shape::from_matrix([[1, 1, 1], [0, 1, 0]]);
    /// assert_eq!((t.height(), t.width()), (2, 3));
    /// assert!(t.is_filled(1, 1));
    /// assert!(!t.is_filled(1, 0));
    /// ```
    pub fn from_matrix<const R: usize, const C: usize>(matrix: [[u8; C]; R]) -> Self {
        assert!(
            (1..=MAX_SHAPE_DIM).contains(&R) && (1..=MAX_SHAPE_DIM).contains(&C),
            "shape must be between 1x1 and {0}x{0}",
            MAX_SHAPE_DIM
        );

        let mut filled = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in matrix.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                filled[r][c] = v != 0;
            }
        }

        Self {
            height: R as u8,
            width: C as u8,
            filled,
        }
    }

    /// Spawn-orientation shape for a piece kind.
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_matrix([[1, 1, 1, 1]]),
            PieceKind::O => Self::from_matrix([[1, 1], [1, 1]]),
            PieceKind::T => Self::from_matrix([[1, 1, 1], [0, 1, 0]]),
            PieceKind::L => Self::from_matrix([[1, 1, 1], [1, 0, 0]]),
            PieceKind::J => Self::from_matrix([[1, 1, 1], [0, 0, 1]]),
            PieceKind::Z => Self::from_matrix([[1, 1, 0], [0, 1, 1]]),
            PieceKind::S => Self::from_matrix([[0, 1, 1], [1, 1, 0]]),
        }
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Whether local cell (row, col) is occupied. False outside the matrix.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && self.filled[row][col]
    }

    /// Occupied cells as `(row, col)` offsets from the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |r| {
            (0..self.width())
                .filter(move |&c| self.filled[r][c])
                .map(move |c| (r, c))
        })
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    ///
    /// An `h x w` shape becomes `w x h`, and
    /// `rotated[i][j] = original[h - 1 - j][i]`.
    pub fn rotated_cw(&self) -> Self {
        let h = self.height();
        let w = self.width();

        let mut filled = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in filled.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.filled[h - 1 - j][i];
            }
        }

        Self {
            height: self.width,
            width: self.height,
            filled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(Shape::of(kind).cell_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_i_piece() {
        let i = Shape::of(PieceKind::I);
        let r = i.rotated_cw();
        assert_eq!((r.height(), r.width()), (4, 1));
        assert_eq!(r, Shape::from_matrix([[1], [1], [1], [1]]));
    }

    #[test]
    fn test_rotate_t_piece_clockwise() {
        // 111      01
        // 010  ->  11
        //          01
        let r = Shape::of(PieceKind::T).rotated_cw();
        assert_eq!(r, Shape::from_matrix([[0, 1], [1, 1], [0, 1]]));
    }

    #[test]
    fn test_rotate_l_piece_clockwise() {
        // 111      11
        // 100  ->  01
        //          01
        let r = Shape::of(PieceKind::L).rotated_cw();
        assert_eq!(r, Shape::from_matrix([[1, 1], [0, 1], [0, 1]]));
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let o = Shape::of(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for kind in PieceKind::ALL {
            let s = Shape::of(kind);
            let r = s.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(r, s, "{:?}", kind);
        }
    }

    #[test]
    fn test_cells_in_row_major_order() {
        let s = Shape::of(PieceKind::S);
        let cells: Vec<_> = s.cells().collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 0), (1, 1)]);
    }
}
