//! Board module - manages the game grid
//!
//! The board is a 20x10 grid where each cell is empty or holds the color of a
//! locked piece. Uses a flat array for cache locality and zero allocation.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 is the left edge.
//!
//! Direct cell access is bounds-checked and panics outside the grid. Callers
//! that work with signed, possibly off-board positions (collision tests) check
//! [`Board::in_bounds`] first.

use arrayvec::ArrayVec;

use crate::types::{Cell, Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// Each row must be exactly [`BOARD_WIDTH`] characters. `.` is an empty
    /// cell; a piece letter (`I`, `O`, `T`, `L`, `J`, `Z`, `S`) fills the cell
    /// with that piece's color and any other character fills it red. Rows not
    /// given are empty.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["IIIII.IIII"]);
    /// assert!(board.get(19, 0).is_some());
    /// assert!(board.get(19, 5).is_none());
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(
            rows.len() <= BOARD_HEIGHT,
            "{} rows do not fit on a {}-row board",
            rows.len(),
            BOARD_HEIGHT
        );

        let mut board = Self::new();
        let top = BOARD_HEIGHT - rows.len();
        for (i, line) in rows.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                BOARD_WIDTH,
                "row {:?} must be {} cells wide",
                line,
                BOARD_WIDTH
            );
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string())
                            .map(|kind| kind.color())
                            .unwrap_or(Color::Red),
                    ),
                };
                board.set(top + i, col, cell);
            }
        }
        board
    }

    /// Calculate flat index from (row, col), panicking outside the grid
    #[inline(always)]
    fn index(row: usize, col: usize) -> usize {
        assert!(
            row < BOARD_HEIGHT && col < BOARD_WIDTH,
            "cell ({}, {}) is outside the {}x{} board",
            row,
            col,
            BOARD_HEIGHT,
            BOARD_WIDTH
        );
        row * BOARD_WIDTH + col
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Whether a signed position lies on the grid.
    pub fn in_bounds(&self, row: i8, col: i8) -> bool {
        row >= 0 && (row as usize) < BOARD_HEIGHT && col >= 0 && (col as usize) < BOARD_WIDTH
    }

    /// Get cell at (row, col). Panics if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[Self::index(row, col)]
    }

    /// Set cell at (row, col). Panics if out of bounds.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[Self::index(row, col)] = cell;
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = Self::index(row, 0);
        &self.cells[start..start + BOARD_WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Remove a row, shift every row above it down by one, and insert an
    /// empty row at the top.
    pub fn clear_row(&mut self, row: usize) {
        let end = Self::index(row, 0) + BOARD_WIDTH;

        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..end - BOARD_WIDTH, BOARD_WIDTH);
        self.cells[..BOARD_WIDTH].fill(None);
    }

    /// Clear all full rows and return the row indices that were cleared
    /// (bottom to top, as they were numbered before clearing).
    ///
    /// Full rows are identified first and then removed in one compaction
    /// pass, so adjacent full rows are never skipped or scanned twice.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, BOARD_HEIGHT> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_row = BOARD_HEIGHT;

        // Scan from bottom to top
        for read_row in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                // Keep this row, moving it down to the write position
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * BOARD_WIDTH;
                    self.cells
                        .copy_within(src..src + BOARD_WIDTH, write_row * BOARD_WIDTH);
                }
            }
        }

        // Everything above the last written row is new, empty space
        self.cells[..write_row * BOARD_WIDTH].fill(None);

        cleared_rows
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: usize) {
        for col in 0..BOARD_WIDTH {
            board.set(row, col, Some(Color::Blue));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), 0);
        assert_eq!(Board::index(0, 9), 9);
        assert_eq!(Board::index(1, 0), 10);
        assert_eq!(Board::index(19, 9), 199);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_get_out_of_bounds_panics() {
        let board = Board::new();
        let _ = board.get(BOARD_HEIGHT, 0);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_set_out_of_bounds_panics() {
        let mut board = Board::new();
        board.set(0, BOARD_WIDTH, Some(Color::Red));
    }

    #[test]
    fn test_in_bounds() {
        let board = Board::new();
        assert!(board.in_bounds(0, 0));
        assert!(board.in_bounds(19, 9));
        assert!(!board.in_bounds(-1, 0));
        assert!(!board.in_bounds(0, -1));
        assert!(!board.in_bounds(20, 0));
        assert!(!board.in_bounds(0, 10));
    }

    #[test]
    fn test_clear_row_shifts_rows_above() {
        let mut board = Board::new();
        board.set(17, 2, Some(Color::Green));
        fill_row(&mut board, 18);
        board.set(19, 4, Some(Color::Yellow));

        board.clear_row(18);

        assert_eq!(board.get(18, 2), Some(Color::Green));
        assert_eq!(board.get(17, 2), None);
        assert_eq!(board.get(19, 4), Some(Color::Yellow));
        assert!(board.row(0).iter().all(|c| c.is_none()));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_clear_top_row() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        board.clear_row(0);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_clear_full_rows_adjacent_and_split() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 18);
        board.set(17, 0, Some(Color::Red));
        fill_row(&mut board, 16);
        board.set(15, 9, Some(Color::Orange));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[19, 18, 16]);
        assert_eq!(board.get(19, 0), Some(Color::Red));
        assert_eq!(board.get(18, 9), Some(Color::Orange));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_clear_full_rows_none() {
        let mut board = Board::from_rows(&["IIIII.IIII"]);
        let before = board.clone();
        assert!(board.clear_full_rows().is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_from_rows_bottom_aligned() {
        let board = Board::from_rows(&["T.........", "..........", "OOOOOOOOOO"]);
        assert_eq!(board.get(17, 0), Some(Color::Yellow));
        assert!(board.is_row_full(19));
        assert!(!board.is_row_full(18));
    }
}
