//! Read-only view of a session for renderers and score displays.

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{Difficulty, PieceKind, Phase};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub current: Option<Piece>,
    pub next: Piece,
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub player: String,
    pub score: u32,
    pub lines: u32,
}

impl Snapshot {
    /// Reset to the empty Idle state, keeping the player buffer's capacity.
    pub fn clear(&mut self) {
        self.board.clear();
        self.current = None;
        self.next = Piece::new(PieceKind::I);
        self.phase = Phase::Idle;
        self.difficulty = Difficulty::Easy;
        self.player.clear();
        self.score = 0;
        self.lines = 0;
    }

    /// Whether a game is running.
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: Piece::new(PieceKind::I),
            phase: Phase::Idle,
            difficulty: Difficulty::Easy,
            player: String::new(),
            score: 0,
            lines: 0,
        }
    }
}
