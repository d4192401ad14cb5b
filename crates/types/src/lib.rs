//! Shared data types and constants.
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the core engine, the terminal front-end, and tests alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Difficulty
//!
//! | Difficulty | Descent interval | Score multiplier |
//! |------------|------------------|------------------|
//! | Easy       | 1000ms           | x1               |
//! | Medium     | 500ms            | x2               |
//! | Hard       | 200ms            | x3               |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Difficulty, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
//! assert_eq!(Difficulty::Medium.interval_ms(), 500);
//! assert_eq!(GameAction::from_str("softDrop"), Some(GameAction::SoftDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Name used when a session is started without one.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Line clear scoring table, indexed by lines cleared in a single lock.
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by [`Difficulty::multiplier`].
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven piece kinds, in generator order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    Z,
    S,
}

impl PieceKind {
    /// All kinds, in generator order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::S => "s",
        }
    }

    /// The color every piece of this kind is drawn and locked with.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Red,
            PieceKind::O => Color::Orange,
            PieceKind::T => Color::Yellow,
            PieceKind::L => Color::Green,
            PieceKind::J => Color::Blue,
            PieceKind::Z => Color::Purple,
            PieceKind::S => Color::Maroon,
        }
    }
}

/// Opaque color token stored in board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Maroon,
}

impl Color {
    /// CSS-style hex string, e.g. `"#FF4136"`.
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#FF4136",
            Color::Orange => "#FF851B",
            Color::Yellow => "#FFDC00",
            Color::Green => "#2ECC40",
            Color::Blue => "#0074D9",
            Color::Purple => "#B10DC9",
            Color::Maroon => "#85144B",
        }
    }

    /// 24-bit RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Red => (0xFF, 0x41, 0x36),
            Color::Orange => (0xFF, 0x85, 0x1B),
            Color::Yellow => (0xFF, 0xDC, 0x00),
            Color::Green => (0x2E, 0xCC, 0x40),
            Color::Blue => (0x00, 0x74, 0xD9),
            Color::Purple => (0xB1, 0x0D, 0xC9),
            Color::Maroon => (0x85, 0x14, 0x4B),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
pub type Cell = Option<Color>;

/// Difficulty tier, fixed for the lifetime of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Milliseconds between two descent ticks.
    pub fn interval_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 1000,
            Difficulty::Medium => 500,
            Difficulty::Hard => 200,
        }
    }

    /// Factor applied to the base line-clear score.
    pub fn multiplier(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No game has been started yet.
    #[default]
    Idle,
    /// A game is running and the descent timer is armed.
    Playing,
    /// The last spawned piece had no room. Re-enter with start or restart.
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::GameOver => "game_over",
        }
    }
}

/// Commands that take no arguments.
///
/// `start` needs a player name and difficulty, so it is a method on the
/// session rather than an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Descend one row now, locking if blocked
    SoftDrop,
    /// Start over with the previous name and difficulty
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::Restart => "restart",
        }
    }
}

/// Fire-and-forget cue for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Move,
    Rotate,
    LineClear { lines: u8 },
    GameOver,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Move => "move",
            Signal::Rotate => "rotate",
            Signal::LineClear { .. } => "line_clear",
            Signal::GameOver => "game_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_table() {
        assert_eq!(Difficulty::Easy.interval_ms(), 1000);
        assert_eq!(Difficulty::Medium.interval_ms(), 500);
        assert_eq!(Difficulty::Hard.interval_ms(), 200);

        assert_eq!(Difficulty::Easy.multiplier(), 1);
        assert_eq!(Difficulty::Medium.multiplier(), 2);
        assert_eq!(Difficulty::Hard.multiplier(), 3);
    }

    #[test]
    fn difficulty_parse_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str(" MEDIUM "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("insane"), None);
    }

    #[test]
    fn each_kind_has_its_own_color() {
        let colors: std::collections::HashSet<Color> =
            PieceKind::ALL.iter().map(|k| k.color()).collect();
        assert_eq!(colors.len(), 7);
        assert_eq!(PieceKind::I.color().hex(), "#FF4136");
        assert_eq!(PieceKind::S.color().rgb(), (0x85, 0x14, 0x4B));
    }

    #[test]
    fn line_scores_table() {
        assert_eq!(LINE_SCORES, [0, 40, 100, 300, 1200]);
    }
}
