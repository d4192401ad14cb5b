//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and the session state machine. It
//! has no terminal or file I/O; time enters only through the [`Scheduler`]
//! trait, so a whole game can be replayed in a test with a
//! [`ManualScheduler`] and a fixed seed.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of colored cells and full-row clearing
//! - [`shape`]: the seven shape matrices and clockwise rotation
//! - [`piece`]: a shape with a color and a position
//! - [`generator`]: uniform random piece selection
//! - [`collision`]: bounds and overlap checks
//! - [`movement`]: shift, rotate and descend candidates
//! - [`merge`]: locking a piece into the board
//! - [`scoring`]: line-clear points scaled by difficulty
//! - [`scheduler`]: cancellable one-shot descent timers
//! - [`session`]: phases, commands, timer ticks and signals
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly at random (no bag)
//! - Rotation is clockwise only, with no wall kicks
//! - A piece that cannot descend locks immediately (no lock delay)
//! - Points are 0/40/100/300/1200 for 0-4 lines, times 1/2/3 by difficulty
//! - The game ends when a freshly spawned piece overlaps the stack
//!
//! # Example
//!
//! ```
//! use blockfall_core::{ManualScheduler, Session};
//! use blockfall_types::{Difficulty, GameAction, Phase};
//!
//! let mut session = Session::new(12345, ManualScheduler::new());
//! session.start("Ada", Difficulty::Medium);
//!
//! session.apply_action(GameAction::MoveRight);
//! session.apply_action(GameAction::Rotate);
//!
//! // One medium tick later the piece has dropped a row.
//! let row = session.current().unwrap().row;
//! session.scheduler_mut().advance(500);
//! session.pump();
//! assert_eq!(session.current().unwrap().row, row + 1);
//! assert_eq!(session.phase(), Phase::Playing);
//! ```

pub mod board;
pub mod collision;
pub mod generator;
pub mod merge;
pub mod movement;
pub mod piece;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, fits};
pub use generator::PieceGenerator;
pub use merge::lock;
pub use movement::{try_descend, try_move, try_rotate, Descent};
pub use piece::Piece;
pub use scheduler::{InstantScheduler, ManualScheduler, Scheduler, TimerHandle};
pub use scoring::{apply_score, line_clear_points};
pub use session::{FinalScore, Session, StepOutcome};
pub use shape::Shape;
pub use snapshot::Snapshot;
