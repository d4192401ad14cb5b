//! Terminal rendering for blockfall.
//!
//! A small game-oriented rendering layer: [`GameView`] draws a session
//! snapshot into a [`FrameBuffer`], and [`TerminalRenderer`] flushes that
//! buffer to a crossterm backend. The view is pure and unit-tested; only the
//! renderer touches the terminal. The renderer also rings the bell, which is
//! the only audio a terminal has.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rect, Rgb, Style};
pub use game_view::{game_over_message, GameView, Viewport};
pub use renderer::{encode_full_into, TerminalRenderer};
