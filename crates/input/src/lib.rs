//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] commands,
//! difficulty picks and start/quit requests. It knows nothing about the
//! session; the binary decides what each key means in the current phase.

pub mod map;

pub use blockfall_types as types;

pub use map::{difficulty_for_key, handle_key_event, is_start_key, should_quit};
