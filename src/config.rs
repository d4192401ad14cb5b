//! Runtime configuration from environment variables.

use std::env;

use crate::types::{Difficulty, DEFAULT_PLAYER_NAME};

/// Settings for the terminal game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Name shown in the side panel and the final score line.
    pub player: String,
    /// Difficulty for the first game. Can be changed with 1/2/3 between games.
    pub difficulty: Difficulty,
    /// Fixed piece seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// JSON-lines event log. `None` disables logging.
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: DEFAULT_PLAYER_NAME.to_string(),
            difficulty: Difficulty::Easy,
            seed: None,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Read `BLOCKFALL_PLAYER`, `BLOCKFALL_DIFFICULTY`, `BLOCKFALL_SEED` and
    /// `BLOCKFALL_LOG_PATH`. Missing or unparsable values use the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let player = non_empty(lookup("BLOCKFALL_PLAYER"))
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());

        let difficulty = lookup("BLOCKFALL_DIFFICULTY")
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or_default();

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = non_empty(lookup("BLOCKFALL_LOG_PATH"));

        Self {
            player,
            difficulty,
            seed,
            log_path,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}
