//! Scoring module - line clears scaled by difficulty
//!
//! Base points come from [`LINE_SCORES`]: 0, 40, 100, 300, 1200 for 0-4 lines
//! cleared by a single lock. Anything above four uses the four-line entry.
//! The base is multiplied by the difficulty tier (x1 easy, x2 medium, x3 hard).

use crate::types::{Difficulty, LINE_SCORES};

/// Base points for clearing `lines` rows in one lock.
pub fn base_points(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Points awarded for one lock at the given difficulty.
pub fn line_clear_points(lines: usize, difficulty: Difficulty) -> u32 {
    base_points(lines).saturating_mul(difficulty.multiplier())
}

/// Add the points for one lock to `score` and return the points awarded.
///
/// The score never decreases.
pub fn apply_score(score: &mut u32, lines: usize, difficulty: Difficulty) -> u32 {
    let points = line_clear_points(lines, difficulty);
    *score = score.saturating_add(points);
    points
}
