//! Piece generator - uniform random piece selection
//!
//! Each draw picks one of the seven kinds with equal probability and returns
//! it at its spawn position. The only state carried between draws is the RNG,
//! which is seedable so games can be reproduced in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::types::PieceKind;

/// Uniform random piece source
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
}

impl PieceGenerator {
    /// Create a generator with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Draw a piece kind uniformly at random
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())]
    }

    /// Draw a new piece at its spawn position
    pub fn next_piece(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
