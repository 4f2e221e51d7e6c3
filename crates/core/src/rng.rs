//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomizer: a shuffled permutation of the seven kinds
//! is dealt one at a time; once all seven are out the permutation is reshuffled
//! and dealing starts over. Every run of 7 draws starting at a bag boundary thus
//! contains each kind exactly once.
//!
//! Shuffling uses a seeded `StdRng`, so equal seeds give equal sequences.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// Number of kinds per bag
pub const BAG_SIZE: usize = 7;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Current permutation of the seven kinds
    bag: [PieceKind; BAG_SIZE],
    /// Index of the next kind to deal
    cursor: usize,
    /// RNG for shuffling
    rng: StdRng,
}

impl PieceBag {
    /// Create a new bag with the given seed
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            cursor: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        bag.refill();
        bag
    }

    /// Reshuffle the permutation and rewind the cursor
    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.cursor = 0;
    }

    /// Draw the next piece from the bag
    pub fn draw(&mut self) -> PieceKind {
        if self.cursor >= BAG_SIZE {
            self.refill();
        }

        let piece = self.bag[self.cursor];
        self.cursor += 1;
        piece
    }

    /// Peek at the next piece without consuming it
    ///
    /// At a bag boundary this previews the upcoming reshuffle on a copy of the
    /// RNG, so the following `draw()` returns the same kind.
    pub fn peek(&self) -> PieceKind {
        if self.cursor < BAG_SIZE {
            return self.bag[self.cursor];
        }

        let mut preview_rng = self.rng.clone();
        let mut next_bag = PieceKind::ALL;
        next_bag.shuffle(&mut preview_rng);
        next_bag[0]
    }

    /// Index of the next kind within the current permutation
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Kinds still to be dealt from the current permutation
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.cursor..]
    }
}

impl Iterator for PieceBag {
    type Item = PieceKind;

    fn next(&mut self) -> Option<PieceKind> {
        Some(self.draw())
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
