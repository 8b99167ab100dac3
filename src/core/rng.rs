//! Randomness sources for shuffling and table placement.
//!
//! The engine never reaches for a global RNG. Every session owns a
//! `RandomSource`, which is the sole supplier of randomness:
//!
//! - **Deck order**: `shuffle_cards` lays out the draw pile on a new game
//! - **Table placement**: `insert_index` picks where a dealt card lands
//!   for variants that scatter new cards into the table
//!
//! `GameRng` is the seeded production source. `InOrder` is a fully
//! deterministic stream for tests and scripted scenarios.
//!
//! ```
//! use shapelogic::core::{CardId, GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut pile_a: Vec<CardId> = (0..81).map(CardId).collect();
//! let mut pile_b = pile_a.clone();
//! a.shuffle_cards(&mut pile_a);
//! b.shuffle_cards(&mut pile_b);
//!
//! assert_eq!(pile_a, pile_b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::entity::CardId;

/// Source of all randomness a session consumes.
pub trait RandomSource {
    /// Reorder a freshly generated draw pile. The tail is the top.
    fn shuffle_cards(&mut self, cards: &mut [CardId]);

    /// Choose an insertion position in `0..=len` for a card dealt onto a
    /// table of `len` cards.
    fn insert_index(&mut self, len: usize) -> usize;
}

/// Seeded RNG for deck shuffling and table placement.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
/// Same seed produces the same game.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

impl RandomSource for GameRng {
    fn shuffle_cards(&mut self, cards: &mut [CardId]) {
        self.shuffle(cards);
    }

    fn insert_index(&mut self, len: usize) -> usize {
        self.gen_range_usize(0..=len)
    }
}

/// Deterministic source: no randomness at all.
///
/// Lays the draw pile out so cards are dealt in canonical deck order
/// (card 0 first), and always appends dealt cards to the end of the table.
#[derive(Clone, Copy, Debug, Default)]
pub struct InOrder;

impl RandomSource for InOrder {
    fn shuffle_cards(&mut self, cards: &mut [CardId]) {
        cards.sort_unstable_by(|a, b| b.cmp(a));
    }

    fn insert_index(&mut self, len: usize) -> usize {
        len
    }
}
