//! Brute-force valid-group search.
//!
//! Tables are small (at most a few dozen cards), so every candidate subset
//! of the right size is tried in lexicographic index order until one
//! passes the predicate. Only existence matters; the first hit is returned.

use smallvec::SmallVec;

use super::predicate::GroupPredicate;
use crate::cards::Card;
use crate::core::config::GroupSize;
use crate::core::entity::CardId;

/// Index buffer for one combination.
pub type IndexSet = SmallVec<[usize; 8]>;

/// Iterator over all `k`-element index subsets of `0..n`, in
/// lexicographic order.
///
/// ```
/// use shapelogic::rules::Combinations;
///
/// let all: Vec<Vec<usize>> = Combinations::new(4, 2).map(|c| c.to_vec()).collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: IndexSet,
    started: bool,
    done: bool,
}

impl Combinations {
    /// Subsets of size `k` drawn from `n` items.
    #[must_use]
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = IndexSet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        // Rightmost index that can still move forward
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            self.done = true;
            return None;
        };

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// Find a valid group among `cards`.
///
/// Fixed-size predicates try only subsets of that size. Open-ended ones try
/// sizes from the minimum up to the whole table.
#[must_use]
pub fn find_group(predicate: &GroupPredicate, cards: &[&Card]) -> Option<Vec<CardId>> {
    let sizes = match predicate.group_size() {
        GroupSize::Exactly(n) => n..=n,
        GroupSize::AtLeast(n) => n.max(1)..=cards.len(),
    };

    let mut candidate: SmallVec<[&Card; 8]> = SmallVec::new();
    for size in sizes {
        for combo in Combinations::new(cards.len(), size) {
            candidate.clear();
            candidate.extend(combo.iter().map(|&i| cards[i]));
            if predicate.is_valid_group(&candidate) {
                return Some(candidate.iter().map(|c| c.id).collect());
            }
        }
    }
    None
}
