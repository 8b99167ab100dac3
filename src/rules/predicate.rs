//! Group-validity predicates.
//!
//! `GroupPredicate` decides whether a candidate group is valid under a
//! variant's algebra:
//!
//! - **Mod-sum**: exactly `k` cards; per feature, values sum to 0 mod `k`.
//!   For `k = 3` this is the same as "all equal or all distinct": three
//!   values in `{0,1,2}` sum to a multiple of 3 only as `v+v+v` or `0+1+2`.
//! - **Same-or-distinct**: exactly `k` cards; per feature, the value set
//!   has 1 element or `k` elements.
//! - **Even parity**: any non-empty group; per feature, the number of cards
//!   with the feature present is even (zero included).
//!
//! Groups that are too small, have the wrong size, repeat a card or mix
//! feature counts are invalid. The predicate never panics.

use rustc_hash::FxHashSet;

use crate::cards::Card;
use crate::core::config::{GroupSize, PredicateKind, VariantConfig};

/// Validity predicate for one variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupPredicate {
    kind: PredicateKind,
    alphabet_size: u8,
    group_size: GroupSize,
}

impl GroupPredicate {
    /// Create a predicate from its parts.
    #[must_use]
    pub const fn new(kind: PredicateKind, alphabet_size: u8, group_size: GroupSize) -> Self {
        Self {
            kind,
            alphabet_size,
            group_size,
        }
    }

    /// The predicate a variant configuration calls for.
    #[must_use]
    pub fn for_config(config: &VariantConfig) -> Self {
        Self::new(config.predicate, config.alphabet_size, config.group_size)
    }

    /// Predicate family.
    #[must_use]
    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    /// Group size rule.
    #[must_use]
    pub fn group_size(&self) -> GroupSize {
        self.group_size
    }

    /// Decide whether `cards` form a valid group.
    ///
    /// The answer does not depend on the order of `cards`.
    #[must_use]
    pub fn is_valid_group(&self, cards: &[&Card]) -> bool {
        if !self.well_formed(cards) {
            return false;
        }

        let feature_count = cards[0].feature_count();
        match self.kind {
            PredicateKind::ModSum => {
                let modulus = u32::from(self.alphabet_size);
                (0..feature_count).all(|f| {
                    let sum: u32 = cards.iter().map(|c| u32::from(c.feature(f))).sum();
                    sum % modulus == 0
                })
            }
            PredicateKind::SameOrDistinct => (0..feature_count).all(|f| {
                let distinct = distinct_values(cards, f);
                distinct == 1 || distinct == cards.len()
            }),
            PredicateKind::EvenParity => (0..feature_count).all(|f| {
                cards.iter().filter(|c| c.has_feature(f)).count() % 2 == 0
            }),
        }
    }

    /// Whether `cards` form a valid group in which every feature takes a
    /// different value on every card.
    #[must_use]
    pub fn is_perfect_group(&self, cards: &[&Card]) -> bool {
        self.is_valid_group(cards)
            && (0..cards[0].feature_count()).all(|f| distinct_values(cards, f) == cards.len())
    }

    /// Size, identity and shape checks shared by every family.
    fn well_formed(&self, cards: &[&Card]) -> bool {
        if cards.is_empty() {
            return false;
        }

        let size_ok = match self.group_size {
            GroupSize::Exactly(n) => cards.len() == n,
            GroupSize::AtLeast(n) => cards.len() >= n,
        };
        if !size_ok {
            return false;
        }

        let feature_count = cards[0].feature_count();
        if cards.iter().any(|c| c.feature_count() != feature_count) {
            return false;
        }

        let mut seen = FxHashSet::default();
        cards.iter().all(|c| seen.insert(c.id))
    }
}

fn distinct_values(cards: &[&Card], feature: usize) -> usize {
    cards
        .iter()
        .map(|c| c.feature(feature))
        .collect::<FxHashSet<_>>()
        .len()
}
