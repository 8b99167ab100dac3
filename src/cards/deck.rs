//! Deterministic deck enumeration.
//!
//! Card `i` of a deck takes value `(i / k^j) mod k` for feature `j`, so
//! feature 0 varies fastest. Decks that omit the blank card (the
//! projective variant) enumerate `1..k^n` instead, so card `i` of the deck
//! encodes the number `i + 1`.
//!
//! ```
//! use shapelogic::cards::generate_deck;
//! use shapelogic::core::Variant;
//!
//! let deck = generate_deck(&Variant::Classic.config());
//! assert_eq!(deck.len(), 81);
//! assert_eq!(deck[1].features.as_slice(), &[1, 0, 0, 0]);
//! ```

use super::card::{Card, FeatureVec};
use crate::core::config::VariantConfig;
use crate::core::entity::CardId;

/// Decode a combination number into feature values.
fn decode(mut number: usize, alphabet: usize, feature_count: usize) -> FeatureVec {
    let mut features = FeatureVec::with_capacity(feature_count);
    for _ in 0..feature_count {
        features.push((number % alphabet) as u8);
        number /= alphabet;
    }
    features
}

/// Enumerate every card of a variant, in canonical order.
///
/// The result is identical on every call. Card IDs equal deck positions.
#[must_use]
pub fn generate_deck(config: &VariantConfig) -> Vec<Card> {
    let alphabet = config.alphabet_size as usize;
    let first = usize::from(config.omit_blank);

    (first..alphabet.pow(config.feature_count as u32))
        .enumerate()
        .map(|(index, number)| Card {
            id: CardId(index as u16),
            features: decode(number, alphabet, config.feature_count),
        })
        .collect()
}
