//! Cards: an identity plus an immutable feature vector.
//!
//! Feature values lie in `0..alphabet_size`. Binary variants read a value
//! of 1 as "present".

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::entity::CardId;

/// Feature values of a card. Inline up to eight features.
pub type FeatureVec = SmallVec<[u8; 8]>;

/// A card in a session.
///
/// ```
/// use shapelogic::cards::Card;
/// use shapelogic::core::CardId;
///
/// let card = Card::new(CardId(5), [2, 1, 0, 0]);
/// assert_eq!(card.feature(0), 2);
/// assert_eq!(card.feature_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Identity within the deck.
    pub id: CardId,

    /// Feature values, one per feature index.
    pub features: FeatureVec,
}

impl Card {
    /// Create a card from its identity and feature values.
    #[must_use]
    pub fn new(id: CardId, features: impl IntoIterator<Item = u8>) -> Self {
        Self {
            id,
            features: features.into_iter().collect(),
        }
    }

    /// Value of one feature.
    ///
    /// Panics if `index` is past the feature count.
    #[must_use]
    pub fn feature(&self, index: usize) -> u8 {
        self.features[index]
    }

    /// Whether a binary feature is present.
    #[must_use]
    pub fn has_feature(&self, index: usize) -> bool {
        self.features.get(index).is_some_and(|&v| v != 0)
    }

    /// Number of features.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.id)?;
        for (i, value) in self.features.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features() {
        let card = Card::new(CardId(3), [1, 0, 2]);
        assert_eq!(card.feature(2), 2);
        assert_eq!(card.feature_count(), 3);
        assert!(card.has_feature(0));
        assert!(!card.has_feature(1));
        assert!(!card.has_feature(9));
    }

    #[test]
    fn test_display() {
        let card = Card::new(CardId(12), [0, 1, 2, 0]);
        assert_eq!(card.to_string(), "Card(12)(0,1,2,0)");
    }

    #[test]
    fn test_serialization() {
        let card = Card::new(CardId(40), [1, 1, 0, 1, 0, 0]);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
