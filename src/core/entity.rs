//! Card identification.
//!
//! Every card in a deck has a unique `CardId`.
//!
//! ## ID Layout
//!
//! A card's ID is its position in the variant's canonical deck
//! enumeration: `0..deck_size`. Because every enumeration yields unique
//! feature vectors, the ID and the feature vector are in 1:1
//! correspondence within a session.
//!
//! ## Usage
//!
//! ```
//! use shapelogic::core::CardId;
//!
//! let card = CardId::new(10);
//! assert_eq!(card.index(), 10);
//! assert_eq!(format!("{}", card), "Card(10)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a variant's deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a card ID from a deck position.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Position of this card in the canonical deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for CardId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
