//! Card space: cards and deck enumeration.
//!
//! ## Key Types
//!
//! - `Card`: identity plus feature vector
//! - `FeatureVec`: inline feature storage
//! - `generate_deck`: the full, canonical deck for a variant

pub mod card;
pub mod deck;

pub use card::{Card, FeatureVec};
pub use deck::generate_deck;
