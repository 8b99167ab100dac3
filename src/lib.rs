//! # shapelogic
//!
//! Rules engine for "Set"-style pattern matching card games.
//!
//! ## Design Principles
//!
//! 1. **One Engine, Many Variants**: Classic, Extended, Four-state and
//!    Projective games share one algorithm core. They differ only in a
//!    `VariantConfig` (alphabet, feature count, group size, predicate,
//!    table policy, scoring).
//!
//! 2. **No Failure Modes**: Running out of cards, tapping a card twice or
//!    selecting too many cards are no-ops or `false` results. The deck
//!    partition (draw pile, table, collected) is never broken.
//!
//! 3. **Injected Collaborators**: Randomness, feedback and timers are
//!    passed in, so a whole game can be replayed deterministically.
//!
//! ## Modules
//!
//! - `core`: Card IDs, RNG, variant configuration
//! - `cards`: Cards and deck enumeration
//! - `rules`: Group-validity predicates and group search
//! - `zones`: Draw pile / table / collected partition and replenishment
//! - `selection`: Selection state machine
//! - `session`: Game sessions, feedback and scheduling

pub mod core;
pub mod cards;
pub mod rules;
pub mod zones;
pub mod selection;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardId, ConfigError, GameRng, GroupSize, InOrder, PredicateKind, RandomSource, ScoreRule,
    TablePolicy, Variant, VariantConfig,
};

pub use crate::cards::{generate_deck, Card, FeatureVec};

pub use crate::rules::{find_group, Combinations, GroupPredicate};

pub use crate::zones::{Pile, TableManager};

pub use crate::selection::{Evaluation, SelectionController, Toggle};

pub use crate::session::{
    FeedbackEvent, FeedbackLog, FeedbackSink, GameSession, ManualScheduler, NullFeedback,
    Scheduler, SessionBuilder, SessionView, SystemScheduler, TimerId,
};
