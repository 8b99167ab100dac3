//! Variant configuration types.
//!
//! Every variant runs the same engine. What differs is plain data:
//! - `PredicateKind`: the group-validity algebra
//! - `GroupSize`: how many cards a group needs
//! - `TablePolicy`: how the table is kept stocked
//! - `ScoreRule`: what the score counts
//! - `VariantConfig`: combines all of the above
//!
//! `Variant` is the tag that selects one of the four built-in
//! configurations.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long the extended variant's "perfect group" flag stays raised.
pub const PERFECT_FLASH: Duration = Duration::from_millis(200);

/// Table floor for replenishing variants.
pub const TABLE_FLOOR: usize = 12;

/// Table size kept by the projective variant.
pub const PROJECTIVE_TABLE: usize = 7;

/// Errors raised while parsing or validating a configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown variant: {0}")]
    UnknownVariant(String),
    #[error("Alphabet size {0} is too small (need at least 2)")]
    AlphabetTooSmall(u8),
    #[error("Feature count {0} is out of range (1..=8)")]
    FeatureCount(usize),
    #[error("Deck of {0} cards does not fit card identifiers")]
    DeckTooLarge(u64),
    #[error("{predicate:?} needs a fixed group size of {expected}")]
    GroupSizeMismatch { predicate: PredicateKind, expected: usize },
    #[error("Parity predicate needs a binary alphabet, got {0}")]
    ParityAlphabet(u8),
    #[error("Table policy {0:?} does not fit the group size")]
    PolicyMismatch(TablePolicy),
}

/// The four built-in game variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// 81 cards, 4 ternary features, groups of 3.
    Classic,
    /// 243 cards, 5 ternary features, groups of 3.
    Extended,
    /// 64 cards, 3 quaternary features, groups of 4.
    FourState,
    /// 63 cards, 6 binary dots, groups of any size with even dot counts.
    Projective,
}

impl Variant {
    /// All built-in variants.
    pub const ALL: [Variant; 4] = [
        Variant::Classic,
        Variant::Extended,
        Variant::FourState,
        Variant::Projective,
    ];

    /// The configuration for this variant.
    #[must_use]
    pub fn config(self) -> VariantConfig {
        match self {
            Variant::Classic => VariantConfig {
                variant: self,
                alphabet_size: 3,
                feature_count: 4,
                omit_blank: false,
                group_size: GroupSize::Exactly(3),
                predicate: PredicateKind::ModSum,
                table_policy: TablePolicy::Replenish { floor: TABLE_FLOOR, batch: 3 },
                score_rule: ScoreRule::Groups,
                scatter_deals: false,
                // Cap sets in AG(4,3) have at most 20 cards
                max_table_cards: Some(21),
                perfect_flash: None,
                mark_last_dealt: false,
            },
            Variant::Extended => VariantConfig {
                variant: self,
                alphabet_size: 3,
                feature_count: 5,
                omit_blank: false,
                group_size: GroupSize::Exactly(3),
                predicate: PredicateKind::ModSum,
                table_policy: TablePolicy::Replenish { floor: TABLE_FLOOR, batch: 3 },
                score_rule: ScoreRule::Groups,
                scatter_deals: true,
                // Cap sets in AG(5,3) have at most 45 cards
                max_table_cards: Some(48),
                perfect_flash: Some(PERFECT_FLASH),
                mark_last_dealt: false,
            },
            Variant::FourState => VariantConfig {
                variant: self,
                alphabet_size: 4,
                feature_count: 3,
                omit_blank: false,
                group_size: GroupSize::Exactly(4),
                predicate: PredicateKind::SameOrDistinct,
                table_policy: TablePolicy::Replenish { floor: TABLE_FLOOR, batch: 4 },
                score_rule: ScoreRule::Groups,
                scatter_deals: false,
                max_table_cards: None,
                perfect_flash: None,
                mark_last_dealt: false,
            },
            Variant::Projective => VariantConfig {
                variant: self,
                alphabet_size: 2,
                feature_count: 6,
                omit_blank: true,
                group_size: GroupSize::AtLeast(3),
                predicate: PredicateKind::EvenParity,
                table_policy: TablePolicy::FixedSize { target: PROJECTIVE_TABLE },
                score_rule: ScoreRule::Cards,
                scatter_deals: false,
                max_table_cards: None,
                perfect_flash: None,
                mark_last_dealt: false,
            },
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Extended => "extended",
            Variant::FourState => "four-state",
            Variant::Projective => "projective",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == normalized)
            .ok_or_else(|| ConfigError::UnknownVariant(s.to_string()))
    }
}

/// Group-validity algebra.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateKind {
    /// Per feature, the values sum to 0 modulo the alphabet size.
    ModSum,
    /// Per feature, the values are all equal or all distinct.
    SameOrDistinct,
    /// Per feature, the number of cards with the feature present is even.
    EvenParity,
}

/// Number of cards a group needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupSize {
    /// Exactly this many cards; selection is capped here.
    Exactly(usize),
    /// At least this many cards; selection is uncapped.
    AtLeast(usize),
}

impl GroupSize {
    /// Smallest group the predicate will accept.
    #[must_use]
    pub const fn min(self) -> usize {
        match self {
            GroupSize::Exactly(n) | GroupSize::AtLeast(n) => n,
        }
    }

    /// Selection cap, if any.
    #[must_use]
    pub const fn cap(self) -> Option<usize> {
        match self {
            GroupSize::Exactly(n) => Some(n),
            GroupSize::AtLeast(_) => None,
        }
    }

    /// Whether groups have a fixed size.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, GroupSize::Exactly(_))
    }
}

/// How the table is kept stocked after a group leaves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TablePolicy {
    /// Deal `batch` cards at a time until the table holds at least `floor`
    /// cards and a valid group, or the draw pile runs out.
    Replenish { floor: usize, batch: usize },
    /// Refill one card at a time up to exactly `target` cards.
    FixedSize { target: usize },
}

/// What the score counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreRule {
    /// Number of committed groups.
    Groups,
    /// Number of cards collected through committed groups.
    Cards,
}

/// Complete variant configuration.
///
/// Built-in variants come from `Variant::config()`; the `with_*` methods
/// adjust the presentation options a host may toggle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Which built-in variant this configuration derives from.
    pub variant: Variant,

    /// Values per feature.
    pub alphabet_size: u8,

    /// Features per card.
    pub feature_count: usize,

    /// Leave the all-zero card out of the deck.
    pub omit_blank: bool,

    /// Cards per group.
    pub group_size: GroupSize,

    /// Validity algebra.
    pub predicate: PredicateKind,

    /// Table stocking policy.
    pub table_policy: TablePolicy,

    /// Scoring rule.
    pub score_rule: ScoreRule,

    /// Insert dealt cards at random table positions.
    pub scatter_deals: bool,

    /// Manual deals stop once the table holds this many cards.
    ///
    /// The largest group-free table (a cap set) has 20 cards in AG(4,3)
    /// and 45 in AG(5,3), so 21 classic cards, or 48 extended cards (the
    /// next multiple of the batch above 45), always hold a group.
    pub max_table_cards: Option<usize>,

    /// Raise a transient flag for this long after a perfect group.
    pub perfect_flash: Option<Duration>,

    /// Remember the card dealt when the draw pile ran out.
    pub mark_last_dealt: bool,
}

impl VariantConfig {
    /// Enable or disable the last-dealt marker.
    #[must_use]
    pub fn with_last_dealt_marker(mut self, enabled: bool) -> Self {
        self.mark_last_dealt = enabled;
        self
    }

    /// Enable or disable random table insertion.
    #[must_use]
    pub fn with_scatter_deals(mut self, enabled: bool) -> Self {
        self.scatter_deals = enabled;
        self
    }

    /// Set the manual deal limit.
    #[must_use]
    pub fn with_max_table_cards(mut self, max: Option<usize>) -> Self {
        self.max_table_cards = max;
        self
    }

    /// Set the perfect-group flash duration.
    #[must_use]
    pub fn with_perfect_flash(mut self, duration: Option<Duration>) -> Self {
        self.perfect_flash = duration;
        self
    }

    /// Number of cards in the full deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        let full = (self.alphabet_size as usize).pow(self.feature_count as u32);
        if self.omit_blank {
            full - 1
        } else {
            full
        }
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabet_size < 2 {
            return Err(ConfigError::AlphabetTooSmall(self.alphabet_size));
        }
        if !(1..=8).contains(&self.feature_count) {
            return Err(ConfigError::FeatureCount(self.feature_count));
        }

        let full = u64::from(self.alphabet_size).pow(self.feature_count as u32);
        if full > u64::from(u16::MAX) {
            return Err(ConfigError::DeckTooLarge(full));
        }

        match self.predicate {
            PredicateKind::ModSum | PredicateKind::SameOrDistinct => {
                let expected = self.alphabet_size as usize;
                if self.group_size != GroupSize::Exactly(expected) {
                    return Err(ConfigError::GroupSizeMismatch {
                        predicate: self.predicate,
                        expected,
                    });
                }
            }
            PredicateKind::EvenParity => {
                if self.alphabet_size != 2 {
                    return Err(ConfigError::ParityAlphabet(self.alphabet_size));
                }
            }
        }

        let fits = match (self.table_policy, self.group_size) {
            (TablePolicy::Replenish { batch, .. }, GroupSize::Exactly(n)) => batch == n,
            (TablePolicy::FixedSize { target }, GroupSize::AtLeast(n)) => target >= n,
            _ => false,
        };
        if !fits {
            return Err(ConfigError::PolicyMismatch(self.table_policy));
        }

        Ok(())
    }
}
