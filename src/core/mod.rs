//! Core engine types: card identity, RNG, variant configuration.
//!
//! This module contains the building blocks shared by every variant.
//! Variants differ only in their `VariantConfig`.

pub mod entity;
pub mod rng;
pub mod config;

pub use entity::CardId;
pub use rng::{GameRng, InOrder, RandomSource};
pub use config::{
    ConfigError, GroupSize, PredicateKind, ScoreRule, TablePolicy, Variant, VariantConfig,
    PERFECT_FLASH, PROJECTIVE_TABLE, TABLE_FLOOR,
};
