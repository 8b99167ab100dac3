//! Group rules: the validity predicate and the brute-force group search.
//!
//! The table manager and selection controller call into these but never
//! interpret feature values themselves.

pub mod predicate;
pub mod search;

pub use predicate::GroupPredicate;
pub use search::{find_group, Combinations};
