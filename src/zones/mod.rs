//! Card locations: draw pile, table and collected cards.
//!
//! ## Key Types
//!
//! - `Pile`: which of the three piles a card is in
//! - `TableManager`: partition tracking, dealing and invariant restoration

pub mod manager;

pub use manager::{Pile, TableManager};
