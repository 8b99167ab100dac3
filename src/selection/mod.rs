//! Player selection and group evaluation.
//!
//! ## Key Types
//!
//! - `SelectionController`: marked cards and the evaluation rule
//! - `Toggle`: what a tap on a card did
//! - `Evaluation`: commit, reject, or keep waiting

pub mod controller;

pub use controller::{Evaluation, SelectionController, Toggle};
