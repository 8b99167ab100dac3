//! Game sessions and their external collaborators.
//!
//! ## Key Types
//!
//! - `GameSession`: one active game of one variant
//! - `SessionBuilder`: custom randomness, feedback, scheduling or config
//! - `SessionView`: serializable snapshot for the presentation layer
//! - `FeedbackSink`: haptic/animation notifications
//! - `Scheduler`: fire-once timers for transient flags

pub mod feedback;
pub mod game;
pub mod timer;

pub use feedback::{FeedbackEvent, FeedbackLog, FeedbackSink, NullFeedback};
pub use game::{GameSession, SessionBuilder, SessionView};
pub use timer::{ManualScheduler, Scheduler, SystemScheduler, TimerId};
