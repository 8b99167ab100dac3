//! Feedback notifications for the presentation layer.
//!
//! A session reports what happened (a card was tapped, a group was found
//! or missed) to a `FeedbackSink`. Sinks drive haptics, sounds or
//! animations; they never influence game state.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives gameplay notifications. Every method defaults to doing nothing.
pub trait FeedbackSink {
    /// A card was selected or deselected.
    fn on_card_selected(&mut self) {}

    /// A valid group was committed.
    fn on_valid_group(&mut self) {}

    /// A full selection was rejected.
    fn on_invalid_group(&mut self) {}

    /// A committed group was perfect.
    fn on_perfect_group(&mut self) {}
}

/// Sink that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {}

/// A recorded notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedbackEvent {
    CardSelected,
    ValidGroup,
    InvalidGroup,
    PerfectGroup,
}

/// Sink that records notifications in order.
///
/// Clones share one log, so a host can keep a handle while the session
/// owns another.
///
/// ```
/// use shapelogic::session::{FeedbackEvent, FeedbackLog, FeedbackSink};
///
/// let log = FeedbackLog::new();
/// let mut sink = log.clone();
/// sink.on_valid_group();
///
/// assert_eq!(log.events(), vec![FeedbackEvent::ValidGroup]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FeedbackLog {
    events: Rc<RefCell<Vec<FeedbackEvent>>>,
}

impl FeedbackLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.borrow().clone()
    }

    /// Number of times `event` was recorded.
    #[must_use]
    pub fn count(&self, event: FeedbackEvent) -> usize {
        self.events.borrow().iter().filter(|&&e| e == event).count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: FeedbackEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl FeedbackSink for FeedbackLog {
    fn on_card_selected(&mut self) {
        self.push(FeedbackEvent::CardSelected);
    }

    fn on_valid_group(&mut self) {
        self.push(FeedbackEvent::ValidGroup);
    }

    fn on_invalid_group(&mut self) {
        self.push(FeedbackEvent::InvalidGroup);
    }

    fn on_perfect_group(&mut self) {
        self.push(FeedbackEvent::PerfectGroup);
    }
}
