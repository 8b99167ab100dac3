//! Cooperative scheduling for transient flags.
//!
//! The session never sleeps. To lower a flag later it asks a `Scheduler`
//! for a timer. The flag comes down either when the host calls
//! `GameSession::fire_timer` with that timer's ID, or when the session
//! next looks at the flag and the scheduler reports the timer elapsed.
//! Timers can be cancelled; a fired ID that the session no longer waits
//! for is ignored.
//!
//! - `SystemScheduler` follows the wall clock and is the default.
//! - `ManualScheduler` keeps virtual time, so tests and single-threaded
//!   hosts decide exactly when timers fire.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Schedules fire-once timers.
pub trait Scheduler {
    /// Schedule a timer that fires after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. Unknown or already fired IDs are ignored.
    fn cancel(&mut self, id: TimerId);

    /// Whether a scheduled, uncancelled timer's deadline has passed.
    fn has_elapsed(&self, id: TimerId) -> bool;
}

/// Wall-clock scheduler.
///
/// Nothing calls back into the session; it polls `has_elapsed` instead.
#[derive(Clone, Debug, Default)]
pub struct SystemScheduler {
    next_id: u64,
    deadlines: FxHashMap<TimerId, Instant>,
}

impl SystemScheduler {
    /// Create a scheduler with no timers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for SystemScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.deadlines.insert(id, Instant::now() + delay);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.deadlines.remove(&id);
    }

    fn has_elapsed(&self, id: TimerId) -> bool {
        self.deadlines.get(&id).is_some_and(|&deadline| Instant::now() >= deadline)
    }
}

#[derive(Debug, Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    /// (deadline, id), unsorted
    pending: Vec<(Duration, TimerId)>,
    /// Deadlines of every uncancelled timer, fired or not
    deadlines: FxHashMap<TimerId, Duration>,
}

/// Virtual-time scheduler.
///
/// Clones share one clock, so the host keeps a handle to advance time
/// while the session owns another.
///
/// ```
/// use std::time::Duration;
/// use shapelogic::session::{ManualScheduler, Scheduler};
///
/// let clock = ManualScheduler::new();
/// let mut handle = clock.clone();
/// let id = handle.schedule(Duration::from_millis(200));
///
/// assert!(clock.advance(Duration::from_millis(100)).is_empty());
/// assert_eq!(clock.advance(Duration::from_millis(100)), vec![id]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move time forward and return the timers that came due, earliest
    /// first.
    pub fn advance(&self, by: Duration) -> Vec<TimerId> {
        let mut clock = self.clock.borrow_mut();
        clock.now += by;
        let now = clock.now;

        let mut due: Vec<(Duration, TimerId)> = Vec::new();
        clock.pending.retain(|&(deadline, id)| {
            if deadline <= now {
                due.push((deadline, id));
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        let id = TimerId(clock.next_id);
        clock.next_id += 1;
        let deadline = clock.now + delay;
        clock.pending.push((deadline, id));
        clock.deadlines.insert(id, deadline);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let mut clock = self.clock.borrow_mut();
        clock.pending.retain(|&(_, pending)| pending != id);
        clock.deadlines.remove(&id);
    }

    fn has_elapsed(&self, id: TimerId) -> bool {
        let clock = self.clock.borrow();
        clock.deadlines.get(&id).is_some_and(|&deadline| clock.now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let clock = ManualScheduler::new();
        let mut handle = clock.clone();

        let late = handle.schedule(Duration::from_millis(300));
        let early = handle.schedule(Duration::from_millis(100));

        assert_eq!(clock.pending_count(), 2);
        assert_eq!(clock.advance(Duration::from_secs(1)), vec![early, late]);
        assert_eq!(clock.pending_count(), 0);
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_cancel() {
        let clock = ManualScheduler::new();
        let mut handle = clock.clone();

        let id = handle.schedule(Duration::from_millis(200));
        handle.cancel(id);
        handle.cancel(TimerId(99));

        assert!(clock.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_has_elapsed() {
        let clock = ManualScheduler::new();
        let mut handle = clock.clone();

        let id = handle.schedule(Duration::from_millis(200));
        assert!(!handle.has_elapsed(id));

        clock.advance(Duration::from_millis(199));
        assert!(!handle.has_elapsed(id));

        // Still reported after advance hands it out
        clock.advance(Duration::from_millis(1));
        assert!(handle.has_elapsed(id));

        handle.cancel(id);
        assert!(!handle.has_elapsed(id));
        assert!(!handle.has_elapsed(TimerId(42)));
    }

    #[test]
    fn test_system_scheduler() {
        let mut scheduler = SystemScheduler::new();

        let now = scheduler.schedule(Duration::ZERO);
        let later = scheduler.schedule(Duration::from_secs(3600));
        assert_ne!(now, later);
        assert!(scheduler.has_elapsed(now));
        assert!(!scheduler.has_elapsed(later));

        scheduler.cancel(now);
        assert!(!scheduler.has_elapsed(now));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut clock = ManualScheduler::new();
        let a = clock.schedule(Duration::ZERO);
        let b = clock.schedule(Duration::ZERO);
        assert_ne!(a, b);
        assert_eq!(clock.advance(Duration::ZERO), vec![a, b]);
    }
}
