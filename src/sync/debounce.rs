//! Debounced rescan scheduling.
//!
//! Host mutation signals are not synchronous with the host's render: the
//! DOM keeps settling for a moment after the signal fires. The timer here
//! defers the rescan by a short delay and coalesces signal bursts into one
//! deadline, as an explicit scheduling policy the controller drives from
//! its `tick` - no hidden threads or timers.

use std::time::{Duration, Instant};

/// Deadline-based debounce timer for affordance rescans.
#[derive(Debug)]
pub struct RescanTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RescanTimer {
    /// Create a timer with the given debounce delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Note a mutation signal at `now`, (re)arming the deadline.
    ///
    /// Signals arriving while armed push the deadline out, so a render
    /// burst produces a single rescan after the burst settles.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Consume the deadline if it has passed.
    ///
    /// Returns `true` at most once per arming: the rescan it requests is
    /// idempotent, but there is no reason to run it twice.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarm without firing (session teardown).
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a rescan is currently scheduled.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
