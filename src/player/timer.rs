//! Boundary timer handles.

use std::fmt;
use std::time::Duration;

/// Opaque handle of a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedules one-shot callbacks for the controller.
///
/// When an armed timer elapses the host feeds `Event::TimerFired(id)` back
/// into the controller. Cancelling an id that already fired is a no-op.
pub trait TimerHost {
    /// Schedule a callback after `delay` and return its handle.
    fn arm(&mut self, delay: Duration) -> TimerId;

    /// Cancel a scheduled callback.
    fn cancel(&mut self, id: TimerId);
}

/// The boundary timer currently held by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryTimer {
    pub id: TimerId,
    /// Segment whose end this timer waits for
    pub segment: usize,
    /// Delay the timer was scheduled with
    pub delay_ms: u64,
}
