//! Single-slot ownership of the boundary timer.
//!
//! The slot enforces the at-most-one-live-timer rule: arming always cancels
//! whatever was armed before, and a fired id is only honoured if it is the
//! one currently held.

use std::time::Duration;

use crate::player::timer::{BoundaryTimer, TimerHost, TimerId};

#[derive(Debug, Default)]
pub struct TimerSlot {
    armed: Option<BoundaryTimer>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<BoundaryTimer> {
        self.armed
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Cancel any armed timer, then schedule a new one for `segment`.
    pub fn arm<T: TimerHost + ?Sized>(
        &mut self,
        host: &mut T,
        segment: usize,
        delay_ms: u64,
    ) -> BoundaryTimer {
        self.disarm(host);
        let id = host.arm(Duration::from_millis(delay_ms));
        let timer = BoundaryTimer {
            id,
            segment,
            delay_ms,
        };
        self.armed = Some(timer);
        timer
    }

    /// Cancel and clear the armed timer, if any.
    pub fn disarm<T: TimerHost + ?Sized>(&mut self, host: &mut T) -> Option<BoundaryTimer> {
        let timer = self.armed.take()?;
        host.cancel(timer.id);
        Some(timer)
    }

    /// Clear the slot for a timer that has fired.
    ///
    /// Returns `None` when `id` is not the armed timer (a stale callback
    /// from a timer that was cancelled after it had already been queued).
    pub fn release(&mut self, id: TimerId) -> Option<BoundaryTimer> {
        match self.armed {
            Some(timer) if timer.id == id => self.armed.take(),
            _ => None,
        }
    }
}
