//! Deadline-ordered timer host for the event loop.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::player::{TimerHost, TimerId};

/// One-shot timers keyed by id, fired by polling with the current time.
#[derive(Debug)]
pub struct TimerQueue {
    now: Instant,
    next_id: u64,
    deadlines: BTreeMap<TimerId, Instant>,
}

impl TimerQueue {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            next_id: 0,
            deadlines: BTreeMap::new(),
        }
    }

    /// Move the queue's clock forward. Earlier instants are ignored.
    pub fn advance_to(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Number of timers still scheduled.
    pub fn live_count(&self) -> usize {
        self.deadlines.len()
    }

    pub fn deadline(&self, id: TimerId) -> Option<Instant> {
        self.deadlines.get(&id).copied()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Advance to `now` and remove every timer that is due, earliest first.
    pub fn take_expired(&mut self, now: Instant) -> Vec<TimerId> {
        self.advance_to(now);

        let mut due: Vec<(Instant, TimerId)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= self.now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();

        for (_, id) in &due {
            self.deadlines.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl TimerHost for TimerQueue {
    fn arm(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        self.deadlines.insert(id, self.now + delay);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.deadlines.remove(&id);
    }
}
