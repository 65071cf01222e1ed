//! Wall-clock driven stand-in for a media player.
//!
//! Plays at rate 1.0 from the last seek, reports `Ready` after media is
//! loaded, emits `Progress` ticks while playing, and echoes `Played` /
//! `Paused` when its play state changes, the way a real player reports
//! state changes back to the page.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::player::{ClockAdapter, Event};

#[derive(Debug)]
pub struct SimulatedClock {
    /// The clock's notion of "now", advanced by the runtime
    now: Instant,
    /// Position when playback last started, paused or seeked
    time_offset_ms: u64,
    /// When playback started/resumed; `None` while paused
    start_time: Option<Instant>,
    /// End of the media; playback stops there
    duration_ms: Option<u64>,
    loaded: bool,
    tick_interval: Duration,
    next_tick: Option<Instant>,
    pending: VecDeque<Event>,
}

impl SimulatedClock {
    pub fn new(now: Instant, tick_interval: Duration) -> Self {
        Self {
            now,
            time_offset_ms: 0,
            start_time: None,
            duration_ms: None,
            loaded: false,
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            next_tick: None,
            pending: VecDeque::new(),
        }
    }

    /// Load new media: rewind, stop, and report ready on the next poll.
    pub fn load_media(&mut self) {
        self.time_offset_ms = 0;
        self.start_time = None;
        self.duration_ms = None;
        self.next_tick = None;
        self.pending.clear();
        self.loaded = true;
        self.pending.push_back(Event::Ready);
    }

    pub fn set_duration(&mut self, duration_ms: Option<u64>) {
        self.duration_ms = duration_ms;
    }

    pub fn is_playing(&self) -> bool {
        self.start_time.is_some()
    }

    /// Move the clock forward. Earlier instants are ignored.
    pub fn advance_to(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn position_at(&self, now: Instant) -> u64 {
        let position = match self.start_time {
            Some(started) => {
                let elapsed = now.saturating_duration_since(started).as_millis() as u64;
                self.time_offset_ms.saturating_add(elapsed)
            }
            None => self.time_offset_ms,
        };
        match self.duration_ms {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    /// Advance to `now` and collect the events the player would report.
    pub fn poll(&mut self, now: Instant) -> Vec<Event> {
        self.advance_to(now);

        if self.is_playing() {
            let position = self.position_at(self.now);
            if self.duration_ms.is_some_and(|end| position >= end) {
                self.set_playing(false);
            } else if self.next_tick.is_some_and(|tick| tick <= self.now) {
                self.pending.push_back(Event::Progress {
                    position_ms: position,
                });
                self.next_tick = Some(self.now + self.tick_interval);
            }
        }

        self.pending.drain(..).collect()
    }

    /// When the clock next has something to report.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.pending.is_empty() {
            return Some(self.now);
        }
        if !self.is_playing() {
            return None;
        }
        let end = self.duration_ms.map(|duration| {
            let left = duration.saturating_sub(self.position_at(self.now));
            self.now + Duration::from_millis(left)
        });
        match (self.next_tick, end) {
            (Some(tick), Some(end)) => Some(tick.min(end)),
            (tick, end) => tick.or(end),
        }
    }
}

impl ClockAdapter for SimulatedClock {
    fn position_ms(&self) -> u64 {
        self.position_at(self.now)
    }

    fn seek(&mut self, position_ms: u64) {
        self.time_offset_ms = match self.duration_ms {
            Some(duration) => position_ms.min(duration),
            None => position_ms,
        };
        if self.start_time.is_some() {
            self.start_time = Some(self.now);
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if !self.loaded || playing == self.is_playing() {
            return;
        }
        if playing {
            self.start_time = Some(self.now);
            self.next_tick = Some(self.now + self.tick_interval);
            self.pending.push_back(Event::Played);
        } else {
            self.time_offset_ms = self.position_at(self.now);
            self.start_time = None;
            self.next_tick = None;
            self.pending.push_back(Event::Paused);
        }
    }
}
