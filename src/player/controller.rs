//! Segment sync controller
//!
//! Maps the continuously advancing player clock onto the discrete segment
//! list: locates the active segment, auto-pauses at its end, and services
//! Next / Repeat / Jump. All input arrives through `handle`, one event at a
//! time; the player and the timer scheduler are injected so the machine can
//! be driven without a real player.

use tracing::{debug, info};

use crate::player::clock::ClockAdapter;
use crate::player::event::{Command, Event, LoadRequest, NoEffect, Outcome};
use crate::player::playback::TimerSlot;
use crate::player::state::{Phase, SyncState, SyncView};
use crate::player::timer::{BoundaryTimer, TimerHost, TimerId};
use crate::subtitles::SegmentList;

/// Behaviour switches for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Jump to the first segment once captions are loaded and the player is ready
    pub autoplay: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self { autoplay: true }
    }
}

/// Owns the sync state, the player clock and the boundary timer.
///
/// Dropping the controller cancels any armed boundary timer.
pub struct SyncController<C: ClockAdapter, T: TimerHost> {
    state: SyncState,
    timer: TimerSlot,
    clock: C,
    timers: T,
    options: SyncOptions,
}

impl<C: ClockAdapter, T: TimerHost> SyncController<C, T> {
    pub fn new(clock: C, timers: T) -> Self {
        Self::with_options(clock, timers, SyncOptions::default())
    }

    pub fn with_options(clock: C, timers: T, options: SyncOptions) -> Self {
        Self {
            state: SyncState::new(),
            timer: TimerSlot::new(),
            clock,
            timers,
            options,
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn view(&self) -> SyncView {
        self.state.view()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn segments(&self) -> &SegmentList {
        &self.state.segments
    }

    pub fn active_index(&self) -> Option<usize> {
        self.state.active
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    /// The boundary timer currently armed, if any.
    pub fn armed_timer(&self) -> Option<BoundaryTimer> {
        self.timer.current()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// Process one event.
    pub fn handle(&mut self, event: Event) -> Outcome {
        let outcome = match event {
            Event::Command(command) => self.command(command),
            Event::SegmentsLoaded {
                generation,
                segments,
            } => self.segments_loaded(generation, segments),
            Event::Ready => self.player_ready(),
            Event::Progress { position_ms } => self.progress(position_ms),
            Event::Played => self.played(),
            Event::Paused => self.paused(),
            Event::TimerFired(id) => self.timer_fired(id),
        };
        if let Outcome::NoEffect(reason) = &outcome {
            debug!(phase = %self.state.phase, %reason, "event had no effect");
        }
        outcome
    }

    pub fn command(&mut self, command: Command) -> Outcome {
        match command {
            Command::SetMediaId(id) => self.set_media_id(id),
            Command::Next => self.next(),
            Command::Repeat => self.repeat(),
            Command::Jump(index) => self.jump(index),
            Command::SetPlaying(playing) => self.set_playing(playing),
            Command::TogglePlay => self.toggle_play(),
        }
    }

    // === Commands ===

    /// Switch media. Returns the load the host must run for the new id.
    ///
    /// Cancels the boundary timer and drops the old segments; any load still
    /// in flight for the previous id becomes stale.
    pub fn set_media_id(&mut self, media_id: impl Into<String>) -> Outcome {
        let media_id = media_id.into();
        self.timer.disarm(&mut self.timers);
        self.state.clear_media();

        let media_id = media_id.trim().to_string();
        if media_id.is_empty() {
            info!("media cleared");
            return Outcome::Applied;
        }

        info!(media_id = %media_id, generation = self.state.generation, "loading captions");
        self.state.media_id = Some(media_id.clone());
        self.state.phase = Phase::Loading;
        Outcome::Load(LoadRequest {
            generation: self.state.generation,
            media_id,
        })
    }

    /// Seek to segment `index`, play it, and arm the boundary timer.
    pub fn jump(&mut self, index: usize) -> Outcome {
        let len = self.state.segments.len();
        let Some((start_ms, duration_ms)) = self
            .state
            .segments
            .get(index)
            .map(|s| (s.start_ms, s.duration_ms))
        else {
            return Outcome::NoEffect(NoEffect::OutOfRange { index, len });
        };

        if !self.state.player_ready {
            debug!(index, "deferring jump until the player is ready");
            self.state.pending_jump = Some(index);
            return Outcome::Deferred;
        }

        self.timer.disarm(&mut self.timers);
        self.clock.seek(start_ms);
        self.clock.set_playing(true);

        self.state.playing = true;
        self.state.active = Some(index);
        self.state.pending_jump = None;
        self.state.phase = Phase::SegmentActive;
        let timer = self.timer.arm(&mut self.timers, index, duration_ms);

        debug!(index, start_ms, timer = %timer.id, "jumped to segment");
        Outcome::Applied
    }

    /// Jump to the segment after the active one.
    pub fn next(&mut self) -> Outcome {
        let Some(active) = self.state.active else {
            return Outcome::NoEffect(NoEffect::NoActiveSegment);
        };
        if active + 1 >= self.state.segments.len() {
            return Outcome::NoEffect(NoEffect::AtLastSegment);
        }
        self.jump(active + 1)
    }

    /// Replay the active segment from its start.
    pub fn repeat(&mut self) -> Outcome {
        match self.state.active {
            Some(active) => self.jump(active),
            None => Outcome::NoEffect(NoEffect::NoActiveSegment),
        }
    }

    /// Manual play/pause, independent of segment boundaries.
    ///
    /// Resuming with nothing active starts the first segment; otherwise the
    /// request is only forwarded to the player. The player's Played/Paused
    /// echo takes care of the boundary timer.
    pub fn set_playing(&mut self, playing: bool) -> Outcome {
        if playing && self.state.active.is_none() && !self.state.segments.is_empty() {
            return self.jump(0);
        }
        if !self.state.player_ready {
            return Outcome::NoEffect(NoEffect::PlayerNotReady);
        }

        self.clock.set_playing(playing);
        self.state.playing = playing;
        Outcome::Applied
    }

    pub fn toggle_play(&mut self) -> Outcome {
        self.set_playing(!self.state.playing)
    }

    /// Tear down: cancel the timer and invalidate in-flight loads.
    pub fn shutdown(&mut self) {
        self.timer.disarm(&mut self.timers);
        self.state.clear_media();
        debug!("sync controller shut down");
    }

    // === Collaborator events ===

    fn segments_loaded(&mut self, generation: u64, segments: SegmentList) -> Outcome {
        if generation != self.state.generation || self.state.phase != Phase::Loading {
            debug!(
                generation,
                current = self.state.generation,
                "discarding stale caption load"
            );
            return Outcome::NoEffect(NoEffect::StaleLoad);
        }

        info!(count = segments.len(), "captions ready");
        self.state.segments = segments;
        self.state.active = None;
        self.state.phase = Phase::Ready;

        // A deferred jump was validated against the previous list
        self.state.pending_jump = None;

        if self.state.player_ready {
            self.autostart()
        } else {
            Outcome::Applied
        }
    }

    fn player_ready(&mut self) -> Outcome {
        if self.state.media_id.is_none() {
            return Outcome::NoEffect(NoEffect::Ignored(self.state.phase));
        }

        self.state.player_ready = true;
        match self.state.phase {
            Phase::Ready => self.autostart(),
            _ => Outcome::Applied,
        }
    }

    /// Run a deferred jump, or start at segment 0 when autoplay is on.
    fn autostart(&mut self) -> Outcome {
        if let Some(index) = self.state.pending_jump.take() {
            return self.jump(index);
        }
        if self.options.autoplay && !self.state.segments.is_empty() {
            return self.jump(0);
        }
        Outcome::Applied
    }

    fn progress(&mut self, position_ms: u64) -> Outcome {
        match self.state.phase {
            Phase::Idle | Phase::Loading => {
                return Outcome::NoEffect(NoEffect::Ignored(self.state.phase))
            }
            _ => {}
        }
        if !self.state.playing {
            return Outcome::NoEffect(NoEffect::NotPlaying);
        }

        let Some(index) = self.state.segments.locate(position_ms) else {
            // Gap between segments: keep the last active one
            return Outcome::NoEffect(NoEffect::Unchanged);
        };
        if self.state.active == Some(index) && self.timer.is_armed() {
            return Outcome::NoEffect(NoEffect::Unchanged);
        }

        let Some(segment) = self.state.segments.get(index) else {
            return Outcome::NoEffect(NoEffect::Unchanged);
        };
        let remaining = segment.remaining_ms(position_ms);

        self.state.active = Some(index);
        self.state.phase = Phase::SegmentActive;
        let timer = self.timer.arm(&mut self.timers, index, remaining);

        debug!(index, position_ms, remaining, timer = %timer.id, "playback entered segment");
        Outcome::Applied
    }

    fn timer_fired(&mut self, id: TimerId) -> Outcome {
        let Some(timer) = self.timer.release(id) else {
            return Outcome::NoEffect(NoEffect::StaleTimer);
        };

        if !self.state.playing {
            self.state.phase = Phase::SegmentPaused;
            return Outcome::NoEffect(NoEffect::NotPlaying);
        }

        let Some(segment) = self.state.segments.get(timer.segment) else {
            return Outcome::NoEffect(NoEffect::StaleTimer);
        };
        let end_ms = segment.end_ms();

        // The timer is only an estimate; trust the player's position
        let position_ms = self.clock.position_ms();
        if position_ms >= end_ms {
            self.clock.set_playing(false);
            self.state.playing = false;
            self.state.phase = Phase::SegmentPaused;
            info!(segment = timer.segment, position_ms, "auto-paused at segment end");
        } else {
            let remaining = end_ms - position_ms;
            let timer = self.timer.arm(&mut self.timers, timer.segment, remaining);
            debug!(position_ms, remaining, timer = %timer.id, "boundary timer woke early, rescheduled");
        }
        Outcome::Applied
    }

    fn played(&mut self) -> Outcome {
        if !self.state.player_ready {
            return Outcome::NoEffect(NoEffect::PlayerNotReady);
        }
        self.state.playing = true;

        if self.timer.is_armed() {
            return Outcome::Applied;
        }

        // Resumed from native controls: wait for the rest of the active segment
        if let Some(index) = self.state.active {
            if let Some(segment) = self.state.segments.get(index) {
                let position_ms = self.clock.position_ms();
                if position_ms < segment.end_ms() {
                    let remaining = segment.end_ms() - position_ms;
                    self.timer.arm(&mut self.timers, index, remaining);
                    self.state.phase = Phase::SegmentActive;
                }
            }
        }
        Outcome::Applied
    }

    fn paused(&mut self) -> Outcome {
        if !self.state.player_ready {
            return Outcome::NoEffect(NoEffect::PlayerNotReady);
        }
        self.state.playing = false;

        if self.timer.disarm(&mut self.timers).is_some() {
            self.state.phase = Phase::SegmentPaused;
        }
        Outcome::Applied
    }
}

impl<C: ClockAdapter, T: TimerHost> Drop for SyncController<C, T> {
    fn drop(&mut self) {
        self.timer.disarm(&mut self.timers);
    }
}
