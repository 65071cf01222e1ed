//! A practice session: the sync controller wired to a simulated player, a
//! deadline timer queue and the background caption loader, plus the
//! presentation-only state (subtitle visibility, typing input).

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::Config;
use crate::player::{
    ClockAdapter, Command, Event, Outcome, Phase, SyncController, SyncOptions, SyncView,
};
use crate::runtime::{SimulatedClock, TimerQueue};
use crate::subtitles::{LoadResult, SubtitleLoader, SubtitleSource};
use crate::typing::TypingAttempt;

/// Settings for a practice session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub tick_interval: Duration,
    pub autoplay: bool,
    pub show_subtitle: bool,
    pub fold_accents: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            tick_interval: config.player.progress_interval(),
            autoplay: config.player.autoplay,
            show_subtitle: config.practice.show_subtitle,
            fold_accents: config.practice.ignore_accents,
        }
    }
}

/// Everything the practice screen needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub sync: SyncView,
    pub subtitle_visible: bool,
    pub position_ms: u64,
    pub total_ms: u64,
    /// Result of the last command that had no effect
    pub status: Option<String>,
}

pub struct PracticeSession {
    controller: SyncController<SimulatedClock, TimerQueue>,
    loader: SubtitleLoader,
    subtitle_visible: bool,
    fold_accents: bool,
    typing: Option<TypingAttempt>,
    /// Segment the typing attempt belongs to
    typing_index: Option<usize>,
    status: Option<String>,
}

impl PracticeSession {
    pub fn new<S: SubtitleSource + 'static>(source: S, options: SessionOptions, now: Instant) -> Self {
        let controller = SyncController::with_options(
            SimulatedClock::new(now, options.tick_interval),
            TimerQueue::new(now),
            SyncOptions {
                autoplay: options.autoplay,
            },
        );
        Self {
            controller,
            loader: SubtitleLoader::spawn(source),
            subtitle_visible: options.show_subtitle,
            fold_accents: options.fold_accents,
            typing: None,
            typing_index: None,
            status: None,
        }
    }

    pub fn controller(&self) -> &SyncController<SimulatedClock, TimerQueue> {
        &self.controller
    }

    pub fn typing(&self) -> Option<&TypingAttempt> {
        self.typing.as_ref()
    }

    pub fn subtitle_visible(&self) -> bool {
        self.subtitle_visible
    }

    /// Switch to `media_id` and start loading its captions.
    pub fn open(&mut self, media_id: &str) -> Outcome {
        self.command(Command::SetMediaId(media_id.to_string()))
    }

    /// Run a user command and remember why it did nothing, if it didn't.
    pub fn command(&mut self, command: Command) -> Outcome {
        let outcome = self.dispatch(command.into());
        self.status = match &outcome {
            Outcome::NoEffect(reason) => Some(reason.to_string()),
            Outcome::Deferred => Some("waiting for the player".to_string()),
            Outcome::Applied | Outcome::Load(_) => None,
        };
        outcome
    }

    /// Jump to the segment before the active one.
    pub fn previous(&mut self) -> Outcome {
        let index = self
            .controller
            .active_index()
            .map_or(0, |i| i.saturating_sub(1));
        self.command(Command::Jump(index))
    }

    /// Jump to the last segment.
    pub fn last(&mut self) -> Outcome {
        let len = self.controller.segments().len();
        self.command(Command::Jump(len.saturating_sub(1)))
    }

    pub fn toggle_visibility(&mut self) {
        self.subtitle_visible = !self.subtitle_visible;
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(typing) = &mut self.typing {
            typing.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(typing) = &mut self.typing {
            typing.backspace();
        }
    }

    /// Throw away everything typed for the active segment.
    pub fn clear_typing(&mut self) {
        if let Some(typing) = &mut self.typing {
            typing.reset();
        }
    }

    /// Feed everything that became due by `now` into the controller.
    ///
    /// Finished loads first, then boundary timers, then player reports, so
    /// a timer due at the same instant as a progress tick pauses playback
    /// before the tick can move on to the next segment.
    pub fn pump(&mut self, now: Instant) -> usize {
        let mut handled = 0;
        self.advance_to(now);

        while let Some(result) = self.loader.try_recv() {
            self.apply_load(result);
            handled += 1;
        }

        let expired = self.controller.timers_mut().take_expired(now);
        for id in expired {
            self.dispatch(Event::TimerFired(id));
            handled += 1;
        }

        // Dispatching can make the player report again (seek + play echo)
        loop {
            let events = self.controller.clock_mut().poll(now);
            if events.is_empty() {
                break;
            }
            for event in events {
                self.dispatch(event);
                handled += 1;
            }
        }

        handled
    }

    /// Block up to `timeout` for the pending caption load, then pump.
    pub fn wait_for_captions(&mut self, timeout: Duration, now: Instant) -> bool {
        if self.controller.phase() != Phase::Loading {
            return true;
        }
        match self.loader.recv_timeout(timeout) {
            Some(result) => {
                self.advance_to(now);
                self.apply_load(result);
                self.pump(now);
                self.controller.phase() != Phase::Loading
            }
            None => false,
        }
    }

    /// Earliest instant at which `pump` has work to do.
    pub fn next_wakeup(&self) -> Option<Instant> {
        let timer = self.controller.timers().next_deadline();
        let clock = self.controller.clock().next_deadline();
        match (timer, clock) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            sync: self.controller.view(),
            subtitle_visible: self.subtitle_visible,
            position_ms: self.controller.clock().position_ms(),
            total_ms: self.controller.segments().total_ms(),
            status: self.status.clone(),
        }
    }

    /// Stop playback and release the timer.
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
        self.typing = None;
        self.typing_index = None;
    }

    /// Bring the player and the timer queue to `now` before anything can
    /// arm a timer.
    fn advance_to(&mut self, now: Instant) {
        self.controller.clock_mut().advance_to(now);
        self.controller.timers_mut().advance_to(now);
    }

    fn apply_load(&mut self, result: LoadResult) {
        if result.generation == self.controller.state().generation {
            let total = result.segments.total_ms();
            self.controller.clock_mut().set_duration(Some(total));
        }
        tracing::debug!(media_id = %result.media_id, generation = result.generation, "caption load finished");
        self.dispatch(Event::SegmentsLoaded {
            generation: result.generation,
            segments: result.segments,
        });
    }

    fn dispatch(&mut self, event: Event) -> Outcome {
        let outcome = self.controller.handle(event);
        if let Outcome::Load(request) = &outcome {
            self.controller.clock_mut().load_media();
            if !self.loader.request(request.clone()) {
                tracing::warn!("caption loader is not running");
            }
        }
        self.sync_typing();
        outcome
    }

    /// Start a fresh attempt whenever the active segment or its text changes.
    fn sync_typing(&mut self) {
        let state = self.controller.state();
        let index = state.active;
        let text = state.active_text();
        let unchanged = self.typing_index == index
            && match (&self.typing, text) {
                (Some(typing), Some(text)) => typing.source() == text,
                (None, None) => true,
                _ => false,
            };
        if !unchanged {
            self.typing = text.map(|text| TypingAttempt::new(text, self.fold_accents));
            self.typing_index = index;
        }
    }
}
