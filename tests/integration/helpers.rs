//! Shared test doubles and fixtures

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use segtype::player::{ClockAdapter, Event, Outcome, SyncController, SyncOptions, TimerHost, TimerId};
use segtype::{Segment, SegmentList};
use tempfile::TempDir;

/// What the controller asked the player to do.
#[derive(Debug, Default)]
pub struct PlayerLog {
    pub position_ms: u64,
    pub playing: bool,
    pub seeks: Vec<u64>,
}

/// A clock whose position only moves when the test says so.
///
/// Clones share state, so a test can keep a handle after moving one into
/// the controller.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<RefCell<PlayerLog>>);

impl ManualClock {
    pub fn set_position(&self, position_ms: u64) {
        self.0.borrow_mut().position_ms = position_ms;
    }

    pub fn position(&self) -> u64 {
        self.0.borrow().position_ms
    }

    pub fn playing(&self) -> bool {
        self.0.borrow().playing
    }

    pub fn seeks(&self) -> Vec<u64> {
        self.0.borrow().seeks.clone()
    }
}

impl ClockAdapter for ManualClock {
    fn position_ms(&self) -> u64 {
        self.0.borrow().position_ms
    }

    fn seek(&mut self, position_ms: u64) {
        let mut log = self.0.borrow_mut();
        log.position_ms = position_ms;
        log.seeks.push(position_ms);
    }

    fn set_playing(&mut self, playing: bool) {
        self.0.borrow_mut().playing = playing;
    }
}

#[derive(Debug, Default)]
pub struct TimerLog {
    next: u64,
    pub live: Vec<(TimerId, Duration)>,
    pub armed: Vec<(TimerId, Duration)>,
}

/// A timer host that records every arm and keeps the live set.
#[derive(Debug, Clone, Default)]
pub struct RecordingTimers(Rc<RefCell<TimerLog>>);

impl RecordingTimers {
    pub fn live(&self) -> Vec<(TimerId, Duration)> {
        self.0.borrow().live.clone()
    }

    pub fn live_count(&self) -> usize {
        self.0.borrow().live.len()
    }

    pub fn armed_count(&self) -> usize {
        self.0.borrow().armed.len()
    }

    /// Fire `id` the way a real host would: it stops being live and the
    /// controller receives the event.
    pub fn fire(&self, id: TimerId) -> Event {
        self.0.borrow_mut().live.retain(|(live, _)| *live != id);
        Event::TimerFired(id)
    }

    /// The only live timer. Panics unless exactly one is armed.
    pub fn single(&self) -> (TimerId, Duration) {
        let live = self.live();
        assert_eq!(live.len(), 1, "expected exactly one live timer: {:?}", live);
        live[0]
    }
}

impl TimerHost for RecordingTimers {
    fn arm(&mut self, delay: Duration) -> TimerId {
        let mut log = self.0.borrow_mut();
        log.next += 1;
        let id = TimerId::new(log.next);
        log.live.push((id, delay));
        log.armed.push((id, delay));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.0.borrow_mut().live.retain(|(live, _)| *live != id);
    }
}

pub type TestController = SyncController<ManualClock, RecordingTimers>;

/// A controller with the given options plus handles on its collaborators.
pub fn controller(autoplay: bool) -> (TestController, ManualClock, RecordingTimers) {
    let clock = ManualClock::default();
    let timers = RecordingTimers::default();
    let controller =
        SyncController::with_options(clock.clone(), timers.clone(), SyncOptions { autoplay });
    (controller, clock, timers)
}

/// A ready controller (autoplay off) with `segments` loaded for "vid".
pub fn loaded(segments: Vec<Segment>) -> (TestController, ManualClock, RecordingTimers) {
    let (mut controller, clock, timers) = controller(false);
    let Outcome::Load(request) = controller.set_media_id("vid") else {
        panic!("expected a load request");
    };
    controller.handle(Event::Ready);
    controller.handle(Event::SegmentsLoaded {
        generation: request.generation,
        segments: SegmentList::new(segments),
    });
    (controller, clock, timers)
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// "hello" for [0, 2000), "world" for [2000, 5000).
pub fn hello_world() -> Vec<Segment> {
    vec![
        Segment::new(0, 2000, "hello"),
        Segment::new(2000, 3000, "world"),
    ]
}

/// Write `<name>.json` caption files into a fresh temp directory.
pub fn caption_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, json) in files {
        let path: PathBuf = dir.path().join(format!("{}.json", name));
        std::fs::write(&path, json).expect("Failed to write caption fixture");
    }
    dir
}

pub const HELLO_WORLD_JSON: &str = r#"[
  {"offset": 2000, "duration": 3000, "text": "world"},
  {"offset": 0, "duration": 2000, "text": "hello"}
]"#;
