//! Practice sessions end to end: files on disk, loader thread, simulated player

use std::time::{Duration, Instant};

use super::helpers::{caption_dir, ms, HELLO_WORLD_JSON};
use segtype::player::{Command, Phase};
use segtype::runtime::{PracticeSession, SessionOptions};
use segtype::subtitles::DirectorySource;

const WAIT: Duration = Duration::from_secs(5);

fn open(dir: &tempfile::TempDir, media_id: &str, t0: Instant) -> PracticeSession {
    let mut session =
        PracticeSession::new(DirectorySource::new(dir.path()), SessionOptions::default(), t0);
    session.open(media_id);
    assert!(session.wait_for_captions(WAIT, t0), "captions never arrived");
    session
}

#[test]
fn plays_each_segment_and_pauses_at_its_end() {
    let dir = caption_dir(&[("talk", HELLO_WORLD_JSON)]);
    let t0 = Instant::now();
    let mut session = open(&dir, "talk", t0);

    assert_eq!(session.view().sync.active_index, Some(0));
    assert!(session.view().sync.is_playing);

    session.pump(t0 + ms(2000));
    let view = session.view();
    assert_eq!(view.sync.phase, Phase::SegmentPaused);
    assert_eq!(view.position_ms, 2000);

    assert!(session.command(Command::Next).is_applied());
    session.pump(t0 + ms(2000));
    assert_eq!(session.view().sync.active_text.as_deref(), Some("world"));

    session.pump(t0 + ms(5000));
    let view = session.view();
    assert_eq!(view.sync.phase, Phase::SegmentPaused);
    assert_eq!(view.sync.active_index, Some(1));
    assert!(!view.sync.can_advance);
    assert_eq!(session.controller().timers().live_count(), 0);
}

#[test]
fn switching_media_ignores_the_previous_load() {
    let dir = caption_dir(&[
        ("first", HELLO_WORLD_JSON),
        ("second", r#"[{"offset": 0, "duration": 1500, "text": "only line"}]"#),
    ]);
    let t0 = Instant::now();
    let mut session =
        PracticeSession::new(DirectorySource::new(dir.path()), SessionOptions::default(), t0);

    session.open("first");
    session.open("second");

    // Drain until the current load lands; a late "first" result must not win
    let deadline = Instant::now() + WAIT;
    while session.controller().phase() == Phase::Loading && Instant::now() < deadline {
        session.wait_for_captions(Duration::from_millis(50), t0);
    }

    let view = session.view();
    assert_eq!(view.sync.media_id.as_deref(), Some("second"));
    assert_eq!(view.sync.segment_count, 1);
    assert_eq!(view.sync.active_text.as_deref(), Some("only line"));
}

#[test]
fn missing_captions_leave_navigation_disabled() {
    let dir = caption_dir(&[]);
    let t0 = Instant::now();
    let mut session = open(&dir, "absent", t0);

    let view = session.view();
    assert_eq!(view.sync.phase, Phase::Ready);
    assert_eq!(view.sync.segment_count, 0);
    assert!(!view.sync.can_advance);
    assert!(!view.sync.can_repeat);
    assert!(session.command(Command::Repeat).no_effect().is_some());
}
