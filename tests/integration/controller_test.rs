//! Sync controller behaviour driven through the public event interface

use super::helpers::{controller, hello_world, loaded, ms};
use segtype::player::{Command, Event, NoEffect, Outcome, Phase};
use segtype::{Segment, SegmentList};

#[test]
fn locate_returns_half_open_match_or_none() {
    let list = SegmentList::new(vec![
        Segment::new(0, 1000, "a"),
        Segment::new(1500, 500, "b"),
        Segment::new(2000, 1000, "c"),
    ]);

    for position in 0..3500u64 {
        let expected = list
            .iter()
            .position(|s| s.start_ms <= position && position < s.start_ms + s.duration_ms);
        assert_eq!(list.locate(position), expected, "position {}", position);
    }
}

#[test]
fn jump_seeks_to_start_and_arms_one_timer_for_duration() {
    let (mut controller, clock, timers) = loaded(hello_world());

    assert!(controller.jump(1).is_applied());

    assert_eq!(clock.seeks(), vec![2000]);
    assert!(clock.playing());
    assert_eq!(controller.active_index(), Some(1));
    assert_eq!(controller.phase(), Phase::SegmentActive);
    assert_eq!(timers.single().1, ms(3000));
}

#[test]
fn double_jump_leaves_one_live_timer() {
    let (mut controller, _clock, timers) = loaded(hello_world());

    controller.jump(0);
    controller.jump(1);

    let (id, delay) = timers.single();
    assert_eq!(delay, ms(3000));
    assert_eq!(controller.armed_timer().map(|t| t.id), Some(id));
    assert_eq!(timers.armed_count(), 2);
}

#[test]
fn next_at_last_segment_is_a_no_op() {
    let (mut controller, clock, timers) = loaded(hello_world());
    controller.jump(1);
    let (armed, _) = timers.single();
    let armed_before = timers.armed_count();

    let outcome = controller.next();

    assert_eq!(outcome.no_effect(), Some(&NoEffect::AtLastSegment));
    assert_eq!(controller.active_index(), Some(1));
    assert_eq!(clock.seeks(), vec![2000]);
    assert_eq!(timers.single().0, armed);
    assert_eq!(timers.armed_count(), armed_before);
}

#[test]
fn next_advances_to_following_segment() {
    let (mut controller, clock, timers) = loaded(hello_world());
    controller.jump(0);

    assert!(controller.next().is_applied());

    assert_eq!(controller.active_index(), Some(1));
    assert_eq!(clock.position(), 2000);
    assert_eq!(timers.single().1, ms(3000));
}

#[test]
fn repeat_without_active_segment_is_a_no_op() {
    let (mut controller, clock, timers) = loaded(hello_world());

    let outcome = controller.repeat();

    assert_eq!(outcome.no_effect(), Some(&NoEffect::NoActiveSegment));
    assert!(clock.seeks().is_empty());
    assert_eq!(timers.armed_count(), 0);
}

#[test]
fn repeat_replays_active_segment_from_start() {
    let (mut controller, clock, timers) = loaded(hello_world());
    controller.jump(1);
    clock.set_position(4200);

    assert!(controller.handle(Command::Repeat.into()).is_applied());

    assert_eq!(clock.seeks(), vec![2000, 2000]);
    assert_eq!(timers.single().1, ms(3000));
}

#[test]
fn stale_load_for_previous_media_is_discarded() {
    let (mut controller, _clock, _timers) = controller(false);
    let Outcome::Load(a) = controller.set_media_id("A") else {
        panic!("expected load for A");
    };
    let Outcome::Load(b) = controller.set_media_id("B") else {
        panic!("expected load for B");
    };
    assert_ne!(a.generation, b.generation);

    let outcome = controller.handle(Event::SegmentsLoaded {
        generation: a.generation,
        segments: SegmentList::new(hello_world()),
    });

    assert_eq!(outcome.no_effect(), Some(&NoEffect::StaleLoad));
    assert_eq!(controller.state().media_id.as_deref(), Some("B"));
    assert!(controller.segments().is_empty());
    assert_eq!(controller.phase(), Phase::Loading);

    controller.handle(Event::SegmentsLoaded {
        generation: b.generation,
        segments: SegmentList::new(vec![Segment::new(0, 1000, "bee")]),
    });
    assert_eq!(controller.segments().len(), 1);
    assert_eq!(controller.phase(), Phase::Ready);
}

#[test]
fn tick_into_next_segment_then_timer_pauses_at_end() {
    let (mut controller, clock, timers) = loaded(hello_world());

    controller.jump(0);
    assert_eq!(clock.position(), 0);
    assert_eq!(controller.active_index(), Some(0));
    assert_eq!(timers.single().1, ms(2000));

    clock.set_position(2500);
    assert!(controller
        .handle(Event::Progress { position_ms: 2500 })
        .is_applied());
    assert_eq!(controller.active_index(), Some(1));
    let (id, delay) = timers.single();
    assert_eq!(delay, ms(2500));

    clock.set_position(5000);
    assert!(controller.handle(timers.fire(id)).is_applied());

    assert_eq!(controller.phase(), Phase::SegmentPaused);
    assert!(!clock.playing());
    assert!(!controller.is_playing());
    assert_eq!(timers.live_count(), 0);
}

#[test]
fn early_timer_fire_reschedules_for_remaining_time() {
    let (mut controller, clock, timers) = loaded(hello_world());
    controller.jump(0);
    let (first, _) = timers.single();

    clock.set_position(1800);
    assert!(controller.handle(timers.fire(first)).is_applied());

    assert_eq!(controller.phase(), Phase::SegmentActive);
    assert!(clock.playing());
    let (second, delay) = timers.single();
    assert_ne!(second, first);
    assert_eq!(delay, ms(200));
}

#[test]
fn cancelled_timer_firing_late_is_ignored() {
    let (mut controller, clock, timers) = loaded(hello_world());
    controller.jump(0);
    let (old, _) = timers.single();
    controller.jump(1);

    clock.set_position(2100);
    let outcome = controller.handle(timers.fire(old));

    assert_eq!(outcome.no_effect(), Some(&NoEffect::StaleTimer));
    assert!(clock.playing());
    assert_eq!(controller.active_index(), Some(1));
    assert_eq!(timers.live_count(), 1);
}

#[test]
fn media_change_cancels_armed_timer() {
    let (mut controller, _clock, timers) = loaded(hello_world());
    controller.jump(0);

    controller.set_media_id("other");

    assert_eq!(timers.live_count(), 0);
    assert!(controller.armed_timer().is_none());
    assert_eq!(controller.active_index(), None);
}

#[test]
fn dropping_controller_cancels_armed_timer() {
    let (mut controller, _clock, timers) = loaded(hello_world());
    controller.jump(0);

    drop(controller);

    assert_eq!(timers.live_count(), 0);
}

#[test]
fn overlapping_segments_resolve_to_first_match() {
    let (mut controller, clock, _timers) = loaded(vec![
        Segment::new(0, 3000, "long"),
        Segment::new(1000, 1000, "inner"),
    ]);
    controller.jump(0);
    clock.set_position(1500);

    controller.handle(Event::Progress { position_ms: 1500 });

    assert_eq!(controller.active_index(), Some(0));
}

#[test]
fn jump_before_player_ready_runs_once_ready() {
    let (mut controller, clock, timers) = controller(false);
    let Outcome::Load(request) = controller.set_media_id("vid") else {
        panic!("expected a load request");
    };
    controller.handle(Event::SegmentsLoaded {
        generation: request.generation,
        segments: SegmentList::new(hello_world()),
    });

    assert_eq!(controller.jump(1), Outcome::Deferred);
    assert!(clock.seeks().is_empty());

    controller.handle(Event::Ready);

    assert_eq!(clock.seeks(), vec![2000]);
    assert_eq!(controller.active_index(), Some(1));
    assert_eq!(timers.single().1, ms(3000));
}
