//! Sync controller state
//!
//! Contains the `SyncState` struct owned by the controller, the lifecycle
//! `Phase`, and the `SyncView` snapshot handed to the presentation layer.

use std::fmt;

use serde::Serialize;

use crate::subtitles::{Segment, SegmentList};

/// Lifecycle phase of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No media id set
    Idle,
    /// Waiting for captions of the current media id
    Loading,
    /// Captions loaded, no segment is being played
    Ready,
    /// A segment is playing and the boundary timer is armed
    SegmentActive,
    /// A segment was reached and paused; no timer armed
    SegmentPaused,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::SegmentActive => "segment active",
            Phase::SegmentPaused => "segment paused",
        };
        f.write_str(name)
    }
}

/// Central state of the sync controller.
///
/// Owned exclusively by `SyncController`; callers get read-only access.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncState {
    // === Lifecycle ===
    pub phase: Phase,
    /// Current media identifier
    pub media_id: Option<String>,
    /// Bumped on every media change and on teardown
    pub generation: u64,

    // === Segments ===
    pub segments: SegmentList,
    /// Index of the segment being played or last jumped to
    pub active: Option<usize>,

    // === Player mirror ===
    /// Local belief about the play state, corrected by Played/Paused events
    pub playing: bool,
    /// Whether the player reported Ready for the current media
    pub player_ready: bool,
    /// Jump requested before the player was ready
    pub pending_jump: Option<usize>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            media_id: None,
            generation: 0,
            segments: SegmentList::empty(),
            active: None,
            playing: false,
            player_ready: false,
            pending_jump: None,
        }
    }

    /// Forget everything tied to the previous media id.
    pub fn clear_media(&mut self) {
        self.generation += 1;
        self.media_id = None;
        self.segments = SegmentList::empty();
        self.active = None;
        self.playing = false;
        self.player_ready = false;
        self.pending_jump = None;
        self.phase = Phase::Idle;
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.active.and_then(|i| self.segments.get(i))
    }

    pub fn active_text(&self) -> Option<&str> {
        self.active_segment().map(|s| s.text.as_str())
    }

    /// Whether `next()` would do anything.
    pub fn can_advance(&self) -> bool {
        self.active.is_some_and(|i| i + 1 < self.segments.len())
    }

    /// Whether `repeat()` would do anything.
    pub fn can_repeat(&self) -> bool {
        self.active_segment().is_some()
    }

    pub fn view(&self) -> SyncView {
        SyncView {
            phase: self.phase,
            media_id: self.media_id.clone(),
            segment_count: self.segments.len(),
            active_index: self.active,
            active_text: self.active_text().map(str::to_string),
            is_playing: self.playing,
            can_advance: self.can_advance(),
            can_repeat: self.can_repeat(),
        }
    }
}

/// Snapshot of the controller for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncView {
    pub phase: Phase,
    pub media_id: Option<String>,
    pub segment_count: usize,
    pub active_index: Option<usize>,
    pub active_text: Option<String>,
    pub is_playing: bool,
    pub can_advance: bool,
    pub can_repeat: bool,
}
