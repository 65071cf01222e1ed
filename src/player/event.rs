//! Events fed into the sync controller and the outcomes it reports.

use crate::player::state::Phase;
use crate::player::timer::TimerId;
use crate::subtitles::SegmentList;

/// A user command addressed to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to another media identifier (empty string clears it)
    SetMediaId(String),
    /// Advance to the segment after the active one
    Next,
    /// Replay the active segment from its start
    Repeat,
    /// Seek to segment `i` and play it
    Jump(usize),
    /// Start or pause playback
    SetPlaying(bool),
    /// Flip the play state
    TogglePlay,
}

/// Everything that can drive the controller.
///
/// Events are processed one at a time by `SyncController::handle`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A user command
    Command(Command),
    /// A caption load finished
    SegmentsLoaded {
        generation: u64,
        segments: SegmentList,
    },
    /// The player loaded the media and can seek
    Ready,
    /// Periodic position report while playing
    Progress { position_ms: u64 },
    /// Playback started (from any source, including native controls)
    Played,
    /// Playback paused (from any source, including native controls)
    Paused,
    /// A boundary timer elapsed
    TimerFired(TimerId),
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        Event::Command(command)
    }
}

/// A caption load the host must perform.
///
/// The result must come back as `Event::SegmentsLoaded` with the same
/// generation; results for older generations are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub media_id: String,
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed or a command was forwarded to the player
    Applied,
    /// The command needs a ready player; it will run on `Event::Ready`
    Deferred,
    /// A new media id was set; the host must run this load
    Load(LoadRequest),
    /// Nothing happened, with the reason
    NoEffect(NoEffect),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn no_effect(&self) -> Option<&NoEffect> {
        match self {
            Outcome::NoEffect(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Why an event left the controller unchanged.
///
/// None of these are faults; they are reported so callers can show or log them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoEffect {
    #[error("segment {index} is out of range ({len} segments)")]
    OutOfRange { index: usize, len: usize },

    #[error("no active segment")]
    NoActiveSegment,

    #[error("already at the last segment")]
    AtLastSegment,

    #[error("player is not ready")]
    PlayerNotReady,

    #[error("playback is paused")]
    NotPlaying,

    #[error("position unchanged for the active segment")]
    Unchanged,

    #[error("discarded a load for a previous media id")]
    StaleLoad,

    #[error("ignored a cancelled boundary timer")]
    StaleTimer,

    #[error("ignored while {0}")]
    Ignored(Phase),
}
