//! segtype - listening and typing practice against timed subtitle segments
//!
//! The core is [`player::SyncController`], which keeps a media player's
//! clock in step with an ordered list of caption segments and pauses
//! playback at the end of each one. Everything else wires it to a source of
//! captions and a terminal.

pub mod cli;
pub mod config;
pub mod logging;
pub mod player;
pub mod runtime;
pub mod subtitles;
pub mod tui;
pub mod typing;

pub use config::Config;
pub use player::{Command, Outcome, Phase, SyncController};
pub use subtitles::{Segment, SegmentList};
