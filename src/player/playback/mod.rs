//! Playback bookkeeping for the sync controller.
//!
//! This module owns the boundary timer slot; segment lookup lives on
//! `SegmentList::locate`.

mod boundary;

pub use boundary::TimerSlot;
