//! Segment-synchronized playback
//!
//! Keeps an external media player and a list of timed subtitle segments in
//! step: the active segment follows the playback position, playback pauses
//! at the end of each segment, and Next / Repeat / Jump navigate between
//! segments.
//!
//! # Architecture
//!
//! - `state`: `SyncState`, `Phase` and the `SyncView` snapshot
//! - `event`: `Event`, `Command` and the `Outcome` of handling them
//! - `clock`: the `ClockAdapter` trait implemented by players
//! - `timer`: `TimerId` handles and the `TimerHost` scheduler trait
//! - `playback/`: single-slot ownership of the boundary timer
//! - `controller`: the `SyncController` state machine
//!
//! # Usage
//!
//! ```no_run
//! use segtype::player::{ClockAdapter, Event, Outcome, SyncController, TimerHost};
//!
//! fn drive<C: ClockAdapter, T: TimerHost>(clock: C, timers: T) {
//!     let mut controller = SyncController::new(clock, timers);
//!     if let Outcome::Load(request) = controller.set_media_id("dQw4w9WgXcQ") {
//!         // hand `request` to a caption loader, then feed the result back
//!         let _ = request;
//!     }
//!     controller.handle(Event::Ready);
//! }
//! ```

pub mod clock;
pub mod controller;
pub mod event;
pub(crate) mod playback;
pub mod state;
pub mod timer;

pub use clock::ClockAdapter;
pub use controller::{SyncController, SyncOptions};
pub use event::{Command, Event, LoadRequest, NoEffect, Outcome};
pub use state::{Phase, SyncState, SyncView};
pub use timer::{BoundaryTimer, TimerHost, TimerId};
