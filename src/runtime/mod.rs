//! Single-threaded runtime for the practice screen.
//!
//! - `sim_clock`: a wall-clock `ClockAdapter` standing in for a media player
//! - `timer_queue`: the deadline-based `TimerHost`
//! - `session`: `PracticeSession`, which wires both to the sync controller
//!   and the caption loader

mod session;
mod sim_clock;
mod timer_queue;

pub use session::{PracticeSession, SessionOptions, SessionView};
pub use sim_clock::SimulatedClock;
pub use timer_queue::TimerQueue;
