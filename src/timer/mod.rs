//! Countdown timer core
//!
//! The engine is a plain state machine. It is driven by a [`ClockSource`]
//! it does not own the timing of, reports through a [`TimerListener`] wired
//! in at construction, and plays the finish cue through the narrow
//! [`AudioCue`](crate::cue::AudioCue) capability.

pub mod clock;
pub mod display;
pub mod engine;
pub mod listener;

// Re-export main types
pub use clock::{ClockSource, ClockTick, IntervalClock, ManualClock, RunToken};
pub use display::format_remaining;
pub use engine::{RunState, TimerEngine, DEFAULT_DURATION_MS, TICK_INTERVAL_MS};
pub use listener::{RecordingListener, TimerEvent, TimerListener};
