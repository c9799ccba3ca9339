//! Countdown Timer - a single-screen countdown timer served over HTTP
//!
//! The timer core is an explicit state machine driven by an injected clock
//! source. Around it sit the input sources that turn presets and selector
//! values into durations, the finish cue, and a small axum service that acts
//! as the screen.

pub mod api;
pub mod config;
pub mod cue;
pub mod input;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::{AppState, TimerSnapshot};
pub use timer::{format_remaining, RunState, TimerEngine};
pub use utils::signals::shutdown_signal;
