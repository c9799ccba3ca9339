//! State management module
//!
//! Shared host state and the snapshot type the screen renders.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::TimerSnapshot;
