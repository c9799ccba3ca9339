//! Background tasks module
//!
//! This module contains the timer host loop and the optional console readout.

pub mod console_readout;
pub mod timer_loop;

// Re-export main functions
pub use console_readout::console_readout_task;
pub use timer_loop::{
    spawn_timer_loop, timer_loop_task, CommandRequest, SnapshotPublisher, TimerCommand, TimerHandle,
};
