//! Timer snapshot published to the screen

use serde::{Deserialize, Serialize};

use crate::timer::{format_remaining, RunState};

/// Everything the screen shows about the timer at one instant
///
/// `running` drives the play/stop affordance and is always derived from
/// `state`, never stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: RunState,
    pub display: String,
    pub running: bool,
    pub remaining_ms: u64,
    pub total_ms: u64,
    pub cue_ready: bool,
}

impl TimerSnapshot {
    pub fn new(state: RunState, remaining_ms: u64, total_ms: u64, cue_ready: bool) -> Self {
        Self {
            state,
            display: format_remaining(remaining_ms),
            running: state == RunState::Running,
            remaining_ms,
            total_ms,
            cue_ready,
        }
    }

    /// Apply a delivered tick
    pub fn ticked(&mut self, remaining_ms: u64) {
        self.state = RunState::Running;
        self.running = true;
        self.remaining_ms = remaining_ms;
        self.display = format_remaining(remaining_ms);
    }

    /// Apply the finish event
    pub fn finished(&mut self) {
        self.state = RunState::Finished;
        self.running = false;
        self.remaining_ms = 0;
        self.display = format_remaining(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_follows_state() {
        assert!(TimerSnapshot::new(RunState::Running, 1_000, 1_000, true).running);
        assert!(!TimerSnapshot::new(RunState::Idle, 1_000, 1_000, true).running);
        assert!(!TimerSnapshot::new(RunState::Finished, 0, 1_000, true).running);
    }

    #[test]
    fn tick_then_finish() {
        let mut snapshot = TimerSnapshot::new(RunState::Running, 1_100, 5_000, false);
        snapshot.ticked(1_000);
        assert_eq!(snapshot.display, "0:01");
        assert_eq!(snapshot.total_ms, 5_000);

        snapshot.finished();
        assert_eq!(snapshot.display, "0:00");
        assert_eq!(snapshot.state, RunState::Finished);
        assert!(!snapshot.running);
    }
}
