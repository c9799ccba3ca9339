//! Countdown state machine

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    clock::{ClockSource, RunToken},
    display::format_remaining,
    listener::TimerListener,
};
use crate::{
    cue::{AudioCue, FINISH_CUE},
    state::TimerSnapshot,
};

/// Cadence at which remaining time is sampled and reported
pub const TICK_INTERVAL_MS: u64 = 100;

/// Duration the screen starts with ("3:00")
pub const DEFAULT_DURATION_MS: u64 = 180_000;

/// Run state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Finished,
}

/// The countdown timer
///
/// `state` is the single source of truth for whether a countdown is in
/// progress. Every run gets a fresh [`RunToken`]; ticks carrying any other
/// token are dropped, so nothing from a stopped or reconfigured run can
/// reach the listener.
pub struct TimerEngine<C, L> {
    total_ms: u64,
    remaining_ms: u64,
    tick_interval_ms: u64,
    state: RunState,
    generation: u64,
    run: Option<RunToken>,
    clock: C,
    listener: L,
    cue: Option<Box<dyn AudioCue>>,
}

impl<C: ClockSource, L: TimerListener> TimerEngine<C, L> {
    /// Create an idle engine holding `duration_ms`
    pub fn new(duration_ms: u64, clock: C, listener: L) -> Self {
        Self {
            total_ms: duration_ms,
            remaining_ms: duration_ms,
            tick_interval_ms: TICK_INTERVAL_MS,
            state: RunState::Idle,
            generation: 0,
            run: None,
            clock,
            listener,
            cue: None,
        }
    }

    /// Cancel any run and reset to `duration_ms`; always leaves the engine idle
    pub fn configure(&mut self, duration_ms: u64) {
        self.cancel_run();
        self.total_ms = duration_ms;
        self.remaining_ms = duration_ms;
        self.state = RunState::Idle;
        info!("Timer configured to {}", format_remaining(duration_ms));
    }

    /// Begin counting down from the current remaining time
    pub fn start(&mut self) {
        match self.state {
            RunState::Running => debug!("Start ignored, timer already running"),
            RunState::Finished => debug!("Start ignored, timer finished; configure first"),
            RunState::Idle if self.remaining_ms == 0 => {
                info!("Timer started with nothing remaining");
                self.state = RunState::Finished;
                self.finish();
            }
            RunState::Idle => {
                self.generation += 1;
                let run = RunToken(self.generation);
                self.run = Some(run);
                self.state = RunState::Running;
                self.clock
                    .schedule_repeating(run, Duration::from_millis(self.tick_interval_ms));
                info!(
                    "Timer started at {} (run {})",
                    format_remaining(self.remaining_ms),
                    run.generation()
                );
            }
        }
    }

    /// Pause the countdown, keeping the remaining time
    pub fn stop(&mut self) {
        if self.state != RunState::Running {
            debug!("Stop ignored, timer not running");
            return;
        }
        self.cancel_run();
        self.state = RunState::Idle;
        info!("Timer stopped at {}", format_remaining(self.remaining_ms));
    }

    /// Deliver one clock tick; returns false if it belonged to a stale run
    pub fn tick(&mut self, run: RunToken) -> bool {
        if self.state != RunState::Running || self.run != Some(run) {
            debug!("Discarding stale tick from run {}", run.generation());
            return false;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(self.tick_interval_ms);
        self.listener.on_tick(self.remaining_ms);

        if self.remaining_ms == 0 {
            self.cancel_run();
            self.state = RunState::Finished;
            self.finish();
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    /// Token of the run in progress, if any
    pub fn current_run(&self) -> Option<RunToken> {
        self.run
    }

    /// Formatted readout of the remaining time
    pub fn display(&self) -> String {
        format_remaining(self.remaining_ms)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(self.state, self.remaining_ms, self.total_ms, self.cue.is_some())
    }

    /// Hand the engine a cue resource, replacing any previous one
    pub fn attach_cue(&mut self, cue: Box<dyn AudioCue>) {
        if self.cue.replace(cue).is_some() {
            debug!("Replaced previously attached finish cue");
        }
    }

    /// Drop the cue resource; returns whether one was attached
    pub fn release_cue(&mut self) -> bool {
        self.cue.take().is_some()
    }

    pub fn has_cue(&self) -> bool {
        self.cue.is_some()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    fn cancel_run(&mut self) {
        if let Some(run) = self.run.take() {
            self.clock.cancel(run);
        }
    }

    fn finish(&mut self) {
        debug_assert_eq!(self.remaining_ms, 0);
        info!("Timer finished after {}", format_remaining(self.total_ms));
        self.listener.on_finish();

        // Cue problems are reported only; state is already final.
        match self.cue.as_mut() {
            Some(cue) => {
                if let Err(e) = cue.play_finish_cue(&FINISH_CUE) {
                    warn!("Failed to play finish cue: {}", e);
                }
            }
            None => warn!("Timer finished with no finish cue attached"),
        }
    }
}
