//! Clock sources that drive the timer engine
//!
//! A clock source only schedules and cancels repeating callbacks. It never
//! touches timer state: ticks are delivered back to the host loop tagged with
//! the [`RunToken`] they were scheduled for, and the engine decides whether
//! they still apply.

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

/// Identity of a single Idle -> Running run of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken(pub(crate) u64);

impl RunToken {
    /// Generation number of the run this token belongs to
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A tick emitted by a clock source for a given run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub run: RunToken,
}

/// Capability to schedule a repeating callback and cancel it again
pub trait ClockSource {
    /// Begin delivering ticks for `run` every `period`, replacing any previous schedule
    fn schedule_repeating(&mut self, run: RunToken, period: Duration);

    /// Stop delivering ticks for `run`; unknown or stale runs are ignored
    fn cancel(&mut self, run: RunToken);
}

/// Clock source backed by a tokio interval task
///
/// Ticks are forwarded over an unbounded channel to the host loop. Cancelling
/// aborts the interval task, but a tick that was already queued stays in the
/// channel; the engine drops it by token.
#[derive(Debug)]
pub struct IntervalClock {
    tick_tx: mpsc::UnboundedSender<ClockTick>,
    active: Option<(RunToken, JoinHandle<()>)>,
}

impl IntervalClock {
    /// Create a clock and the receiving end of its tick channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ClockTick>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        (Self { tick_tx, active: None }, tick_rx)
    }

    fn abort_active(&mut self) {
        if let Some((run, handle)) = self.active.take() {
            debug!("Aborting interval task for run {}", run.generation());
            handle.abort();
        }
    }
}

impl ClockSource for IntervalClock {
    fn schedule_repeating(&mut self, run: RunToken, period: Duration) {
        self.abort_active();

        let tick_tx = self.tick_tx.clone();
        let handle = tokio::spawn(async move {
            // The first tick fires one full period after start.
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tick_tx.send(ClockTick { run }).is_err() {
                    break;
                }
            }
        });

        debug!("Scheduled interval task for run {} every {:?}", run.generation(), period);
        self.active = Some((run, handle));
    }

    fn cancel(&mut self, run: RunToken) {
        if matches!(self.active, Some((active, _)) if active == run) {
            self.abort_active();
        }
    }
}

impl Drop for IntervalClock {
    fn drop(&mut self) {
        self.abort_active();
    }
}

/// Clock source that only records requests
///
/// Hosts that pump ticks themselves (and tests) use this to observe what the
/// engine asked for.
#[derive(Debug, Default)]
pub struct ManualClock {
    active: Option<RunToken>,
    period: Option<Duration>,
    scheduled: Vec<RunToken>,
    cancelled: Vec<RunToken>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run currently scheduled, if any
    pub fn active(&self) -> Option<RunToken> {
        self.active
    }

    /// Period of the most recent schedule
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn scheduled(&self) -> &[RunToken] {
        &self.scheduled
    }

    pub fn cancelled(&self) -> &[RunToken] {
        &self.cancelled
    }
}

impl ClockSource for ManualClock {
    fn schedule_repeating(&mut self, run: RunToken, period: Duration) {
        self.active = Some(run);
        self.period = Some(period);
        self.scheduled.push(run);
    }

    fn cancel(&mut self, run: RunToken) {
        if self.active == Some(run) {
            self.active = None;
            self.cancelled.push(run);
        }
    }
}
