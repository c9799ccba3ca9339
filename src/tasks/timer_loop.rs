//! Host run loop that owns the timer engine
//!
//! User commands and clock ticks are delivered to the engine one at a time
//! from this single task, so the engine itself needs no locking.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::{
    cue::CueProvider,
    state::TimerSnapshot,
    timer::{ClockSource, ClockTick, IntervalClock, RunState, TimerEngine, TimerListener},
};

/// Commands accepted by the timer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Configure { duration_ms: u64 },
    Start,
    Stop,
    /// Play/stop affordance: stop if running, otherwise start
    Toggle,
    /// Host went inactive; release the cue resource
    Pause,
    /// Host became active; acquire the cue resource
    Resume,
}

/// A command plus the channel its resulting snapshot is returned on
#[derive(Debug)]
pub struct CommandRequest {
    pub command: TimerCommand,
    pub reply: oneshot::Sender<TimerSnapshot>,
}

/// Listener that mirrors engine events into the snapshot channel
#[derive(Debug)]
pub struct SnapshotPublisher {
    tx: watch::Sender<TimerSnapshot>,
}

impl SnapshotPublisher {
    pub fn new(tx: watch::Sender<TimerSnapshot>) -> Self {
        Self { tx }
    }

    /// Replace the published snapshot wholesale
    pub fn publish(&self, snapshot: TimerSnapshot) {
        self.tx.send_replace(snapshot);
    }
}

impl TimerListener for SnapshotPublisher {
    fn on_tick(&mut self, remaining_ms: u64) {
        self.tx.send_modify(|snapshot| snapshot.ticked(remaining_ms));
    }

    fn on_finish(&mut self) {
        self.tx.send_modify(|snapshot| snapshot.finished());
    }
}

/// Handles to a running timer loop
#[derive(Debug, Clone)]
pub struct TimerHandle {
    pub commands: mpsc::Sender<CommandRequest>,
    pub snapshots: watch::Receiver<TimerSnapshot>,
}

/// Build the engine with an interval clock and spawn its loop
pub fn spawn_timer_loop(initial_ms: u64, cue_provider: Arc<dyn CueProvider>) -> TimerHandle {
    let (clock, ticks) = IntervalClock::new();
    let (command_tx, command_rx) = mpsc::channel(32);
    let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::new(
        RunState::Idle,
        initial_ms,
        initial_ms,
        false,
    ));

    let mut engine = TimerEngine::new(initial_ms, clock, SnapshotPublisher::new(snapshot_tx));
    acquire_cue(&mut engine, cue_provider.as_ref());
    engine.listener().publish(engine.snapshot());

    tokio::spawn(timer_loop_task(engine, command_rx, ticks, cue_provider));

    TimerHandle { commands: command_tx, snapshots: snapshot_rx }
}

/// Drive the engine until every command sender is gone
pub async fn timer_loop_task<C: ClockSource>(
    mut engine: TimerEngine<C, SnapshotPublisher>,
    mut commands: mpsc::Receiver<CommandRequest>,
    mut ticks: mpsc::UnboundedReceiver<ClockTick>,
    cue_provider: Arc<dyn CueProvider>,
) {
    info!("Starting timer loop");

    loop {
        tokio::select! {
            request = commands.recv() => {
                let Some(request) = request else {
                    info!("Command channel closed, stopping timer loop");
                    break;
                };
                debug!("Timer loop received command: {:?}", request.command);
                let snapshot = apply_command(&mut engine, request.command, cue_provider.as_ref());
                if request.reply.send(snapshot).is_err() {
                    debug!("Command issuer went away before the reply");
                }
            }

            Some(tick) = ticks.recv() => {
                engine.tick(tick.run);
            }
        }
    }

    engine.stop();
}

/// Apply one command and publish the resulting snapshot
pub fn apply_command<C: ClockSource>(
    engine: &mut TimerEngine<C, SnapshotPublisher>,
    command: TimerCommand,
    cue_provider: &dyn CueProvider,
) -> TimerSnapshot {
    match command {
        TimerCommand::Configure { duration_ms } => engine.configure(duration_ms),
        TimerCommand::Start => engine.start(),
        TimerCommand::Stop => engine.stop(),
        TimerCommand::Toggle => {
            if engine.is_running() {
                engine.stop();
            } else {
                engine.start();
            }
        }
        TimerCommand::Pause => {
            if engine.release_cue() {
                info!("Finish cue released");
            }
        }
        TimerCommand::Resume => {
            if !engine.has_cue() {
                acquire_cue(engine, cue_provider);
            }
        }
    }

    let snapshot = engine.snapshot();
    engine.listener().publish(snapshot.clone());
    snapshot
}

fn acquire_cue<C: ClockSource>(
    engine: &mut TimerEngine<C, SnapshotPublisher>,
    cue_provider: &dyn CueProvider,
) {
    match cue_provider.acquire() {
        Ok(cue) => {
            engine.attach_cue(cue);
            info!("Finish cue acquired");
        }
        Err(e) => warn!("Failed to acquire finish cue: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cue::{AudioCue, CueError, CueParams},
        timer::ManualClock,
    };

    struct SilentCue;

    impl AudioCue for SilentCue {
        fn play_finish_cue(&mut self, _params: &CueParams) -> Result<(), CueError> {
            Ok(())
        }
    }

    struct SilentProvider;

    impl CueProvider for SilentProvider {
        fn acquire(&self) -> Result<Box<dyn AudioCue>, CueError> {
            Ok(Box::new(SilentCue))
        }
    }

    struct MissingProvider;

    impl CueProvider for MissingProvider {
        fn acquire(&self) -> Result<Box<dyn AudioCue>, CueError> {
            Err(CueError::Unavailable("no sound device".to_string()))
        }
    }

    fn engine(
        duration_ms: u64,
    ) -> (TimerEngine<ManualClock, SnapshotPublisher>, watch::Receiver<TimerSnapshot>) {
        let (tx, rx) = watch::channel(TimerSnapshot::new(RunState::Idle, 0, 0, false));
        let engine = TimerEngine::new(duration_ms, ManualClock::new(), SnapshotPublisher::new(tx));
        (engine, rx)
    }

    #[test]
    fn toggle_flips_running() {
        let (mut engine, rx) = engine(5_000);
        let snapshot = apply_command(&mut engine, TimerCommand::Toggle, &SilentProvider);
        assert!(snapshot.running);
        assert!(rx.borrow().running);

        let snapshot = apply_command(&mut engine, TimerCommand::Toggle, &SilentProvider);
        assert!(!snapshot.running);
        assert_eq!(snapshot.state, RunState::Idle);
    }

    #[test]
    fn ticks_are_published() {
        let (mut engine, rx) = engine(1_000);
        apply_command(&mut engine, TimerCommand::Start, &SilentProvider);
        let run = engine.current_run().unwrap();
        for _ in 0..5 {
            engine.tick(run);
        }
        assert_eq!(rx.borrow().remaining_ms, 500);
        assert_eq!(rx.borrow().display, "0:00");

        for _ in 0..5 {
            engine.tick(run);
        }
        assert_eq!(rx.borrow().state, RunState::Finished);
        assert!(!rx.borrow().running);
    }

    #[test]
    fn configure_publishes_new_duration() {
        let (mut engine, rx) = engine(1_000);
        apply_command(&mut engine, TimerCommand::Start, &SilentProvider);
        apply_command(&mut engine, TimerCommand::Configure { duration_ms: 65_000 }, &SilentProvider);
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.display, "1:05");
        assert_eq!(snapshot.state, RunState::Idle);
        assert_eq!(snapshot.total_ms, 65_000);
    }

    #[test]
    fn pause_and_resume_manage_cue() {
        let (mut engine, _rx) = engine(1_000);
        let snapshot = apply_command(&mut engine, TimerCommand::Resume, &SilentProvider);
        assert!(snapshot.cue_ready);

        let snapshot = apply_command(&mut engine, TimerCommand::Pause, &SilentProvider);
        assert!(!snapshot.cue_ready);
    }

    #[test]
    fn resume_with_missing_device_leaves_timer_usable() {
        let (mut engine, _rx) = engine(100);
        let snapshot = apply_command(&mut engine, TimerCommand::Resume, &MissingProvider);
        assert!(!snapshot.cue_ready);

        apply_command(&mut engine, TimerCommand::Start, &MissingProvider);
        let run = engine.current_run().unwrap();
        engine.tick(run);
        assert_eq!(engine.state(), RunState::Finished);
    }
}
