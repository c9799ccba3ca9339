//! Timer event listener interface

/// Receives tick and finish events from the engine
///
/// Wired in when the engine is constructed. Callbacks run synchronously on
/// the host loop and must not block.
pub trait TimerListener: Send {
    /// Remaining time after a delivered tick
    fn on_tick(&mut self, remaining_ms: u64);

    /// The countdown reached zero
    fn on_finish(&mut self);
}

/// Event recorded by [`RecordingListener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { remaining_ms: u64 },
    Finished,
}

/// Listener that keeps every event it receives
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Vec<TimerEvent>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TimerEvent] {
        &self.events
    }

    pub fn tick_count(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, TimerEvent::Tick { .. })).count()
    }

    pub fn finish_count(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, TimerEvent::Finished)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TimerListener for RecordingListener {
    fn on_tick(&mut self, remaining_ms: u64) {
        self.events.push(TimerEvent::Tick { remaining_ms });
    }

    fn on_finish(&mut self) {
        self.events.push(TimerEvent::Finished);
    }
}
