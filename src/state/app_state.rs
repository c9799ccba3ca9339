//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{oneshot, watch};
use tracing::{info, warn};

use super::TimerSnapshot;
use crate::{
    input::{PresetList, SecondsSelector},
    tasks::{CommandRequest, TimerCommand, TimerHandle},
};

/// Shared state behind every HTTP handler
///
/// The engine itself lives on the timer loop; this only holds the channels
/// into it plus server metadata.
#[derive(Debug)]
pub struct AppState {
    /// Channels to the timer loop
    pub timer: TimerHandle,
    /// Input sources offered by the screen
    pub presets: PresetList,
    pub selector: SecondsSelector,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around a running timer loop
    pub fn new(
        port: u16,
        host: String,
        timer: TimerHandle,
        presets: PresetList,
        selector: SecondsSelector,
    ) -> Self {
        Self {
            timer,
            presets,
            selector,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Send a command to the timer loop and wait for the resulting snapshot
    pub async fn send_command(
        &self,
        action: &str,
        command: TimerCommand,
    ) -> Result<TimerSnapshot, String> {
        info!("Timer command: {}", action);

        let (reply, response) = oneshot::channel();
        self.timer
            .commands
            .send(CommandRequest { command, reply })
            .await
            .map_err(|e| format!("Timer loop is not running: {}", e))?;

        let snapshot = response
            .await
            .map_err(|e| format!("Timer loop dropped the command: {}", e))?;

        self.record_action(action);
        Ok(snapshot)
    }

    /// Start the countdown
    pub async fn start(&self) -> Result<TimerSnapshot, String> {
        self.send_command("start", TimerCommand::Start).await
    }

    /// Stop the countdown
    pub async fn stop(&self) -> Result<TimerSnapshot, String> {
        self.send_command("stop", TimerCommand::Stop).await
    }

    /// Play/stop button
    pub async fn toggle(&self) -> Result<TimerSnapshot, String> {
        self.send_command("toggle", TimerCommand::Toggle).await
    }

    /// Reconfigure with an already validated duration
    pub async fn configure(&self, action: &str, duration_ms: u64) -> Result<TimerSnapshot, String> {
        self.send_command(action, TimerCommand::Configure { duration_ms }).await
    }

    /// Host lifecycle: screen went inactive
    pub async fn pause(&self) -> Result<TimerSnapshot, String> {
        self.send_command("pause", TimerCommand::Pause).await
    }

    /// Host lifecycle: screen became active
    pub async fn resume(&self) -> Result<TimerSnapshot, String> {
        self.send_command("resume", TimerCommand::Resume).await
    }

    /// Latest published timer snapshot
    pub fn get_timer_state(&self) -> TimerSnapshot {
        self.timer.snapshots.borrow().clone()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer.snapshots.clone()
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to lock last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
