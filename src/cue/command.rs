//! External player cue

use tokio::{process::Command, runtime::Handle};
use tracing::{debug, info, warn};

use super::{AudioCue, CueError, CueParams};

/// Launches an external audio player for each finish
///
/// The child is reaped on a background task so playback never holds up the
/// tick path. Volume, priority and rate are exported to the player through
/// `COUNTDOWN_CUE_*` environment variables.
#[derive(Debug, Clone)]
pub struct CommandCue {
    program: String,
    args: Vec<String>,
}

impl CommandCue {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl AudioCue for CommandCue {
    fn play_finish_cue(&mut self, params: &CueParams) -> Result<(), CueError> {
        let runtime = Handle::try_current()
            .map_err(|_| CueError::Unavailable("no async runtime to reap cue player".to_string()))?;

        debug!("Launching cue player: {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("COUNTDOWN_CUE_VOLUME", params.volume.to_string())
            .env("COUNTDOWN_CUE_PRIORITY", params.priority.to_string())
            .env("COUNTDOWN_CUE_RATE", params.rate.to_string())
            .env("COUNTDOWN_CUE_LOOP", if params.looping { "1" } else { "0" })
            .spawn()
            .map_err(|source| CueError::Spawn { program: self.program.clone(), source })?;

        let program = self.program.clone();
        runtime.spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => info!("Cue player {} finished", program),
                Ok(status) => warn!("Cue player {} exited with {}", program, status),
                Err(e) => warn!("Failed to wait for cue player {}: {}", program, e),
            }
        });

        Ok(())
    }
}
