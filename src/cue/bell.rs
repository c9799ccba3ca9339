//! Terminal bell cue

use std::io::{self, Write};
use tracing::debug;

use super::{AudioCue, CueError, CueParams};

/// Rings the terminal bell on stdout
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    pub fn new() -> Self {
        Self
    }
}

impl AudioCue for TerminalBell {
    fn play_finish_cue(&mut self, params: &CueParams) -> Result<(), CueError> {
        // Volume and rate have no meaning for BEL.
        debug!("Ringing terminal bell (volume={}, rate={})", params.volume, params.rate);
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}
