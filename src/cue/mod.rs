//! Finish cue playback
//!
//! The engine only ever sees the narrow [`AudioCue`] capability. Acquiring
//! and releasing the underlying resource follows the host lifecycle and goes
//! through a [`CueProvider`].

pub mod bell;
pub mod command;

use thiserror::Error;

pub use bell::TerminalBell;
pub use command::CommandCue;

/// Presentation constants used for every finish cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueParams {
    pub volume: f32,
    pub priority: i32,
    pub rate: f32,
    pub looping: bool,
}

/// Full volume, default priority, normal rate, played once
pub const FINISH_CUE: CueParams = CueParams {
    volume: 1.0,
    priority: 0,
    rate: 1.0,
    looping: false,
};

/// Errors raised while acquiring or playing a cue
#[derive(Error, Debug)]
pub enum CueError {
    #[error("Finish cue unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to launch cue player {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cue output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Fire-and-forget playback of the finish cue
///
/// Implementations must return promptly; anything slow belongs on a
/// background task.
pub trait AudioCue: Send {
    fn play_finish_cue(&mut self, params: &CueParams) -> Result<(), CueError>;
}

/// Acquires a cue resource when the screen becomes active
pub trait CueProvider: Send + Sync {
    fn acquire(&self) -> Result<Box<dyn AudioCue>, CueError>;
}

/// Cue selected on the command line
#[derive(Debug, Clone, PartialEq)]
pub enum CueKind {
    Bell,
    Command { program: String, args: Vec<String> },
}

impl CueKind {
    /// Build from an optional shell-style command line (whitespace separated)
    pub fn from_command_line(command: Option<&str>) -> Self {
        let mut parts = match command {
            Some(line) => line.split_whitespace().map(str::to_string),
            None => return CueKind::Bell,
        };
        match parts.next() {
            Some(program) => CueKind::Command { program, args: parts.collect() },
            None => CueKind::Bell,
        }
    }
}

impl CueProvider for CueKind {
    fn acquire(&self) -> Result<Box<dyn AudioCue>, CueError> {
        match self {
            CueKind::Bell => Ok(Box::new(TerminalBell::new())),
            CueKind::Command { program, args } => {
                Ok(Box::new(CommandCue::new(program.clone(), args.clone())))
            }
        }
    }
}
