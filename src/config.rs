//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    cue::CueKind,
    input::{parse_preset, InputError, PresetList, SecondsSelector},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A single-screen countdown timer served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial duration in M:SS form
    #[arg(short, long, default_value = "3:00")]
    pub duration: String,

    /// Preset duration in M:SS form (repeat to build the list)
    #[arg(long = "preset", value_name = "M:SS")]
    pub presets: Vec<String>,

    /// Upper bound of the seconds selector
    #[arg(long, default_value = "3600")]
    pub max_seconds: u64,

    /// External player command for the finish cue (defaults to the terminal bell)
    #[arg(long)]
    pub cue_command: Option<String>,

    /// Render the readout on stdout
    #[arg(long)]
    pub console: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial duration in milliseconds
    pub fn initial_duration_ms(&self) -> Result<u64, InputError> {
        parse_preset(&self.duration)
    }

    /// Configured presets, or the defaults when none were given
    pub fn preset_list(&self) -> Result<PresetList, InputError> {
        if self.presets.is_empty() {
            Ok(PresetList::default())
        } else {
            PresetList::new(self.presets.iter().cloned())
        }
    }

    pub fn selector(&self) -> SecondsSelector {
        SecondsSelector::new(self.max_seconds)
    }

    pub fn cue_kind(&self) -> CueKind {
        CueKind::from_command_line(self.cue_command.as_deref())
    }
}
