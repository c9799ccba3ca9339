//! Duration input sources
//!
//! Every input is converted to whole milliseconds here, before it reaches
//! the engine. Malformed input is rejected at this boundary.

pub mod preset;
pub mod slider;

use thiserror::Error;

pub use preset::{parse_preset, PresetList, DEFAULT_PRESETS};
pub use slider::{SecondsSelector, DEFAULT_MAX_SECONDS};

/// Errors raised while converting user input to a duration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Preset '{0}' is not in M:SS form")]
    MalformedPreset(String),

    #[error("Preset index {index} is out of range ({count} presets)")]
    UnknownPreset { index: usize, count: usize },

    #[error("{seconds}s exceeds the selector maximum of {max}s")]
    AboveMaximum { seconds: u64, max: u64 },

    #[error("Duration '{0}' is too large")]
    Overflow(String),
}
