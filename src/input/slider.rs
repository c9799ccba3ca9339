//! Continuous duration selector in whole seconds

use serde::Serialize;

use super::InputError;

/// Selector maximum when none is configured (one hour)
pub const DEFAULT_MAX_SECONDS: u64 = 3600;

/// Seconds selector bounded to `[0, max_seconds]`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SecondsSelector {
    max_seconds: u64,
}

impl SecondsSelector {
    pub fn new(max_seconds: u64) -> Self {
        Self { max_seconds }
    }

    pub fn max_seconds(&self) -> u64 {
        self.max_seconds
    }

    /// Convert a selector position to milliseconds
    pub fn to_ms(&self, seconds: u64) -> Result<u64, InputError> {
        if seconds > self.max_seconds {
            return Err(InputError::AboveMaximum { seconds, max: self.max_seconds });
        }
        seconds
            .checked_mul(1000)
            .ok_or_else(|| InputError::Overflow(format!("{}s", seconds)))
    }
}

impl Default for SecondsSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SECONDS)
    }
}
