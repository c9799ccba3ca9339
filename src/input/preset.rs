//! Preset durations in `M:SS` form

use serde::Serialize;

use super::InputError;

/// Quick-select durations offered when none are configured
pub const DEFAULT_PRESETS: &[&str] = &["1:00", "3:00", "5:00", "10:00"];

/// Parse an `M:SS` preset into milliseconds
///
/// Both parts must be plain decimal digits. Seconds are not range checked,
/// so `"1:90"` is 150 seconds.
pub fn parse_preset(preset: &str) -> Result<u64, InputError> {
    let malformed = || InputError::MalformedPreset(preset.to_string());

    let (minutes, seconds) = preset.trim().split_once(':').ok_or_else(malformed)?;
    let minutes = parse_digits(minutes).ok_or_else(malformed)?;
    let seconds = parse_digits(seconds).ok_or_else(malformed)?;

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .and_then(|total| total.checked_mul(1000))
        .ok_or_else(|| InputError::Overflow(preset.to_string()))
}

fn parse_digits(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Validated list of presets offered by the selector
#[derive(Debug, Clone, Serialize)]
pub struct PresetList {
    labels: Vec<String>,
    #[serde(skip)]
    durations_ms: Vec<u64>,
}

impl PresetList {
    /// Validate every label up front so selection can never fail to parse
    pub fn new<I, S>(labels: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let durations_ms = labels
            .iter()
            .map(|label| parse_preset(label))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { labels, durations_ms })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Duration of the preset at `index`
    pub fn select(&self, index: usize) -> Result<(&str, u64), InputError> {
        match (self.labels.get(index), self.durations_ms.get(index)) {
            (Some(label), Some(&ms)) => Ok((label.as_str(), ms)),
            _ => Err(InputError::UnknownPreset { index, count: self.len() }),
        }
    }
}

impl Default for PresetList {
    fn default() -> Self {
        Self {
            labels: DEFAULT_PRESETS.iter().map(|s| s.to_string()).collect(),
            durations_ms: vec![60_000, 180_000, 300_000, 600_000],
        }
    }
}
