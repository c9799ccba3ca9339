//! Remaining-time readout formatting

/// Format remaining milliseconds as `M:SS`.
///
/// Minutes are unbounded, seconds are always two digits. Sub-second
/// remainders are truncated, so 999 ms still reads `0:00`.
pub fn format_remaining(remaining_ms: u64) -> String {
    let total_seconds = remaining_ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_remaining(0), "0:00");
    }

    #[test]
    fn pads_seconds() {
        assert_eq!(format_remaining(65_000), "1:05");
        assert_eq!(format_remaining(180_000), "3:00");
    }

    #[test]
    fn minutes_are_unbounded() {
        assert_eq!(format_remaining(7_325_000), "122:05");
    }

    #[test]
    fn truncates_partial_seconds() {
        assert_eq!(format_remaining(999), "0:00");
        assert_eq!(format_remaining(59_999), "0:59");
        assert_eq!(format_remaining(4_900), "0:04");
    }
}
