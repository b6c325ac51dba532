//! Time Formatter - duration to `HH:MM[:SS]`.
//!
//! Hours are computed separately and prefixed, so durations past one day keep
//! counting (`100:00:00`). The minutes and seconds come from formatting the
//! remainder as a time of day, letting chrono do the zero padding.
//!
//! # Example
//!
//! ```
//! use spark_stopwatch::format::format_duration;
//!
//! assert_eq!(format_duration(3661.0, true), "01:01:01");
//! assert_eq!(format_duration(59.0, false), "00:00");
//! ```

use chrono::NaiveTime;

const SECONDS_PER_HOUR: u64 = 60 * 60;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Duration shown before the first tick and after a reset.
pub const ZERO_DURATION: &str = "00:00:00";

/// Format `seconds` as `HH:MM:SS` (or `HH:MM` without seconds).
///
/// Fractions are truncated. Negative and non-finite input is treated as zero.
pub fn format_duration(seconds: f64, include_seconds: bool) -> String {
    let whole = whole_seconds(seconds);
    let hours = whole / SECONDS_PER_HOUR;

    let pattern = if include_seconds { "%M:%S" } else { "%M" };
    let time_of_day = (whole % SECONDS_PER_DAY) as u32;
    // The remainder is always below one day, so the time always exists.
    let minutes_seconds = NaiveTime::from_num_seconds_from_midnight_opt(time_of_day, 0)
        .map(|time| time.format(pattern).to_string())
        .unwrap_or_default();

    format!("{hours:02}:{minutes_seconds}")
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    }
}

// =============================================================================
// Tests
// =============================================================================
