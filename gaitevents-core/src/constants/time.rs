//! Time-Related Constants
//!
//! Unit conversions used when turning sample counts into seconds, offsets
//! in milliseconds into sample counts, and step intervals into cadence.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: f64 = 1000.0;

/// Seconds per minute.
///
/// Cadence is reported in steps per minute, so a half-cycle of `h` seconds
/// maps to `SECONDS_PER_MINUTE / h` steps/min.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Convert a duration in milliseconds to a whole number of samples.
///
/// Rounds to the nearest sample; negative durations clamp to zero.
pub fn ms_to_samples(duration_ms: f64, sample_rate_hz: f64) -> usize {
    seconds_to_samples(duration_ms / MS_PER_SECOND, sample_rate_hz)
}

/// Convert a duration in seconds to a whole number of samples.
pub fn seconds_to_samples(duration_s: f64, sample_rate_hz: f64) -> usize {
    let samples = libm::round(duration_s * sample_rate_hz);
    if samples <= 0.0 {
        0
    } else {
        samples as usize
    }
}
