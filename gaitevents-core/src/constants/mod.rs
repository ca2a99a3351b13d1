//! Constants for gaitevents
//!
//! Centralized defaults and unit conversions. Values carry their unit in
//! the name (`_HZ`, `_MS`, `_S`, `_DPS`, `_PCT`).
//!
//! ## Organization
//!
//! - **Detection**: peak thresholds, search windows, rejection cutoffs
//! - **Filtering**: low-pass design defaults
//! - **Time**: unit conversions between seconds, milliseconds and samples

/// Peak, heel-strike, toe-off and stride rejection defaults.
pub mod detection;

/// Zero-phase low-pass filter defaults.
pub mod filtering;

/// Time unit conversions.
pub mod time;

pub use detection::{
    PITCH_AXIS, IMU_CHANNELS, MIN_PEAKS_PER_FOOT, LEADING_PEAK_MIN_RATIO,
    DEFAULT_MIN_PEAK_HEIGHT_DPS, DEFAULT_MIN_PEAK_PROMINENCE_DPS,
    DEFAULT_GYZERO_HORIZON_S, DEFAULT_NETACC_BEFORE_MS, DEFAULT_NETACC_AFTER_MS,
    DEFAULT_BAD_STRIDE_CUTOFF_PCT, DEFAULT_BUFFER_S,
};

pub use filtering::{
    DEFAULT_LOWPASS_CUTOFF_HZ, DEFAULT_LOWPASS_ORDER, DEFAULT_SAMPLE_RATE_HZ,
};

pub use time::{MS_PER_SECOND, SECONDS_PER_MINUTE};
