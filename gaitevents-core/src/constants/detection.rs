//! Event Detection Constants
//!
//! Defaults for peak extraction, the heel-strike and toe-off search windows
//! and stride outlier rejection. Every value here is a default only; the
//! pipeline configuration can override all of them.

// ===== SIGNAL LAYOUT =====

/// Gyroscope axis carrying pitch (sagittal-plane) angular velocity.
///
/// Sensor frame is X-forward, Y-right, Z-down, so foot pitch is rotation
/// about the mediolateral Y axis. The detectors assume this channel is
/// positive during swing with its maximum at midswing.
pub const PITCH_AXIS: usize = 1;

/// Number of channels in one row of the `n×6` input layout
/// (3-axis acceleration followed by 3-axis angular velocity).
pub const IMU_CHANNELS: usize = 6;

// ===== PEAK EXTRACTION =====

/// Minimum midswing peak height (deg/s, after mean removal).
///
/// Stance-phase bumps in pitch angular velocity stay well below this on
/// level walking; midswing peaks are typically 250-450 deg/s.
pub const DEFAULT_MIN_PEAK_HEIGHT_DPS: f64 = 50.0;

/// Minimum midswing peak prominence (deg/s).
pub const DEFAULT_MIN_PEAK_PROMINENCE_DPS: f64 = 50.0;

/// Fewest peaks per foot that can bound one stride.
pub const MIN_PEAKS_PER_FOOT: usize = 2;

/// Leading-artifact threshold as a fraction of the mean peak magnitude.
///
/// A first peak smaller than this share of the average is treated as a
/// start-of-recording artifact (sensor settling, a shuffle step) and
/// discarded together with its opposite-foot partner.
pub const LEADING_PEAK_MIN_RATIO: f64 = 1.0 / 3.0;

// ===== HEEL-STRIKE SEARCH =====

/// GYzero horizon after the midswing peak (seconds).
pub const DEFAULT_GYZERO_HORIZON_S: f64 = 1.0;

/// NetAcc window start before the GYmin estimate (milliseconds).
///
/// Tuned for foot-mounted sensors; shank mounting may need a different
/// value.
pub const DEFAULT_NETACC_BEFORE_MS: f64 = 80.0;

/// NetAcc window end after the GYmin estimate (milliseconds).
pub const DEFAULT_NETACC_AFTER_MS: f64 = 20.0;

// ===== STRIDE REJECTION =====

/// Default bad-stride deviation cutoff (percent of the mean).
pub const DEFAULT_BAD_STRIDE_CUTOFF_PCT: f64 = 50.0;

/// Default buffer trimmed from each end of the recording (seconds).
pub const DEFAULT_BUFFER_S: f64 = 2.0;
