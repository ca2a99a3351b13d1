//! Low-Pass Filter Constants

/// Default low-pass cutoff applied to both feet before peak extraction (Hz).
///
/// Gait content of foot angular velocity sits below ~15 Hz; 20 Hz removes
/// sensor noise without moving the midswing peak or the HS minimum.
pub const DEFAULT_LOWPASS_CUTOFF_HZ: f64 = 20.0;

/// Default Butterworth order.
pub const DEFAULT_LOWPASS_ORDER: usize = 4;

/// Default sample rate assumed by `PipelineConfig::default` (Hz).
pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 100.0;

/// Edge padding of the forward-backward filter, in multiples of
/// `order + 1` samples.
pub const FILTFILT_PAD_FACTOR: usize = 3;
