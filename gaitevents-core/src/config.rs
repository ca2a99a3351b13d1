//! Pipeline configuration
//!
//! Detection strategies are closed enums, parsed and validated once when the
//! pipeline is built. Nothing downstream compares method names at runtime.
//!
//! External names follow the established vocabulary of gait labs:
//!
//! | Field | Values |
//! |---|---|
//! | `HSmethod`, `TOmethod` | `GYzero`, `GYmin`, `NetAcc` |
//! | `events` | `HS`, `HS&TO` |
//! | `badStrideMode` | `strideLength`, `gaitEvents`, `none` |
//!
//! ```rust
//! use gaitevents_core::config::{DetectionMethod, EventSet, PipelineConfig};
//!
//! let config = PipelineConfig::default()
//!     .with_sample_rate(128.0)
//!     .with_heel_strike_method(DetectionMethod::NetAcc)
//!     .with_events(EventSet::HeelStrikes);
//! assert!(config.validate().is_ok());
//! ```

use core::{fmt, str::FromStr};

use crate::{
    constants::{
        detection::{
            DEFAULT_BAD_STRIDE_CUTOFF_PCT, DEFAULT_BUFFER_S, DEFAULT_GYZERO_HORIZON_S,
            DEFAULT_MIN_PEAK_HEIGHT_DPS, DEFAULT_MIN_PEAK_PROMINENCE_DPS,
            DEFAULT_NETACC_AFTER_MS, DEFAULT_NETACC_BEFORE_MS,
        },
        filtering::{DEFAULT_LOWPASS_CUTOFF_HZ, DEFAULT_LOWPASS_ORDER, DEFAULT_SAMPLE_RATE_HZ},
    },
    errors::{GaitError, GaitResult},
    traits::Validatable,
};

/// Strategy used to place heel strikes or toe offs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionMethod {
    /// Zero crossing of pitch angular velocity
    #[cfg_attr(feature = "serde", serde(rename = "GYzero"))]
    GyroZero,
    /// Minimum of pitch angular velocity
    #[cfg_attr(feature = "serde", serde(rename = "GYmin"))]
    GyroMin,
    /// Extremum of the acceleration norm
    #[cfg_attr(feature = "serde", serde(rename = "NetAcc"))]
    NetAcc,
}

impl DetectionMethod {
    /// External name
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMethod::GyroZero => "GYzero",
            DetectionMethod::GyroMin => "GYmin",
            DetectionMethod::NetAcc => "NetAcc",
        }
    }
}

impl FromStr for DetectionMethod {
    type Err = GaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GYzero" => Ok(DetectionMethod::GyroZero),
            "GYmin" => Ok(DetectionMethod::GyroMin),
            "NetAcc" => Ok(DetectionMethod::NetAcc),
            _ => Err(GaitError::Configuration {
                reason: "unrecognized detection method",
            }),
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which events to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventSet {
    /// Heel strikes only (3-row table)
    #[cfg_attr(feature = "serde", serde(rename = "HS"))]
    HeelStrikes,
    /// Heel strikes and toe offs (5-row table)
    #[cfg_attr(feature = "serde", serde(rename = "HS&TO"))]
    HeelStrikesAndToeOffs,
}

impl FromStr for EventSet {
    type Err = GaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS" => Ok(EventSet::HeelStrikes),
            "HS&TO" => Ok(EventSet::HeelStrikesAndToeOffs),
            _ => Err(GaitError::Configuration {
                reason: "unrecognized event set",
            }),
        }
    }
}

/// How strides are compared against the mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BadStrideMode {
    /// Whole-stride duration
    #[cfg_attr(feature = "serde", serde(rename = "strideLength"))]
    StrideLength,
    /// Every sub-phase duration
    #[cfg_attr(feature = "serde", serde(rename = "gaitEvents"))]
    GaitEvents,
    /// Keep every stride
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    None,
}

impl FromStr for BadStrideMode {
    type Err = GaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strideLength" => Ok(BadStrideMode::StrideLength),
            "gaitEvents" => Ok(BadStrideMode::GaitEvents),
            "none" => Ok(BadStrideMode::None),
            _ => Err(GaitError::Configuration {
                reason: "unrecognized bad-stride mode",
            }),
        }
    }
}

/// NetAcc heel-strike window around the GYmin estimate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", deny_unknown_fields))]
pub struct NetAccWindow {
    /// Milliseconds searched before the GYmin index
    pub before_ms: f64,
    /// Milliseconds searched after the GYmin index
    pub after_ms: f64,
}

impl Default for NetAccWindow {
    fn default() -> Self {
        Self {
            before_ms: DEFAULT_NETACC_BEFORE_MS,
            after_ms: DEFAULT_NETACC_AFTER_MS,
        }
    }
}

/// Complete configuration of one pipeline
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default, deny_unknown_fields))]
pub struct PipelineConfig {
    /// Sample rate of both recordings (Hz)
    pub sample_rate_hz: f64,

    /// Heel-strike strategy
    #[cfg_attr(feature = "serde", serde(rename = "HSmethod"))]
    pub heel_strike_method: DetectionMethod,

    /// Toe-off strategy; required when `events` includes toe offs
    #[cfg_attr(feature = "serde", serde(rename = "TOmethod"))]
    pub toe_off_method: Option<DetectionMethod>,

    /// Events to resolve
    pub events: EventSet,

    /// Minimum midswing peak height after mean removal (deg/s)
    pub min_peak_height: f64,

    /// Minimum midswing peak prominence (deg/s)
    pub min_peak_prominence: f64,

    /// Strides touching this many seconds at either end are dropped
    pub buffer_seconds: f64,

    /// Allowed deviation from the mean duration (percent)
    pub bad_stride_cutoff_pct: f64,

    /// Duration comparison used by the bad-stride filter
    pub bad_stride_mode: BadStrideMode,

    /// Low-pass cutoff applied before peak extraction (Hz)
    pub lowpass_cutoff_hz: f64,

    /// Butterworth order of the low-pass filter
    pub lowpass_order: usize,

    /// How far after the midswing peak GYzero searches (seconds)
    pub gyzero_horizon_s: f64,

    /// NetAcc search window
    pub netacc_window: NetAccWindow,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            heel_strike_method: DetectionMethod::GyroMin,
            toe_off_method: Some(DetectionMethod::GyroZero),
            events: EventSet::HeelStrikesAndToeOffs,
            min_peak_height: DEFAULT_MIN_PEAK_HEIGHT_DPS,
            min_peak_prominence: DEFAULT_MIN_PEAK_PROMINENCE_DPS,
            buffer_seconds: DEFAULT_BUFFER_S,
            bad_stride_cutoff_pct: DEFAULT_BAD_STRIDE_CUTOFF_PCT,
            bad_stride_mode: BadStrideMode::StrideLength,
            lowpass_cutoff_hz: DEFAULT_LOWPASS_CUTOFF_HZ,
            lowpass_order: DEFAULT_LOWPASS_ORDER,
            gyzero_horizon_s: DEFAULT_GYZERO_HORIZON_S,
            netacc_window: NetAccWindow::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the sample rate
    pub fn with_sample_rate(mut self, sample_rate_hz: f64) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Set the heel-strike strategy
    pub fn with_heel_strike_method(mut self, method: DetectionMethod) -> Self {
        self.heel_strike_method = method;
        self
    }

    /// Set (or clear) the toe-off strategy
    pub fn with_toe_off_method(mut self, method: Option<DetectionMethod>) -> Self {
        self.toe_off_method = method;
        self
    }

    /// Choose heel strikes only or heel strikes and toe offs
    pub fn with_events(mut self, events: EventSet) -> Self {
        self.events = events;
        self
    }

    /// Set peak height and prominence thresholds (deg/s)
    pub fn with_peak_thresholds(mut self, min_height: f64, min_prominence: f64) -> Self {
        self.min_peak_height = min_height;
        self.min_peak_prominence = min_prominence;
        self
    }

    /// Set the edge buffer (seconds)
    pub fn with_buffer_seconds(mut self, buffer_seconds: f64) -> Self {
        self.buffer_seconds = buffer_seconds;
        self
    }

    /// Set the bad-stride mode and cutoff
    pub fn with_bad_stride_filter(mut self, mode: BadStrideMode, cutoff_pct: f64) -> Self {
        self.bad_stride_mode = mode;
        self.bad_stride_cutoff_pct = cutoff_pct;
        self
    }

    /// Set the low-pass cutoff and order
    pub fn with_lowpass(mut self, cutoff_hz: f64, order: usize) -> Self {
        self.lowpass_cutoff_hz = cutoff_hz;
        self.lowpass_order = order;
        self
    }

    /// Set the NetAcc window offsets (milliseconds)
    pub fn with_netacc_window(mut self, before_ms: f64, after_ms: f64) -> Self {
        self.netacc_window = NetAccWindow { before_ms, after_ms };
        self
    }

    /// Set the GYzero search horizon (seconds)
    pub fn with_gyzero_horizon(mut self, horizon_s: f64) -> Self {
        self.gyzero_horizon_s = horizon_s;
        self
    }

    /// Toe-off strategy for this run, or `None` in heel-strike-only runs
    pub fn resolved_toe_off_method(&self) -> Option<DetectionMethod> {
        match self.events {
            EventSet::HeelStrikes => None,
            EventSet::HeelStrikesAndToeOffs => self.toe_off_method,
        }
    }

    /// Reject impossible combinations before any detection runs
    pub fn validate(&self) -> GaitResult<()> {
        if !self.sample_rate_hz.is_valid() || self.sample_rate_hz <= 0.0 {
            return Err(GaitError::Configuration {
                reason: "sample rate must be positive",
            });
        }

        if self.events == EventSet::HeelStrikesAndToeOffs && self.toe_off_method.is_none() {
            return Err(GaitError::Configuration {
                reason: "toe-off events requested without a toe-off method",
            });
        }

        if self.lowpass_order == 0 {
            return Err(GaitError::Configuration {
                reason: "low-pass order must be at least 1",
            });
        }

        if !self.lowpass_cutoff_hz.is_valid()
            || self.lowpass_cutoff_hz <= 0.0
            || self.lowpass_cutoff_hz >= self.sample_rate_hz / 2.0
        {
            return Err(GaitError::Configuration {
                reason: "low-pass cutoff must lie between 0 and the Nyquist frequency",
            });
        }

        if !self.min_peak_height.is_valid()
            || !self.min_peak_prominence.is_valid()
            || self.min_peak_prominence < 0.0
        {
            return Err(GaitError::Configuration {
                reason: "peak thresholds must be finite with non-negative prominence",
            });
        }

        if !self.buffer_seconds.is_valid() || self.buffer_seconds < 0.0 {
            return Err(GaitError::Configuration {
                reason: "buffer must be a non-negative duration",
            });
        }

        if !self.bad_stride_cutoff_pct.is_valid() || self.bad_stride_cutoff_pct < 0.0 {
            return Err(GaitError::Configuration {
                reason: "bad-stride cutoff must be a non-negative percentage",
            });
        }

        if !self.gyzero_horizon_s.is_valid() || self.gyzero_horizon_s <= 0.0 {
            return Err(GaitError::Configuration {
                reason: "GYzero horizon must be positive",
            });
        }

        let NetAccWindow { before_ms, after_ms } = self.netacc_window;
        if !before_ms.is_valid() || !after_ms.is_valid() || before_ms < 0.0 || after_ms < 0.0 {
            return Err(GaitError::Configuration {
                reason: "NetAcc offsets must be non-negative",
            });
        }

        Ok(())
    }
}

#[cfg(feature = "std")]
impl PipelineConfig {
    /// Parse and validate a JSON configuration document
    ///
    /// Missing fields take their defaults; unknown fields and unrecognized
    /// method names are configuration errors.
    pub fn from_json_str(document: &str) -> GaitResult<Self> {
        let config: Self = serde_json::from_str(document).map_err(|e| {
            log_warn!("rejecting configuration document: {}", e);
            GaitError::Configuration {
                reason: "malformed configuration document",
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<std::path::Path>>(path: P) -> GaitResult<Self> {
        let document = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            log_warn!("cannot read configuration {}: {}", path.as_ref().display(), e);
            GaitError::Configuration {
                reason: "configuration file unreadable",
            }
        })?;
        Self::from_json_str(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn method_names_parse() {
        assert_eq!("GYzero".parse::<DetectionMethod>(), Ok(DetectionMethod::GyroZero));
        assert_eq!("GYmin".parse::<DetectionMethod>(), Ok(DetectionMethod::GyroMin));
        assert_eq!("NetAcc".parse::<DetectionMethod>(), Ok(DetectionMethod::NetAcc));
        assert!(matches!(
            "gyzero".parse::<DetectionMethod>(),
            Err(GaitError::Configuration { .. })
        ));
        assert_eq!("HS&TO".parse::<EventSet>(), Ok(EventSet::HeelStrikesAndToeOffs));
        assert_eq!("none".parse::<BadStrideMode>(), Ok(BadStrideMode::None));
    }

    #[test]
    fn toe_offs_without_method_rejected() {
        let config = PipelineConfig::default()
            .with_events(EventSet::HeelStrikesAndToeOffs)
            .with_toe_off_method(None);
        assert!(matches!(config.validate(), Err(GaitError::Configuration { .. })));

        let hs_only = config.with_events(EventSet::HeelStrikes);
        assert!(hs_only.validate().is_ok());
        assert_eq!(hs_only.resolved_toe_off_method(), None);
    }

    #[test]
    fn cutoff_above_nyquist_rejected() {
        let config = PipelineConfig::default().with_sample_rate(100.0).with_lowpass(50.0, 4);
        assert!(config.validate().is_err());
        assert!(config.with_lowpass(20.0, 0).validate().is_err());
    }

    #[test]
    fn negative_parameters_rejected() {
        assert!(PipelineConfig::default().with_buffer_seconds(-1.0).validate().is_err());
        assert!(PipelineConfig::default()
            .with_bad_stride_filter(BadStrideMode::StrideLength, f64::NAN)
            .validate()
            .is_err());
        assert!(PipelineConfig::default().with_netacc_window(-80.0, 20.0).validate().is_err());
        assert!(PipelineConfig::default().with_gyzero_horizon(0.0).validate().is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn json_uses_external_names() {
        let config = PipelineConfig::from_json_str(
            r#"{
                "sampleRateHz": 128.0,
                "HSmethod": "NetAcc",
                "TOmethod": "GYmin",
                "events": "HS&TO",
                "badStrideMode": "gaitEvents",
                "netaccWindow": { "beforeMs": 60.0, "afterMs": 10.0 }
            }"#,
        )
        .expect("valid document");
        assert_eq!(config.sample_rate_hz, 128.0);
        assert_eq!(config.heel_strike_method, DetectionMethod::NetAcc);
        assert_eq!(config.toe_off_method, Some(DetectionMethod::GyroMin));
        assert_eq!(config.bad_stride_mode, BadStrideMode::GaitEvents);
        assert_eq!(config.netacc_window.before_ms, 60.0);
        // Unspecified fields keep their defaults
        assert_eq!(config.lowpass_order, DEFAULT_LOWPASS_ORDER);
    }

    #[cfg(feature = "std")]
    #[test]
    fn json_rejects_unknown_method() {
        let result = PipelineConfig::from_json_str(r#"{ "HSmethod": "Magic" }"#);
        assert!(matches!(result, Err(GaitError::Configuration { .. })));
    }

    #[cfg(feature = "std")]
    #[test]
    fn json_rejects_inconsistent_events() {
        let result = PipelineConfig::from_json_str(r#"{ "events": "HS&TO", "TOmethod": null }"#);
        assert!(matches!(result, Err(GaitError::Configuration { .. })));
    }
}
