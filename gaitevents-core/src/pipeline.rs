//! Stride detection pipeline
//!
//! ## Overview
//!
//! Runs every stage on one dual-foot recording, in a fixed order:
//!
//! ```text
//! pitch rate ─▶ low-pass ─▶ peaks ─▶ resolve ─▶ heel strikes ─▶ toe offs
//!                                                                  │
//!         cadence ◀── edge trim ◀── outlier filter ◀── stride table ◀┘
//! ```
//!
//! 1. Zero-phase Butterworth low-pass of both feet's pitch angular velocity
//! 2. Midswing peaks, double-step resolution and heel strikes
//! 3. Toe offs, when the configuration asks for them
//! 4. Bad-stride rejection
//! 5. Edge-buffer trimming
//! 6. Cadence of the surviving strides
//!
//! ## Failure model
//!
//! Configuration problems surface from `StrideDetectionPipeline::new`;
//! input problems (unequal or non-finite recordings, too few peaks) from
//! `run`. A stride whose events cannot be found never fails the run: it is
//! dropped and counted in the `DetectionReport`.
//!
//! The pipeline holds no mutable state, so one instance can process any
//! number of recordings, from several threads if the caller wishes.
//!
//! ```rust
//! use gaitevents_core::{DualFootRecording, FootRecording, PipelineConfig, StrideDetectionPipeline};
//!
//! let pipeline = StrideDetectionPipeline::new(PipelineConfig::default()).expect("valid config");
//! let still = FootRecording::from_rows(&[[0.0, 0.0, 9.81, 0.0, 0.0, 0.0]; 500]);
//! let recording = DualFootRecording::new(still.clone(), still).expect("equal lengths");
//!
//! // Standing still produces no midswing peaks
//! assert!(pipeline.run(&recording).is_err());
//! ```

use alloc::vec::Vec;

use crate::{
    config::{EventSet, PipelineConfig},
    constants::detection::MIN_PEAKS_PER_FOOT,
    detectors::{
        purge, DoubleStepResolver, FootSignals, GaitSignals, HeelStrikeDetector, ToeOffDetector,
    },
    errors::{Foot, GaitError, GaitResult},
    filters::{BadStrideFilter, EdgeBufferFilter},
    signal::{detrend, LowPassFilter, PeakExtractor, PeakSequence},
    traits::{StrideFilter, Validatable},
    types::{CadenceSeries, DualFootRecording, StrideEvents, StrideLayout, StrideTable},
};

/// Counters describing what each stage kept and dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DetectionReport {
    /// Right midswing peaks before resolution
    pub right_peaks: usize,
    /// Left midswing peaks before resolution
    pub left_peaks: usize,
    /// Peaks removed to restore left/right alternation
    pub dropped_double_steps: usize,
    /// First peak pair discarded as a start-of-recording artifact
    pub discarded_leading_peak: bool,
    /// Strides dropped because a heel strike could not be placed
    pub heel_strike_failures: usize,
    /// Strides dropped because a toe off could not be placed
    pub toe_off_failures: usize,
    /// Strides removed by the bad-stride filter
    pub outliers_removed: usize,
    /// Strides removed by the edge buffer
    pub edge_trimmed: usize,
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineOutput {
    /// Surviving strides in chronological order
    pub table: StrideTable,
    /// Steps per minute, one value per stride of `table`
    pub cadence: CadenceSeries,
    /// Strides removed by the bad-stride filter
    pub removed: usize,
    /// Per-stage counters
    pub report: DetectionReport,
}

impl PipelineOutput {
    /// Mean cadence over all strides, `None` when no stride survived
    pub fn mean_cadence(&self) -> Option<f64> {
        self.cadence.mean()
    }

    /// Serialize to a JSON document
    #[cfg(feature = "std")]
    pub fn to_json(&self) -> serde_json::Result<std::string::String> {
        serde_json::to_string(self)
    }
}

/// Configured event detection for dual-foot IMU recordings
#[derive(Debug, Clone)]
pub struct StrideDetectionPipeline {
    config: PipelineConfig,
    lowpass: LowPassFilter,
    peaks: PeakExtractor,
    resolver: DoubleStepResolver,
    heel_strikes: HeelStrikeDetector,
    toe_offs: Option<ToeOffDetector>,
    outliers: BadStrideFilter,
}

impl StrideDetectionPipeline {
    /// Validate `config` and design the low-pass filter
    pub fn new(config: PipelineConfig) -> GaitResult<Self> {
        config.validate()?;
        let lowpass = LowPassFilter::butterworth(
            config.lowpass_order,
            config.lowpass_cutoff_hz,
            config.sample_rate_hz,
        )?;

        Ok(Self {
            lowpass,
            peaks: PeakExtractor::new(config.min_peak_height, config.min_peak_prominence),
            resolver: DoubleStepResolver::new(),
            heel_strikes: HeelStrikeDetector::from_config(&config),
            toe_offs: config.resolved_toe_off_method().map(ToeOffDetector::new),
            outliers: BadStrideFilter::new(config.bad_stride_mode, config.bad_stride_cutoff_pct),
            config,
        })
    }

    /// Configuration this pipeline was built from
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Row layout of the tables this pipeline produces
    pub fn layout(&self) -> StrideLayout {
        match self.config.events {
            EventSet::HeelStrikes => StrideLayout::HeelStrikes,
            EventSet::HeelStrikesAndToeOffs => StrideLayout::HeelStrikesAndToeOffs,
        }
    }

    /// Detect strides in one recording
    pub fn run(&self, recording: &DualFootRecording) -> GaitResult<PipelineOutput> {
        if !recording.right().is_valid() || !recording.left().is_valid() {
            log_warn!("recording contains non-finite samples");
            return Err(GaitError::InvalidValue);
        }

        let right_raw = recording.right().pitch_rates();
        let left_raw = recording.left().pitch_rates();
        let right_pitch = self.lowpass.filtfilt(&right_raw)?;
        let left_pitch = self.lowpass.filtfilt(&left_raw)?;
        let right_norm = recording.right().accel_norms();
        let left_norm = recording.left().accel_norms();
        let signals = GaitSignals {
            right: FootSignals {
                pitch: &right_pitch,
                raw_pitch: &right_raw,
                accel_norm: &right_norm,
            },
            left: FootSignals {
                pitch: &left_pitch,
                raw_pitch: &left_raw,
                accel_norm: &left_norm,
            },
        };

        let mut report = DetectionReport::default();

        let right_peaks = self.midswing_peaks(&right_pitch, Foot::Right)?;
        let left_peaks = self.midswing_peaks(&left_pitch, Foot::Left)?;
        report.right_peaks = right_peaks.len();
        report.left_peaks = left_peaks.len();

        let resolved = self.resolver.resolve(&right_peaks, &left_peaks);
        report.dropped_double_steps = resolved.dropped;

        let pass = self.heel_strikes.detect(&signals, resolved)?;
        report.discarded_leading_peak = pass.discarded_leading_peak;
        let (anchored, failures) = purge("heel strike", pass.outcomes);
        report.heel_strike_failures = failures;

        let strides: Vec<StrideEvents> = match &self.toe_offs {
            Some(detector) => {
                let (strides, failures) = purge("toe off", detector.detect(&signals, &anchored));
                report.toe_off_failures = failures;
                strides
            }
            None => anchored.into_iter().map(|a| a.events).collect(),
        };

        let mut table = StrideTable::from_strides(self.layout(), strides);
        report.outliers_removed = self.run_filter(&self.outliers, &mut table);

        let edges = EdgeBufferFilter::from_seconds(
            self.config.buffer_seconds,
            self.config.sample_rate_hz,
            recording.len(),
        );
        report.edge_trimmed = self.run_filter(&edges, &mut table);

        let cadence = CadenceSeries::from_table(&table, self.config.sample_rate_hz);

        log_info!(
            "{} strides kept ({} heel-strike failures, {} toe-off failures, {} outliers, {} trimmed)",
            table.len(),
            report.heel_strike_failures,
            report.toe_off_failures,
            report.outliers_removed,
            report.edge_trimmed
        );

        Ok(PipelineOutput {
            table,
            cadence,
            removed: report.outliers_removed,
            report,
        })
    }

    fn midswing_peaks(&self, pitch: &[f64], foot: Foot) -> GaitResult<PeakSequence> {
        let peaks = self.peaks.extract(&detrend(pitch));
        if peaks.len() < MIN_PEAKS_PER_FOOT {
            log_warn!("{} foot: {} midswing peaks found", foot, peaks.len());
            return Err(GaitError::InsufficientPeaks {
                foot,
                required: MIN_PEAKS_PER_FOOT,
                found: peaks.len(),
            });
        }
        Ok(peaks)
    }

    fn run_filter(&self, filter: &dyn StrideFilter, table: &mut StrideTable) -> usize {
        let removed = filter.apply(table);
        if removed > 0 {
            log_debug!("{} filter removed {} strides", filter.name(), removed);
        }
        removed
    }
}
