//! Heel-strike detection
//!
//! One heel strike is searched after every resolved midswing peak of each
//! foot, then right and left heel strikes are paired into strides that
//! always start on the right foot.
//!
//! ## Strategies
//!
//! | Method | Heel strike |
//! |---|---|
//! | `GYzero` | first down-crossing of raw pitch rate within the horizon after the peak |
//! | `GYmin` | negative pitch-rate minimum before the opposite foot's up-crossing |
//! | `NetAcc` | acceleration-norm minimum around the `GYmin` estimate |
//!
//! ## Stride pairing
//!
//! Stride `i` takes `RHS[i]`, `LHS[i + offset]` and `RHS[i + 1] - 1`. When
//! the recording starts on a left step the left sequence is rotated by one
//! (`offset = 1`) and the dangling final pair is dropped.

use alloc::vec::Vec;

use crate::{
    config::{DetectionMethod, NetAccWindow, PipelineConfig},
    constants::{
        detection::{LEADING_PEAK_MIN_RATIO, MIN_PEAKS_PER_FOOT},
        time::{ms_to_samples, seconds_to_samples},
    },
    errors::{DetectionFailure, Foot, GaitError, GaitResult},
    signal::{argmin_in, first_crossing_in, last_crossing_in, PeakSequence, Polarity},
    types::StrideEvents,
};

use super::{AnchoredStride, GaitSignals, ResolvedPeaks, StrideOutcome};

/// Per-foot heel-strike search with a strategy fixed for the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeelStrikeDetector {
    method: DetectionMethod,
    gyzero_horizon: usize,
    netacc_before: usize,
    netacc_after: usize,
}

/// Everything the heel-strike pass produced
#[derive(Debug, Clone, PartialEq)]
pub struct HeelStrikePass {
    /// Peaks the strides were built from, after the start guard
    pub peaks: ResolvedPeaks,
    /// Whether the first peak pair was discarded as a start artifact
    pub discarded_leading_peak: bool,
    /// `1` when the left sequence was rotated to start on the right foot
    pub offset: usize,
    /// One outcome per candidate stride, in order
    pub outcomes: Vec<StrideOutcome<AnchoredStride>>,
}

impl HeelStrikeDetector {
    /// Detector for `method` at `sample_rate_hz`
    pub fn new(
        method: DetectionMethod,
        sample_rate_hz: f64,
        gyzero_horizon_s: f64,
        netacc_window: NetAccWindow,
    ) -> Self {
        Self {
            method,
            gyzero_horizon: seconds_to_samples(gyzero_horizon_s, sample_rate_hz),
            netacc_before: ms_to_samples(netacc_window.before_ms, sample_rate_hz),
            netacc_after: ms_to_samples(netacc_window.after_ms, sample_rate_hz),
        }
    }

    /// Detector configured from a validated pipeline configuration
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            config.heel_strike_method,
            config.sample_rate_hz,
            config.gyzero_horizon_s,
            config.netacc_window,
        )
    }

    /// Strategy in use
    pub fn method(&self) -> DetectionMethod {
        self.method
    }

    /// Guard the start, search every heel strike and pair them into strides
    pub fn detect(&self, signals: &GaitSignals<'_>, peaks: ResolvedPeaks) -> GaitResult<HeelStrikePass> {
        let (peaks, discarded_leading_peak) = apply_start_guard(peaks);

        for foot in [Foot::Right, Foot::Left] {
            let found = peaks.foot(foot).len();
            if found < MIN_PEAKS_PER_FOOT {
                log_warn!("{} foot has {} usable peaks, need {}", foot, found, MIN_PEAKS_PER_FOOT);
                return Err(GaitError::InsufficientPeaks {
                    foot,
                    required: MIN_PEAKS_PER_FOOT,
                    found,
                });
            }
        }

        let right_hs = self.heel_strikes(signals, &peaks, Foot::Right);
        let left_hs = self.heel_strikes(signals, &peaks, Foot::Left);

        let offset = match (right_hs[0], left_hs[0]) {
            (Ok(rhs), Ok(lhs)) => usize::from(lhs < rhs),
            _ => usize::from(peaks.left.indices()[0] < peaks.right.indices()[0]),
        };

        let count = (right_hs.len() - 1).min(left_hs.len() - offset);
        let mut outcomes = Vec::with_capacity(count);
        for i in 0..count {
            let j = i + offset;
            let stride = pair(right_hs[i], left_hs[j], right_hs[i + 1]).map(|events| AnchoredStride {
                events,
                left_peak: peaks.left.indices()[j],
                next_right_peak: peaks.right.indices()[i + 1],
            });
            outcomes.push(StrideOutcome::from(stride));
        }

        log_debug!(
            "{} heel strikes: {} candidate strides, left offset {}",
            self.method,
            outcomes.len(),
            offset
        );

        Ok(HeelStrikePass {
            peaks,
            discarded_leading_peak,
            offset,
            outcomes,
        })
    }

    /// Heel strike after every peak of `foot`
    pub fn heel_strikes(
        &self,
        signals: &GaitSignals<'_>,
        peaks: &ResolvedPeaks,
        foot: Foot,
    ) -> Vec<Result<usize, DetectionFailure>> {
        let own = peaks.foot(foot);
        let opposite = peaks.foot(foot.opposite());
        own.indices()
            .iter()
            .map(|&peak| self.heel_strike_after(signals, foot, peak, opposite))
            .collect()
    }

    fn heel_strike_after(
        &self,
        signals: &GaitSignals<'_>,
        foot: Foot,
        peak: usize,
        opposite_peaks: &PeakSequence,
    ) -> Result<usize, DetectionFailure> {
        match self.method {
            DetectionMethod::GyroZero => self.gyro_zero(signals.foot(foot).raw_pitch, peak),
            DetectionMethod::GyroMin => gyro_min(signals, foot, peak, opposite_peaks),
            DetectionMethod::NetAcc => {
                let estimate = gyro_min(signals, foot, peak, opposite_peaks)?;
                let norm = signals.foot(foot).accel_norm;
                let start = estimate.saturating_sub(self.netacc_before);
                let end = estimate.saturating_add(self.netacc_after);
                argmin_in(norm, start, end).ok_or(DetectionFailure::EmptySearchWindow)
            }
        }
    }

    fn gyro_zero(&self, pitch: &[f64], peak: usize) -> Result<usize, DetectionFailure> {
        let last = pitch.len().checked_sub(1).ok_or(DetectionFailure::EmptySearchWindow)?;
        let end = peak.saturating_add(self.gyzero_horizon).min(last);
        if peak >= end {
            return Err(DetectionFailure::EmptySearchWindow);
        }
        first_crossing_in(pitch, peak, end + 1, Polarity::Down).ok_or(DetectionFailure::NoZeroCrossing)
    }
}

/// Pitch-rate minimum between `peak` and the opposite foot's push-off
fn gyro_min(
    signals: &GaitSignals<'_>,
    foot: Foot,
    peak: usize,
    opposite_peaks: &PeakSequence,
) -> Result<usize, DetectionFailure> {
    let next_opposite = opposite_peaks
        .next_after(peak)
        .ok_or(DetectionFailure::MissingOppositePeak)?;
    let opposite_pitch = signals.foot(foot.opposite()).pitch;
    let bound = last_crossing_in(opposite_pitch, peak, next_opposite + 1, Polarity::Up)
        .ok_or(DetectionFailure::NoZeroCrossing)?;

    let pitch = signals.foot(foot).pitch;
    let minimum = argmin_in(pitch, peak, bound).ok_or(DetectionFailure::EmptySearchWindow)?;
    if pitch[minimum] >= 0.0 {
        return Err(DetectionFailure::NonNegativeMinimum);
    }
    Ok(minimum)
}

fn pair(
    right: Result<usize, DetectionFailure>,
    left: Result<usize, DetectionFailure>,
    next_right: Result<usize, DetectionFailure>,
) -> Result<StrideEvents, DetectionFailure> {
    let next_right = next_right?;
    let events = StrideEvents::heel_strikes(right?, left?, next_right.saturating_sub(1));
    if events.is_strictly_increasing() {
        Ok(events)
    } else {
        Err(DetectionFailure::OutOfOrder)
    }
}

/// Drop the leading peak pair when the first peak is a start artifact
fn apply_start_guard(peaks: ResolvedPeaks) -> (ResolvedPeaks, bool) {
    let (Some((foot, magnitude)), Some(mean)) = (peaks.earliest(), peaks.detected_mean) else {
        return (peaks, false);
    };
    if magnitude >= mean * LEADING_PEAK_MIN_RATIO {
        return (peaks, false);
    }

    log_warn!(
        "discarding leading {} peak ({:.1} deg/s, mean {:.1}) and its successor",
        foot,
        magnitude,
        mean
    );
    let guarded = ResolvedPeaks {
        right: peaks.right.without_first(),
        left: peaks.left.without_first(),
        dropped: peaks.dropped,
        detected_mean: peaks.detected_mean,
    };
    (guarded, true)
}
