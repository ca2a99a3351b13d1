//! Toe-off detection
//!
//! Each stride gets two toe offs, each searched in a window that ends at the
//! foot's next midswing peak:
//!
//! - left toe off in `[RHS, left peak]`
//! - right toe off in `[LHS, next right peak]`
//!
//! `GYzero` takes the last up-crossing of pitch rate in the window (the one
//! nearest the peak), `GYmin` the pitch-rate minimum between the window
//! start and that crossing, and `NetAcc` the acceleration-norm maximum.

use alloc::vec::Vec;

use crate::{
    config::DetectionMethod,
    errors::DetectionFailure,
    signal::{argmax_in, argmin_in, last_crossing_in, Polarity},
    types::StrideEvents,
};

use super::{AnchoredStride, FootSignals, GaitSignals, StrideOutcome};

/// Fills toe offs into heel-strike strides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToeOffDetector {
    method: DetectionMethod,
}

impl ToeOffDetector {
    /// Detector using `method`
    pub fn new(method: DetectionMethod) -> Self {
        Self { method }
    }

    /// Strategy in use
    pub fn method(&self) -> DetectionMethod {
        self.method
    }

    /// Toe offs for every stride, one outcome each
    pub fn detect(&self, signals: &GaitSignals<'_>, strides: &[AnchoredStride]) -> Vec<StrideOutcome<StrideEvents>> {
        strides
            .iter()
            .map(|stride| StrideOutcome::from(self.toe_offs(signals, stride)))
            .collect()
    }

    fn toe_offs(&self, signals: &GaitSignals<'_>, stride: &AnchoredStride) -> Result<StrideEvents, DetectionFailure> {
        let events = stride.events;
        let left = self.toe_off_in(&signals.left, events.right_heel_strike, stride.left_peak)?;
        let right = self.toe_off_in(&signals.right, events.left_heel_strike, stride.next_right_peak)?;

        let events = events.with_toe_offs(left, right);
        if events.is_strictly_increasing() {
            Ok(events)
        } else {
            Err(DetectionFailure::OutOfOrder)
        }
    }

    /// Toe off of one foot in `[start, end]`
    fn toe_off_in(&self, foot: &FootSignals<'_>, start: usize, end: usize) -> Result<usize, DetectionFailure> {
        if start >= end || end >= foot.pitch.len() {
            return Err(DetectionFailure::EmptySearchWindow);
        }
        match self.method {
            DetectionMethod::GyroZero => push_off_crossing(foot.pitch, start, end),
            DetectionMethod::GyroMin => {
                let crossing = push_off_crossing(foot.pitch, start, end)?;
                argmin_in(foot.pitch, start, crossing).ok_or(DetectionFailure::EmptySearchWindow)
            }
            DetectionMethod::NetAcc => {
                argmax_in(foot.accel_norm, start, end).ok_or(DetectionFailure::EmptySearchWindow)
            }
        }
    }
}

fn push_off_crossing(pitch: &[f64], start: usize, end: usize) -> Result<usize, DetectionFailure> {
    last_crossing_in(pitch, start, end + 1, Polarity::Up).ok_or(DetectionFailure::NoZeroCrossing)
}
