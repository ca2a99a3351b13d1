//! Event detectors
//!
//! Turns midswing peaks into per-stride heel strikes and toe offs:
//!
//! - `resolver`: enforce left/right alternation of peaks
//! - `heel_strike`: one heel strike per peak, paired into strides
//! - `toe_off`: fill the toe offs of each stride
//!
//! Detectors never stop on a single bad stride. Each stride carries a
//! `StrideOutcome` through the pass; invalid ones are purged afterwards and
//! counted.

use alloc::vec::Vec;

use crate::{errors::Foot, types::StrideEvents};

pub mod heel_strike;
pub mod resolver;
pub mod toe_off;

pub use crate::errors::DetectionFailure;
pub use heel_strike::{HeelStrikeDetector, HeelStrikePass};
pub use resolver::{DoubleStepResolver, MergeCursor, ResolvedPeaks};
pub use toe_off::ToeOffDetector;

/// Result of resolving one stride
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrideOutcome<T> {
    /// Every event was found and ordered
    Valid(T),
    /// The stride is dropped for this reason
    Invalid(DetectionFailure),
}

impl<T> StrideOutcome<T> {
    /// True for `Valid`
    pub fn is_valid(&self) -> bool {
        matches!(self, StrideOutcome::Valid(_))
    }

    /// Apply `f` to a valid stride, passing failures through
    pub fn and_then<U, F>(self, f: F) -> StrideOutcome<U>
    where
        F: FnOnce(T) -> StrideOutcome<U>,
    {
        match self {
            StrideOutcome::Valid(value) => f(value),
            StrideOutcome::Invalid(reason) => StrideOutcome::Invalid(reason),
        }
    }
}

impl<T> From<Result<T, DetectionFailure>> for StrideOutcome<T> {
    fn from(result: Result<T, DetectionFailure>) -> Self {
        match result {
            Ok(value) => StrideOutcome::Valid(value),
            Err(reason) => StrideOutcome::Invalid(reason),
        }
    }
}

/// Drop invalid outcomes, returning the survivors and the number dropped
pub fn purge<T>(stage: &str, outcomes: Vec<StrideOutcome<T>>) -> (Vec<T>, usize) {
    let mut valid = Vec::with_capacity(outcomes.len());
    let mut failures = 0;
    for (stride, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            StrideOutcome::Valid(value) => valid.push(value),
            StrideOutcome::Invalid(reason) => {
                failures += 1;
                log_debug!("{}: stride {} rejected: {}", stage, stride, reason);
            }
        }
    }
    (valid, failures)
}

/// Channels of one foot used by the detectors
#[derive(Debug, Clone, Copy)]
pub struct FootSignals<'a> {
    /// Low-pass-filtered pitch angular velocity (deg/s)
    pub pitch: &'a [f64],
    /// Pitch angular velocity as recorded, searched by `GYzero` heel strikes
    pub raw_pitch: &'a [f64],
    /// Acceleration norm (m/s²)
    pub accel_norm: &'a [f64],
}

/// Both feet's detector channels, equal length
#[derive(Debug, Clone, Copy)]
pub struct GaitSignals<'a> {
    /// Right foot
    pub right: FootSignals<'a>,
    /// Left foot
    pub left: FootSignals<'a>,
}

impl<'a> GaitSignals<'a> {
    /// Channels of one foot
    pub fn foot(&self, foot: Foot) -> &FootSignals<'a> {
        match foot {
            Foot::Right => &self.right,
            Foot::Left => &self.left,
        }
    }

    /// Samples per foot
    pub fn len(&self) -> usize {
        self.right.pitch.len()
    }

    /// True for empty signals
    pub fn is_empty(&self) -> bool {
        self.right.pitch.is_empty()
    }
}

/// A stride together with the midswing peaks that bound its toe-off windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchoredStride {
    /// Heel strikes (and later toe offs)
    pub events: StrideEvents,
    /// Left midswing peak between RHS and LHS
    pub left_peak: usize,
    /// Right midswing peak between LHS and the next RHS
    pub next_right_peak: usize,
}
