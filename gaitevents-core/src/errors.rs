//! Error Types for Gait Event Detection
//!
//! ## Design Philosophy
//!
//! Errors are split by how far they reach:
//!
//! 1. **Fatal errors** (`GaitError`) stop a pipeline invocation. They are
//!    raised either when the pipeline is constructed (bad configuration) or
//!    before any stride is searched (bad input, too few peaks).
//!
//! 2. **Per-stride failures** (`DetectionFailure`) never stop anything. A
//!    stride whose crossing or minimum cannot be found is marked invalid,
//!    purged after the full pass and counted in the detection report.
//!
//! Both enums are `Copy` and carry only `&'static str` reasons and numeric
//! context, so they can be stored in per-stride outcome vectors without
//! allocation.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use gaitevents_core::{GaitError, PipelineConfig, StrideDetectionPipeline};
//!
//! let config = PipelineConfig::default().with_sample_rate(0.0);
//! match StrideDetectionPipeline::new(config) {
//!     Ok(_) => unreachable!(),
//!     Err(GaitError::Configuration { reason }) => {
//!         // Reject the run before touching any data
//!         assert!(!reason.is_empty());
//!     }
//!     Err(_) => unreachable!(),
//! }
//! ```

use core::fmt;

use thiserror_no_std::Error;

/// Result type for fallible pipeline operations
pub type GaitResult<T> = Result<T, GaitError>;

/// Which foot a signal or event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Foot {
    /// Right foot or shank sensor
    Right,
    /// Left foot or shank sensor
    Left,
}

impl Foot {
    /// The contralateral foot
    pub fn opposite(self) -> Self {
        match self {
            Foot::Right => Foot::Left,
            Foot::Left => Foot::Right,
        }
    }
}

impl fmt::Display for Foot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Foot::Right => f.write_str("right"),
            Foot::Left => f.write_str("left"),
        }
    }
}

/// Fatal errors - the invocation produces no strides
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GaitError {
    /// Configuration rejected before any detection ran
    #[error("Configuration rejected: {reason}")]
    Configuration {
        /// What was wrong with it
        reason: &'static str,
    },

    /// Too few midswing peaks on one foot to form a single stride
    #[error("Insufficient peaks on {foot} foot: need {required}, found {found}")]
    InsufficientPeaks {
        /// Foot whose signal produced too few peaks
        foot: Foot,
        /// Minimum number of peaks for one stride
        required: usize,
        /// Peaks left after extraction, resolution and the start guard
        found: usize,
    },

    /// The two feet were not recorded with the same number of samples
    #[error("Recording length mismatch: right has {right} samples, left has {left}")]
    LengthMismatch {
        /// Samples in the right-foot recording
        right: usize,
        /// Samples in the left-foot recording
        left: usize,
    },

    /// A sample contained NaN or infinity
    #[error("Invalid value: not a valid number")]
    InvalidValue,

    /// Recording too short for the zero-phase filter
    #[error("Insufficient data: need {required} samples, have {available}")]
    InsufficientData {
        /// Minimum number of samples
        required: usize,
        /// Actual number of samples
        available: usize,
    },
}

/// Reasons a single stride could not be resolved
///
/// These are reported, not raised: the stride is dropped and the rest of
/// the recording is processed normally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionFailure {
    /// The search window was empty after clipping to the recording
    #[error("empty search window")]
    EmptySearchWindow,

    /// No sign change of the requested polarity inside the window
    #[error("no zero crossing in search window")]
    NoZeroCrossing,

    /// The gyro minimum was not below zero
    #[error("gyro minimum is not negative")]
    NonNegativeMinimum,

    /// No opposite-foot peak to bound the search
    #[error("no opposite-foot peak bounds the search")]
    MissingOppositePeak,

    /// The resolved events are not strictly increasing
    #[error("events out of order")]
    OutOfOrder,
}
