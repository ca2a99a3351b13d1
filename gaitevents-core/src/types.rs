//! Core data types
//!
//! Input samples, per-stride event records and the stride table handed to
//! downstream segmentation. Everything here lives for a single pipeline
//! invocation; nothing is persisted between runs.

use alloc::vec::Vec;

use crate::{
    constants::{
        detection::{IMU_CHANNELS, PITCH_AXIS},
        time::SECONDS_PER_MINUTE,
    },
    errors::{GaitError, GaitResult},
    traits::Validatable,
};

/// One time step of a calibrated IMU.
///
/// Frame is X-forward, Y-right, Z-down. Acceleration in m/s², angular
/// velocity in deg/s. Samples are read-only for the whole pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImuSample {
    /// Linear acceleration [x, y, z] in m/s²
    pub accel: [f64; 3],
    /// Angular velocity [x, y, z] in deg/s
    pub gyro: [f64; 3],
}

impl ImuSample {
    /// Create a sample from acceleration and angular velocity
    pub fn new(accel: [f64; 3], gyro: [f64; 3]) -> Self {
        Self { accel, gyro }
    }

    /// Create a sample from one row of the `n×6` layout
    /// (ax, ay, az, gx, gy, gz)
    pub fn from_row(row: [f64; IMU_CHANNELS]) -> Self {
        Self {
            accel: [row[0], row[1], row[2]],
            gyro: [row[3], row[4], row[5]],
        }
    }

    /// Pitch (sagittal) angular velocity in deg/s
    pub fn pitch_rate(&self) -> f64 {
        self.gyro[PITCH_AXIS]
    }

    /// Euclidean norm of the acceleration vector in m/s²
    pub fn accel_norm(&self) -> f64 {
        let [x, y, z] = self.accel;
        libm::sqrt(x * x + y * y + z * z)
    }
}

impl Validatable for ImuSample {
    fn is_valid(&self) -> bool {
        self.accel.iter().chain(self.gyro.iter()).all(|v| v.is_valid())
    }
}

/// Fixed-rate, gap-free samples from one foot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FootRecording {
    samples: Vec<ImuSample>,
}

impl FootRecording {
    /// Wrap an already-calibrated sample sequence
    pub fn new(samples: Vec<ImuSample>) -> Self {
        Self { samples }
    }

    /// Build a recording from `n×6` rows
    pub fn from_rows(rows: &[[f64; IMU_CHANNELS]]) -> Self {
        Self {
            samples: rows.iter().copied().map(ImuSample::from_row).collect(),
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the recording holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the samples
    pub fn samples(&self) -> &[ImuSample] {
        &self.samples
    }

    /// Pitch angular velocity channel
    pub fn pitch_rates(&self) -> Vec<f64> {
        self.samples.iter().map(ImuSample::pitch_rate).collect()
    }

    /// Acceleration norm channel
    pub fn accel_norms(&self) -> Vec<f64> {
        self.samples.iter().map(ImuSample::accel_norm).collect()
    }
}

impl Validatable for FootRecording {
    fn is_valid(&self) -> bool {
        self.samples.iter().all(Validatable::is_valid)
    }
}

/// Synchronized right and left foot recordings of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct DualFootRecording {
    right: FootRecording,
    left: FootRecording,
}

impl DualFootRecording {
    /// Pair two recordings, rejecting unequal lengths
    pub fn new(right: FootRecording, left: FootRecording) -> GaitResult<Self> {
        if right.len() != left.len() {
            return Err(GaitError::LengthMismatch {
                right: right.len(),
                left: left.len(),
            });
        }
        Ok(Self { right, left })
    }

    /// Pair two `n×6` arrays
    pub fn from_rows(right: &[[f64; IMU_CHANNELS]], left: &[[f64; IMU_CHANNELS]]) -> GaitResult<Self> {
        Self::new(FootRecording::from_rows(right), FootRecording::from_rows(left))
    }

    /// Samples per foot
    pub fn len(&self) -> usize {
        self.right.len()
    }

    /// True when both feet are empty
    pub fn is_empty(&self) -> bool {
        self.right.is_empty()
    }

    /// Right-foot recording
    pub fn right(&self) -> &FootRecording {
        &self.right
    }

    /// Left-foot recording
    pub fn left(&self) -> &FootRecording {
        &self.left
    }
}

/// Row layout of a stride table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrideLayout {
    /// `[RHS, LHS, nextRHS-1]`
    HeelStrikes,
    /// `[RHS, LTO, LHS, RTO, nextRHS-1]`
    HeelStrikesAndToeOffs,
}

impl StrideLayout {
    /// Number of rows (populated fields per stride)
    pub fn rows(self) -> usize {
        match self {
            StrideLayout::HeelStrikes => 3,
            StrideLayout::HeelStrikesAndToeOffs => 5,
        }
    }
}

/// Sample indices of one stride, starting at a right heel strike.
///
/// Toe-off fields are `None` in heel-strike-only runs. `stride_end` is the
/// sample before the next right heel strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrideEvents {
    /// Right heel strike
    pub right_heel_strike: usize,
    /// Left toe off
    pub left_toe_off: Option<usize>,
    /// Left heel strike
    pub left_heel_strike: usize,
    /// Right toe off
    pub right_toe_off: Option<usize>,
    /// Next right heel strike minus one
    pub stride_end: usize,
}

impl StrideEvents {
    /// Heel-strike-only record
    pub fn heel_strikes(right_heel_strike: usize, left_heel_strike: usize, stride_end: usize) -> Self {
        Self {
            right_heel_strike,
            left_toe_off: None,
            left_heel_strike,
            right_toe_off: None,
            stride_end,
        }
    }

    /// Same record with both toe offs filled in
    pub fn with_toe_offs(self, left_toe_off: usize, right_toe_off: usize) -> Self {
        Self {
            left_toe_off: Some(left_toe_off),
            right_toe_off: Some(right_toe_off),
            ..self
        }
    }

    /// Layout implied by the populated fields
    pub fn layout(&self) -> StrideLayout {
        if self.left_toe_off.is_some() && self.right_toe_off.is_some() {
            StrideLayout::HeelStrikesAndToeOffs
        } else {
            StrideLayout::HeelStrikes
        }
    }

    /// Populated fields in row order
    pub fn indices(&self) -> heapless::Vec<usize, 5> {
        let mut out = heapless::Vec::new();
        let fields = [
            Some(self.right_heel_strike),
            self.left_toe_off,
            Some(self.left_heel_strike),
            self.right_toe_off,
            Some(self.stride_end),
        ];
        for index in fields.into_iter().flatten() {
            // Capacity equals the field count.
            let _ = out.push(index);
        }
        out
    }

    /// Durations between consecutive populated fields, in samples
    pub fn phase_durations(&self) -> heapless::Vec<usize, 4> {
        let indices = self.indices();
        let mut out = heapless::Vec::new();
        for pair in indices.windows(2) {
            let _ = out.push(pair[1].saturating_sub(pair[0]));
        }
        out
    }

    /// Strict ordering among populated fields
    pub fn is_strictly_increasing(&self) -> bool {
        self.indices().windows(2).all(|pair| pair[0] < pair[1])
    }

    /// First event index
    pub fn first(&self) -> usize {
        self.right_heel_strike
    }

    /// Last event index
    pub fn last(&self) -> usize {
        self.stride_end
    }

    /// Samples from first to last event
    pub fn duration(&self) -> usize {
        self.stride_end.saturating_sub(self.right_heel_strike)
    }

    /// Steps per minute from the two half cycles of this stride
    pub fn cadence(&self, sample_rate_hz: f64) -> f64 {
        let first_half = self.left_heel_strike.saturating_sub(self.right_heel_strike) as f64;
        let second_half = (self.stride_end + 1).saturating_sub(self.left_heel_strike) as f64;
        let mean_half_s = (first_half + second_half) / 2.0 / sample_rate_hz;
        if mean_half_s > 0.0 {
            SECONDS_PER_MINUTE / mean_half_s
        } else {
            0.0
        }
    }
}

/// Chronological, non-overlapping strides sharing one row layout
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrideTable {
    layout: StrideLayout,
    strides: Vec<StrideEvents>,
}

impl StrideTable {
    /// Empty table with the given layout
    pub fn new(layout: StrideLayout) -> Self {
        Self { layout, strides: Vec::new() }
    }

    /// Table from already-validated strides
    ///
    /// Callers are responsible for chronological order and the layout of
    /// each record; the pipeline only builds tables from strides that
    /// passed the ordering check.
    pub fn from_strides(layout: StrideLayout, strides: Vec<StrideEvents>) -> Self {
        Self { layout, strides }
    }

    /// Row layout
    pub fn layout(&self) -> StrideLayout {
        self.layout
    }

    /// Rows per stride (3 or 5)
    pub fn row_count(&self) -> usize {
        self.layout.rows()
    }

    /// Number of strides
    pub fn len(&self) -> usize {
        self.strides.len()
    }

    /// True when no stride survived
    pub fn is_empty(&self) -> bool {
        self.strides.is_empty()
    }

    /// Borrow the strides
    pub fn strides(&self) -> &[StrideEvents] {
        &self.strides
    }

    /// Iterate strides in order
    pub fn iter(&self) -> core::slice::Iter<'_, StrideEvents> {
        self.strides.iter()
    }

    /// Keep only strides matching `keep`, returning how many were removed
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&StrideEvents) -> bool,
    {
        let before = self.strides.len();
        self.strides.retain(keep);
        before - self.strides.len()
    }

    /// `rows × strides` matrix in the downstream layout
    pub fn rows(&self) -> Vec<Vec<usize>> {
        let mut rows: Vec<Vec<usize>> = (0..self.row_count())
            .map(|_| Vec::with_capacity(self.strides.len()))
            .collect();
        for stride in &self.strides {
            for (row, index) in rows.iter_mut().zip(stride.indices()) {
                row.push(index);
            }
        }
        rows
    }

    /// Consume the table
    pub fn into_strides(self) -> Vec<StrideEvents> {
        self.strides
    }
}

/// Steps per minute, one value per stride of the final table
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CadenceSeries(Vec<f64>);

impl CadenceSeries {
    /// Cadence of every stride in `table`
    pub fn from_table(table: &StrideTable, sample_rate_hz: f64) -> Self {
        Self(table.iter().map(|s| s.cadence(sample_rate_hz)).collect())
    }

    /// Per-stride values
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no strides
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mean cadence, `None` for an empty series
    pub fn mean(&self) -> Option<f64> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.iter().sum::<f64>() / self.0.len() as f64)
        }
    }
}
