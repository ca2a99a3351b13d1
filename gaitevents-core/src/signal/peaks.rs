//! Midswing peak extraction
//!
//! Local maxima of the detrended, low-pass-filtered pitch angular velocity
//! that clear a height and a prominence threshold.
//!
//! Threshold semantics:
//! - boundary samples are never peaks
//! - a flat plateau reports its middle sample (left-middle for even widths)
//! - prominence is the peak value minus the higher of the two lowest points
//!   reached walking outward until a strictly higher sample or the boundary

use alloc::vec::Vec;

/// Ordered peak indices with their magnitudes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PeakSequence {
    indices: Vec<usize>,
    magnitudes: Vec<f64>,
}

impl PeakSequence {
    /// Build from parallel vectors, truncating to the shorter one
    pub fn new(mut indices: Vec<usize>, mut magnitudes: Vec<f64>) -> Self {
        let len = indices.len().min(magnitudes.len());
        indices.truncate(len);
        magnitudes.truncate(len);
        Self { indices, magnitudes }
    }

    /// Number of peaks
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when there are no peaks
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Sample indices
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Peak heights
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Index of peak `i`
    pub fn index(&self, i: usize) -> Option<usize> {
        self.indices.get(i).copied()
    }

    /// Magnitude of peak `i`
    pub fn magnitude(&self, i: usize) -> Option<f64> {
        self.magnitudes.get(i).copied()
    }

    /// First peak strictly after `sample`
    pub fn next_after(&self, sample: usize) -> Option<usize> {
        let pos = self.indices.partition_point(|&p| p <= sample);
        self.indices.get(pos).copied()
    }

    pub(crate) fn push(&mut self, index: usize, magnitude: f64) {
        self.indices.push(index);
        self.magnitudes.push(magnitude);
    }

    /// Copy without the first element
    pub(crate) fn without_first(&self) -> Self {
        Self {
            indices: self.indices.iter().skip(1).copied().collect(),
            magnitudes: self.magnitudes.iter().skip(1).copied().collect(),
        }
    }
}

/// Peak thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakExtractor {
    min_height: f64,
    min_prominence: f64,
}

impl PeakExtractor {
    /// Extractor with height and prominence thresholds (signal units)
    pub fn new(min_height: f64, min_prominence: f64) -> Self {
        Self { min_height, min_prominence }
    }

    /// Peaks of `signal` meeting both thresholds
    pub fn extract(&self, signal: &[f64]) -> PeakSequence {
        let mut peaks = PeakSequence::default();
        for index in local_maxima(signal) {
            let value = signal[index];
            if value < self.min_height {
                continue;
            }
            if prominence(signal, index) < self.min_prominence {
                continue;
            }
            peaks.push(index, value);
        }
        peaks
    }
}

/// Copy of `signal` with its mean removed
pub fn detrend(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let mean = signal.iter().sum::<f64>() / signal.len() as f64;
    signal.iter().map(|v| v - mean).collect()
}

/// Interior local maxima, plateaus reduced to their middle sample
fn local_maxima(signal: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    let n = signal.len();
    if n < 3 {
        return maxima;
    }

    let mut i = 1;
    while i < n - 1 {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < n - 1 && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    maxima
}

fn prominence(signal: &[f64], peak: usize) -> f64 {
    let height = signal[peak];

    let mut left_min = height;
    for &v in signal[..peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &signal[peak + 1..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}
