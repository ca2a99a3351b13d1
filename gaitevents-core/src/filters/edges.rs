//! Edge-buffer trimming
//!
//! Events near either end of a recording are unreliable (filter transients,
//! gait initiation and termination). Any stride with an index below
//! `buffer` or above `len - buffer` is dropped.

use crate::{constants::time::seconds_to_samples, traits::StrideFilter, types::StrideTable};

/// Drops strides too close to the recording edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeBufferFilter {
    buffer: usize,
    recording_len: usize,
}

impl EdgeBufferFilter {
    /// Filter for a recording of `recording_len` samples
    pub fn new(buffer_samples: usize, recording_len: usize) -> Self {
        Self {
            buffer: buffer_samples,
            recording_len,
        }
    }

    /// Buffer given in seconds, rounded to whole samples
    pub fn from_seconds(buffer_s: f64, sample_rate_hz: f64, recording_len: usize) -> Self {
        Self::new(seconds_to_samples(buffer_s, sample_rate_hz), recording_len)
    }

    /// Buffer in samples
    pub fn buffer(&self) -> usize {
        self.buffer
    }

    /// Allowed index range, `None` when the buffers overlap
    pub fn bounds(&self) -> Option<(usize, usize)> {
        let upper = self.recording_len.checked_sub(self.buffer)?;
        (self.buffer <= upper).then_some((self.buffer, upper))
    }
}

impl StrideFilter for EdgeBufferFilter {
    fn name(&self) -> &'static str {
        "edge-buffer"
    }

    fn apply(&self, table: &mut StrideTable) -> usize {
        match self.bounds() {
            Some((lower, upper)) => table.retain(|s| s.first() >= lower && s.last() <= upper),
            None => table.retain(|_| false),
        }
    }
}
