//! Statistical stride outlier rejection
//!
//! A stride is rejected when a duration exceeds `(1 + p/100) × mean` or
//! falls below `(p/100) × mean`. With the default `p = 50` that keeps
//! durations between half and one and a half times the mean.
//!
//! Means are taken once over the table as it enters the filter, so the
//! result does not depend on stride order.

use alloc::vec::Vec;

use crate::{config::BadStrideMode, traits::StrideFilter, types::StrideTable};

/// Removes strides whose durations deviate from the table mean
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadStrideFilter {
    mode: BadStrideMode,
    cutoff_pct: f64,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    fn around(mean: f64, cutoff_pct: f64) -> Self {
        let ratio = cutoff_pct / 100.0;
        Self {
            lower: ratio * mean,
            upper: (1.0 + ratio) * mean,
        }
    }

    fn contains(&self, duration: usize) -> bool {
        let duration = duration as f64;
        duration >= self.lower && duration <= self.upper
    }
}

impl BadStrideFilter {
    /// Filter in `mode` with a deviation of `cutoff_pct` percent
    pub fn new(mode: BadStrideMode, cutoff_pct: f64) -> Self {
        Self { mode, cutoff_pct }
    }

    /// Comparison mode
    pub fn mode(&self) -> BadStrideMode {
        self.mode
    }

    fn filter_stride_length(&self, table: &mut StrideTable) -> usize {
        let mean = table.iter().map(|s| s.duration() as f64).sum::<f64>() / table.len() as f64;
        let bounds = Bounds::around(mean, self.cutoff_pct);
        table.retain(|s| bounds.contains(s.duration()))
    }

    fn filter_gait_events(&self, table: &mut StrideTable) -> usize {
        let phases = table.row_count() - 1;
        let mut sums: Vec<f64> = alloc::vec![0.0; phases];
        for stride in table.iter() {
            for (sum, duration) in sums.iter_mut().zip(stride.phase_durations()) {
                *sum += duration as f64;
            }
        }
        let count = table.len() as f64;
        let bounds: Vec<Bounds> = sums
            .into_iter()
            .map(|sum| Bounds::around(sum / count, self.cutoff_pct))
            .collect();

        table.retain(|s| {
            s.phase_durations()
                .iter()
                .zip(&bounds)
                .all(|(&duration, b)| b.contains(duration))
        })
    }
}

impl StrideFilter for BadStrideFilter {
    fn name(&self) -> &'static str {
        "bad-stride"
    }

    fn apply(&self, table: &mut StrideTable) -> usize {
        if table.is_empty() {
            return 0;
        }
        match self.mode {
            BadStrideMode::StrideLength => self.filter_stride_length(table),
            BadStrideMode::GaitEvents => self.filter_gait_events(table),
            BadStrideMode::None => 0,
        }
    }
}
