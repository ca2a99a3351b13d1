//! Zero-phase Butterworth low-pass filter
//!
//! The filter is designed as a cascade of second-order sections (plus one
//! first-order section for odd orders) using the bilinear transform with
//! frequency pre-warping, then run forward and backward so the output has
//! no phase lag. Peaks and minima therefore stay where they were in the
//! unfiltered signal.
//!
//! ## Edge handling
//!
//! Both passes start from the steady state of the first input value and
//! the signal is extended at each end by odd reflection, so the transient
//! of the recursion lands in padding that is discarded afterwards.

use alloc::vec::Vec;
use core::f64::consts::PI;

use crate::{
    constants::filtering::FILTFILT_PAD_FACTOR,
    errors::{GaitError, GaitResult},
};

/// Coefficients of one section, normalized so `a0 = 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    /// Numerator [b0, b1, b2]
    pub b: [f64; 3],
    /// Denominator [a1, a2]
    pub a: [f64; 2],
}

impl Section {
    /// Second-order low-pass section with quality factor `q`
    fn lowpass(k: f64, q: f64) -> Self {
        let k2 = k * k;
        let norm = 1.0 / (1.0 + k / q + k2);
        let b0 = k2 * norm;
        Self {
            b: [b0, 2.0 * b0, b0],
            a: [2.0 * (k2 - 1.0) * norm, (1.0 - k / q + k2) * norm],
        }
    }

    /// First-order low-pass section
    fn first_order(k: f64) -> Self {
        let norm = 1.0 / (1.0 + k);
        Self {
            b: [k * norm, k * norm, 0.0],
            a: [(k - 1.0) * norm, 0.0],
        }
    }

    /// Transposed direct form II state for a constant input `value`
    fn steady_state(&self, value: f64) -> [f64; 2] {
        let z2 = (self.b[2] - self.a[1]) * value;
        let z1 = (self.b[1] - self.a[0]) * value + z2;
        [z1, z2]
    }

    /// Filter `data` in place starting from steady state at `data[0]`
    fn run(&self, data: &mut [f64]) {
        let Some(&first) = data.first() else {
            return;
        };
        let [mut z1, mut z2] = self.steady_state(first);
        for x in data.iter_mut() {
            let input = *x;
            let output = self.b[0] * input + z1;
            z1 = self.b[1] * input - self.a[0] * output + z2;
            z2 = self.b[2] * input - self.a[1] * output;
            *x = output;
        }
    }
}

/// Butterworth low-pass designed for one sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct LowPassFilter {
    sections: Vec<Section>,
    order: usize,
}

impl LowPassFilter {
    /// Design an `order`-pole low-pass with cutoff `cutoff_hz`
    pub fn butterworth(order: usize, cutoff_hz: f64, sample_rate_hz: f64) -> GaitResult<Self> {
        if order == 0 {
            return Err(GaitError::Configuration {
                reason: "low-pass order must be at least 1",
            });
        }
        if !(cutoff_hz > 0.0 && cutoff_hz < sample_rate_hz / 2.0) {
            return Err(GaitError::Configuration {
                reason: "low-pass cutoff must lie between 0 and the Nyquist frequency",
            });
        }

        let k = libm::tan(PI * cutoff_hz / sample_rate_hz);
        let mut sections = Vec::with_capacity(order / 2 + 1);
        for i in 0..order / 2 {
            let theta = PI * (2 * i + 1) as f64 / (2 * order) as f64;
            let q = 1.0 / (2.0 * libm::cos(theta));
            sections.push(Section::lowpass(k, q));
        }
        if order % 2 == 1 {
            sections.push(Section::first_order(k));
        }

        Ok(Self { sections, order })
    }

    /// Filter order
    pub fn order(&self) -> usize {
        self.order
    }

    /// Cascade sections
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Fewest samples the forward-backward pass accepts
    ///
    /// Shorter signals than the nominal padding still filter; the reflected
    /// padding shrinks to `n - 1` samples.
    pub fn min_len(&self) -> usize {
        2
    }

    /// Causal single pass over `data`
    pub fn apply(&self, data: &mut [f64]) {
        for section in &self.sections {
            section.run(data);
        }
    }

    /// Zero-phase forward-backward pass
    pub fn filtfilt(&self, signal: &[f64]) -> GaitResult<Vec<f64>> {
        let n = signal.len();
        if n < self.min_len() {
            return Err(GaitError::InsufficientData {
                required: self.min_len(),
                available: n,
            });
        }

        let pad = (FILTFILT_PAD_FACTOR * (self.order + 1)).min(n - 1);
        let mut extended = Vec::with_capacity(n + 2 * pad);

        // Odd reflection about the end samples
        let first = signal[0];
        let last = signal[n - 1];
        extended.extend((1..=pad).rev().map(|i| 2.0 * first - signal[i]));
        extended.extend_from_slice(signal);
        extended.extend((1..=pad).map(|i| 2.0 * last - signal[n - 1 - i]));

        self.apply(&mut extended);
        extended.reverse();
        self.apply(&mut extended);
        extended.reverse();

        Ok(extended[pad..pad + n].to_vec())
    }
}
