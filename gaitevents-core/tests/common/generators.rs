//! Synthetic dual-foot gait generator
//!
//! Each foot follows the same periodic pitch-rate profile, built from
//! cosine segments between knots so every event sits at a known sample:
//!
//! | Phase | Pitch rate (deg/s) | Event |
//! |---|---|---|
//! | 0 | -120 | heel strike (GYmin) |
//! | 25 | -5 | foot flat |
//! | 55 | -150 | push-off minimum |
//! | ~64.2 | 0 | toe off (GYzero) |
//! | 80 | +350 | midswing |
//! | ~93.3 | 0 | heel strike (GYzero) |
//!
//! One stride is 100 samples at 100 Hz (1 s, 120 steps/min). The
//! acceleration norm dips just before heel strike and spikes at push-off.

#![allow(dead_code)]

use std::f64::consts::PI;

use gaitevents_core::{DualFootRecording, FootRecording};

/// Sample rate of generated recordings
pub const SAMPLE_RATE_HZ: f64 = 100.0;

/// Samples per stride
pub const STRIDE_SAMPLES: usize = 100;

/// Phase offset of the second foot
pub const HALF_STRIDE: usize = STRIDE_SAMPLES / 2;

/// Stride phase of the acceleration-norm minimum (NetAcc heel strike)
pub const HEEL_STRIKE_DIP_PHASE: f64 = 97.0;

/// Stride phase of the acceleration-norm peak (NetAcc toe off)
pub const PUSH_OFF_SPIKE_PHASE: f64 = 58.0;

const PITCH_KNOTS: [(f64, f64); 5] = [
    (0.0, -120.0),
    (25.0, -5.0),
    (55.0, -150.0),
    (80.0, 350.0),
    (100.0, -120.0),
];

const GRAVITY: f64 = 9.81;

/// Pitch angular velocity at a stride phase (samples, wraps every stride)
pub fn pitch_at(phase: f64) -> f64 {
    let phase = phase.rem_euclid(STRIDE_SAMPLES as f64);
    for pair in PITCH_KNOTS.windows(2) {
        let (a, va) = pair[0];
        let (b, vb) = pair[1];
        if phase <= b {
            let s = (phase - a) / (b - a);
            return va + (vb - va) * (1.0 - (PI * s).cos()) / 2.0;
        }
    }
    PITCH_KNOTS[0].1
}

/// Vertical acceleration at a stride phase
pub fn accel_at(phase: f64) -> f64 {
    let dip = circular_distance(phase, HEEL_STRIKE_DIP_PHASE) / 1.5;
    let spike = circular_distance(phase, PUSH_OFF_SPIKE_PHASE) / 2.0;
    GRAVITY - 4.0 * (-dip * dip).exp() + 8.0 * (-spike * spike).exp()
}

fn circular_distance(phase: f64, center: f64) -> f64 {
    let period = STRIDE_SAMPLES as f64;
    (phase - center + period / 2.0).rem_euclid(period) - period / 2.0
}

/// Builder for synthetic recordings
#[derive(Debug, Clone)]
pub struct GaitGenerator {
    strides: usize,
    right_lag: usize,
    left_lag: usize,
    jitter_dps: f64,
    first_swing_scale: f64,
    right_bumps: Vec<(usize, f64)>,
}

impl GaitGenerator {
    /// `strides` full cycles, left foot half a stride behind the right
    /// pattern so the recording opens with a left swing
    pub fn new(strides: usize) -> Self {
        Self {
            strides,
            right_lag: 0,
            left_lag: HALF_STRIDE,
            jitter_dps: 0.0,
            first_swing_scale: 1.0,
            right_bumps: Vec::new(),
        }
    }

    /// Open with a right swing instead
    pub fn right_leading(mut self) -> Self {
        self.right_lag = HALF_STRIDE;
        self.left_lag = 0;
        self
    }

    /// Add high-frequency jitter of this amplitude to both pitch channels
    pub fn with_jitter(mut self, amplitude_dps: f64) -> Self {
        self.jitter_dps = amplitude_dps;
        self
    }

    /// Scale the positive part of the opening swing
    pub fn with_weak_first_swing(mut self, scale: f64) -> Self {
        self.first_swing_scale = scale;
        self
    }

    /// Add a short positive bump to the right pitch channel
    pub fn with_right_bump(mut self, center: usize, amplitude_dps: f64) -> Self {
        self.right_bumps.push((center, amplitude_dps));
        self
    }

    /// Samples per foot
    pub fn len(&self) -> usize {
        self.strides * STRIDE_SAMPLES
    }

    /// Right-foot `n×6` rows
    pub fn right_rows(&self) -> Vec<[f64; 6]> {
        (0..self.len())
            .map(|i| {
                let mut pitch = self.swing_pitch(i, self.right_lag);
                for &(center, amplitude) in &self.right_bumps {
                    let d = (i as f64 - center as f64) / 3.0;
                    pitch += amplitude * (-d * d).exp();
                }
                pitch += self.jitter_dps * (2.9 * i as f64).sin();
                row(accel_at(i as f64 - self.right_lag as f64), pitch)
            })
            .collect()
    }

    /// Left-foot `n×6` rows
    pub fn left_rows(&self) -> Vec<[f64; 6]> {
        (0..self.len())
            .map(|i| {
                let pitch = self.swing_pitch(i, self.left_lag) + self.jitter_dps * (2.9 * i as f64 + 1.0).sin();
                row(accel_at(i as f64 - self.left_lag as f64), pitch)
            })
            .collect()
    }

    /// Both feet as a pipeline input
    pub fn recording(&self) -> DualFootRecording {
        DualFootRecording::new(
            FootRecording::from_rows(&self.right_rows()),
            FootRecording::from_rows(&self.left_rows()),
        )
        .expect("generated feet have equal length")
    }

    fn swing_pitch(&self, i: usize, lag: usize) -> f64 {
        let pitch = pitch_at(i as f64 - lag as f64);
        if i < lag && pitch > 0.0 {
            pitch * self.first_swing_scale
        } else {
            pitch
        }
    }
}

fn row(accel_z: f64, pitch: f64) -> [f64; 6] {
    [0.0, 0.0, accel_z, 0.0, pitch, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_hits_knots() {
        assert_eq!(pitch_at(0.0), -120.0);
        assert_eq!(pitch_at(80.0), 350.0);
        assert_eq!(pitch_at(180.0), 350.0);
        assert!(pitch_at(64.0) < 0.0 && pitch_at(65.0) > 0.0);
        assert!(pitch_at(93.0) > 0.0 && pitch_at(94.0) < 0.0);
    }
}
