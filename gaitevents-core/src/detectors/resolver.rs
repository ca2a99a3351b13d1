//! Double-step resolution
//!
//! Peak extraction occasionally reports two consecutive midswing peaks on
//! the same foot, either a genuine double step or a spurious bump. Gait
//! alternates feet, so the chronological merge of both peak sequences must
//! alternate too. The resolver walks both sequences with a two-cursor merge
//! and, whenever the next peak belongs to the same foot as the last kept
//! one, keeps the larger of the two.
//!
//! The inputs are never modified; two new sequences are produced.

use alloc::vec::Vec;

use crate::{errors::Foot, signal::PeakSequence};

/// Peaks after resolution
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedPeaks {
    /// Right-foot midswing peaks
    pub right: PeakSequence,
    /// Left-foot midswing peaks
    pub left: PeakSequence,
    /// Number of peaks removed across both feet
    pub dropped: usize,
    /// Mean magnitude of every detected peak, pruned ones included
    pub detected_mean: Option<f64>,
}

impl ResolvedPeaks {
    /// Sequence for one foot
    pub fn foot(&self, foot: Foot) -> &PeakSequence {
        match foot {
            Foot::Right => &self.right,
            Foot::Left => &self.left,
        }
    }

    /// Foot and magnitude of the chronologically first peak
    pub fn earliest(&self) -> Option<(Foot, f64)> {
        let right = self.right.index(0).zip(self.right.magnitude(0));
        let left = self.left.index(0).zip(self.left.magnitude(0));
        match (right, left) {
            (Some((r, rm)), Some((l, _))) if r <= l => Some((Foot::Right, rm)),
            (Some(_), Some((_, lm))) => Some((Foot::Left, lm)),
            (Some((_, rm)), None) => Some((Foot::Right, rm)),
            (None, Some((_, lm))) => Some((Foot::Left, lm)),
            (None, None) => None,
        }
    }
}

/// Mean magnitude over both feet, `None` without peaks
fn mean_magnitude(right: &PeakSequence, left: &PeakSequence) -> Option<f64> {
    let count = right.len() + left.len();
    if count == 0 {
        return None;
    }
    let sum: f64 = right.magnitudes().iter().chain(left.magnitudes()).sum();
    Some(sum / count as f64)
}

/// Read positions into the right and left sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeCursor {
    /// Next unread right peak
    pub right: usize,
    /// Next unread left peak
    pub left: usize,
}

impl MergeCursor {
    /// Take the chronologically next peak, right first on equal indices
    fn advance(&mut self, right: &PeakSequence, left: &PeakSequence) -> Option<MergedPeak> {
        let r = right.index(self.right);
        let l = left.index(self.left);
        let foot = match (r, l) {
            (Some(r), Some(l)) if r <= l => Foot::Right,
            (Some(_), Some(_)) => Foot::Left,
            (Some(_), None) => Foot::Right,
            (None, Some(_)) => Foot::Left,
            (None, None) => return None,
        };

        let (sequence, position) = match foot {
            Foot::Right => (right, &mut self.right),
            Foot::Left => (left, &mut self.left),
        };
        let peak = MergedPeak {
            foot,
            index: sequence.index(*position)?,
            magnitude: sequence.magnitude(*position)?,
        };
        *position += 1;
        Some(peak)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MergedPeak {
    foot: Foot,
    index: usize,
    magnitude: f64,
}

/// Enforces strict alternation of midswing peaks between feet
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleStepResolver;

impl DoubleStepResolver {
    /// Create a resolver
    pub fn new() -> Self {
        Self
    }

    /// Prune both sequences so their merge alternates feet
    pub fn resolve(&self, right: &PeakSequence, left: &PeakSequence) -> ResolvedPeaks {
        let mut cursor = MergeCursor::default();
        let mut kept: Vec<MergedPeak> = Vec::with_capacity(right.len() + left.len());
        let mut dropped = 0;

        // Runs until both cursors are exhausted, so a trailing same-foot run
        // is pruned like any other and the whole output alternates.
        while let Some(peak) = cursor.advance(right, left) {
            match kept.last_mut() {
                Some(last) if last.foot == peak.foot => {
                    dropped += 1;
                    if peak.magnitude > last.magnitude {
                        *last = peak;
                    }
                }
                _ => kept.push(peak),
            }
        }

        if dropped > 0 {
            log_debug!("double-step resolution dropped {} peaks", dropped);
        }

        let mut resolved = ResolvedPeaks {
            dropped,
            detected_mean: mean_magnitude(right, left),
            ..ResolvedPeaks::default()
        };
        for peak in kept {
            match peak.foot {
                Foot::Right => resolved.right.push(peak.index, peak.magnitude),
                Foot::Left => resolved.left.push(peak.index, peak.magnitude),
            }
        }
        resolved
    }
}
