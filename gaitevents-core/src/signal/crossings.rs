//! Zero-crossing search
//!
//! A sample is negative when it is `< 0`, otherwise non-negative. A
//! crossing lies between samples `i` and `i + 1` whose signs differ; the
//! reported index is whichever of the two is closer to zero (the earlier
//! one on ties).

use alloc::vec::Vec;

/// Direction of the sign change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Negative to non-negative
    Up,
    /// Non-negative to negative
    Down,
    /// Either direction, with single-sample glitches removed
    All,
}

/// Sample indices of the requested crossings, in order.
///
/// The result is empty when the signal never changes sign in the requested
/// direction; use `first()` / `last()` rather than indexing.
pub fn zero_crossings(signal: &[f64], polarity: Polarity) -> Vec<usize> {
    let mut brackets: Vec<(usize, Polarity)> = Vec::new();
    for (i, pair) in signal.windows(2).enumerate() {
        let before = pair[0] < 0.0;
        let after = pair[1] < 0.0;
        let direction = match (before, after) {
            (true, false) => Polarity::Up,
            (false, true) => Polarity::Down,
            _ => continue,
        };
        if polarity == Polarity::All || polarity == direction {
            brackets.push((i, direction));
        }
    }

    if polarity == Polarity::All {
        brackets = drop_glitches(&brackets);
    }

    brackets
        .into_iter()
        .map(|(i, _)| nearest_to_zero(signal, i))
        .collect()
}

/// First crossing at or after `start` within `signal[start..end]`
pub fn first_crossing_in(signal: &[f64], start: usize, end: usize, polarity: Polarity) -> Option<usize> {
    let window = signal.get(start..end.min(signal.len()))?;
    zero_crossings(window, polarity).first().map(|&i| start + i)
}

/// Last crossing within `signal[start..end]`
pub fn last_crossing_in(signal: &[f64], start: usize, end: usize, polarity: Polarity) -> Option<usize> {
    let window = signal.get(start..end.min(signal.len()))?;
    zero_crossings(window, polarity).last().map(|&i| start + i)
}

/// Remove up/down pairs whose brackets are adjacent
fn drop_glitches(brackets: &[(usize, Polarity)]) -> Vec<(usize, Polarity)> {
    let mut kept = Vec::with_capacity(brackets.len());
    let mut i = 0;
    while i < brackets.len() {
        if let Some(&(next, next_direction)) = brackets.get(i + 1) {
            let (current, direction) = brackets[i];
            if next == current + 1 && next_direction != direction {
                i += 2;
                continue;
            }
        }
        kept.push(brackets[i]);
        i += 1;
    }
    kept
}

fn nearest_to_zero(signal: &[f64], i: usize) -> usize {
    if libm::fabs(signal[i]) <= libm::fabs(signal[i + 1]) {
        i
    } else {
        i + 1
    }
}
