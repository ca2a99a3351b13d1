//! Signal primitives
//!
//! Everything the detectors need from a 1-D sample sequence: zero-phase
//! low-pass filtering, midswing peak extraction, zero-crossing search and
//! windowed extrema. All functions are pure and operate on slices.

pub mod crossings;
pub mod filter;
pub mod peaks;

pub use crossings::{first_crossing_in, last_crossing_in, zero_crossings, Polarity};
pub use filter::LowPassFilter;
pub use peaks::{detrend, PeakExtractor, PeakSequence};

/// Index of the smallest sample in `signal[start..=end]`, clipped to the
/// signal. The earliest index wins on ties. `None` for an empty window.
pub fn argmin_in(signal: &[f64], start: usize, end: usize) -> Option<usize> {
    extremum_in(signal, start, end, |candidate, best| candidate < best)
}

/// Index of the largest sample in `signal[start..=end]`, clipped to the
/// signal. The earliest index wins on ties.
pub fn argmax_in(signal: &[f64], start: usize, end: usize) -> Option<usize> {
    extremum_in(signal, start, end, |candidate, best| candidate > best)
}

fn extremum_in<F>(signal: &[f64], start: usize, end: usize, better: F) -> Option<usize>
where
    F: Fn(f64, f64) -> bool,
{
    let last = end.min(signal.len().checked_sub(1)?);
    if start > last {
        return None;
    }
    let mut best = start;
    for i in start + 1..=last {
        if better(signal[i], signal[best]) {
            best = i;
        }
    }
    Some(best)
}
