//! Basic Gait Event Detection Example
//!
//! Synthesizes a short walking bout for both feet, runs the default
//! pipeline (GYmin heel strikes, GYzero toe offs) and prints the stride
//! table, cadence and detection report.
//!
//! ## What You'll Learn
//!
//! - Building a `DualFootRecording` from `n×6` rows
//! - Configuring and running `StrideDetectionPipeline`
//! - Reading the stride table and the detection report
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_detection
//! ```

use std::f64::consts::PI;

use gaitevents_core::{
    DetectionMethod, DualFootRecording, GaitError, PipelineConfig, StrideDetectionPipeline,
};

const SAMPLE_RATE_HZ: f64 = 100.0;
const STRIDES: usize = 15;

/// Pitch rate over one 100-sample stride: stance dip, push-off, swing
fn pitch_rate(phase: f64) -> f64 {
    let knots = [(0.0, -120.0), (25.0, -5.0), (55.0, -150.0), (80.0, 350.0), (100.0, -120.0)];
    let phase = phase.rem_euclid(100.0);
    for pair in knots.windows(2) {
        let ((a, va), (b, vb)) = (pair[0], pair[1]);
        if phase <= b {
            let s = (phase - a) / (b - a);
            return va + (vb - va) * (1.0 - (PI * s).cos()) / 2.0;
        }
    }
    knots[0].1
}

fn foot_rows(lag: f64) -> Vec<[f64; 6]> {
    (0..STRIDES * 100)
        .map(|i| [0.0, 0.0, 9.81, 0.0, pitch_rate(i as f64 - lag), 0.0])
        .collect()
}

fn main() -> Result<(), GaitError> {
    println!("Gait Event Detection Example");
    println!("============================\n");

    let recording = DualFootRecording::from_rows(&foot_rows(0.0), &foot_rows(50.0))?;
    println!(
        "Recording: {} samples per foot ({:.1} s at {} Hz)\n",
        recording.len(),
        recording.len() as f64 / SAMPLE_RATE_HZ,
        SAMPLE_RATE_HZ
    );

    let config = PipelineConfig::default()
        .with_sample_rate(SAMPLE_RATE_HZ)
        .with_heel_strike_method(DetectionMethod::GyroMin)
        .with_toe_off_method(Some(DetectionMethod::GyroZero));
    let pipeline = StrideDetectionPipeline::new(config)?;
    let output = pipeline.run(&recording)?;

    println!("  {:>5} {:>5} {:>5} {:>5} {:>5} {:>8}", "RHS", "LTO", "LHS", "RTO", "end", "cadence");
    for (stride, cadence) in output.table.iter().zip(output.cadence.values()) {
        println!(
            "  {:>5} {:>5} {:>5} {:>5} {:>5} {:>8.1}",
            stride.right_heel_strike,
            stride.left_toe_off.unwrap_or_default(),
            stride.left_heel_strike,
            stride.right_toe_off.unwrap_or_default(),
            stride.stride_end,
            cadence
        );
    }

    let report = output.report;
    println!("\nDetection report:");
    println!("  Peaks (right/left):      {}/{}", report.right_peaks, report.left_peaks);
    println!("  Double steps dropped:    {}", report.dropped_double_steps);
    println!("  Heel-strike failures:    {}", report.heel_strike_failures);
    println!("  Toe-off failures:        {}", report.toe_off_failures);
    println!("  Outliers removed:        {}", report.outliers_removed);
    println!("  Trimmed at the edges:    {}", report.edge_trimmed);
    if let Some(mean) = output.mean_cadence() {
        println!("  Mean cadence:            {:.1} steps/min", mean);
    }

    Ok(())
}
