//! Error Handling Example
//!
//! Walks through the ways a run can be rejected and how per-stride
//! failures are reported instead of raised.
//!
//! ## Error Categories
//!
//! 1. **Configuration errors** - raised by `StrideDetectionPipeline::new`
//! 2. **Input errors** - unequal feet, non-finite samples, too-short data
//! 3. **Data-quality errors** - a foot without enough midswing peaks
//! 4. **Per-stride failures** - counted in the report, never fatal
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_error_handling
//! ```

use gaitevents_core::{
    DualFootRecording, EventSet, FootRecording, GaitError, PipelineConfig, StrideDetectionPipeline,
};

fn describe(error: &GaitError) -> &'static str {
    match error {
        GaitError::Configuration { .. } => "fix the configuration",
        GaitError::LengthMismatch { .. } => "resynchronize the recordings",
        GaitError::InvalidValue => "clean NaN or infinite samples",
        GaitError::InsufficientData { .. } => "record for longer",
        GaitError::InsufficientPeaks { .. } => "check sensor placement and the pitch axis",
    }
}

fn main() {
    println!("Gait Event Detection Error Handling");
    println!("===================================\n");

    println!("1. Configuration errors:");
    let configs = [
        ("HS&TO without a toe-off method", PipelineConfig::default()
            .with_events(EventSet::HeelStrikesAndToeOffs)
            .with_toe_off_method(None)),
        ("cutoff above Nyquist", PipelineConfig::default().with_sample_rate(30.0)),
        ("negative buffer", PipelineConfig::default().with_buffer_seconds(-1.0)),
    ];
    for (label, config) in configs {
        match StrideDetectionPipeline::new(config) {
            Ok(_) => println!("  {}: accepted", label),
            Err(e) => println!("  {}: {} ({})", label, e, describe(&e)),
        }
    }

    println!("\n2. Method names:");
    for name in ["GYzero", "GYmin", "NetAcc", "gyro-zero"] {
        match name.parse::<gaitevents_core::DetectionMethod>() {
            Ok(method) => println!("  {:>10} -> {:?}", name, method),
            Err(e) => println!("  {:>10} -> {}", name, e),
        }
    }

    println!("\n3. Input errors:");
    let still = [[0.0, 0.0, 9.81, 0.0, 0.0, 0.0]; 600];
    if let Err(e) = DualFootRecording::from_rows(&still, &still[..599]) {
        println!("  {} ({})", e, describe(&e));
    }

    let pipeline = match StrideDetectionPipeline::new(PipelineConfig::default()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            println!("  default configuration rejected: {}", e);
            return;
        }
    };

    let mut corrupted = still;
    corrupted[300][4] = f64::NAN;
    let recording = DualFootRecording::new(
        FootRecording::from_rows(&corrupted),
        FootRecording::from_rows(&still),
    );
    if let Ok(recording) = recording {
        if let Err(e) = pipeline.run(&recording) {
            println!("  {} ({})", e, describe(&e));
        }
    }

    println!("\n4. Data-quality errors:");
    if let Ok(recording) = DualFootRecording::from_rows(&still, &still) {
        match pipeline.run(&recording) {
            Ok(output) => println!("  unexpectedly found {} strides", output.table.len()),
            Err(e) => println!("  {} ({})", e, describe(&e)),
        }
    }
}
