//! Integration tests for the stride detection pipeline
//!
//! Runs the full pipeline on synthetic gait with analytically known event
//! locations and checks the table, the cadence and the detection report.

mod common;

use gaitevents_core::{
    BadStrideMode, DetectionMethod, EventSet, Foot, FootRecording, DualFootRecording, GaitError,
    PipelineConfig, StrideDetectionPipeline, StrideLayout,
};

use common::{
    assert_near, assert_well_formed,
    generators::{GaitGenerator, SAMPLE_RATE_HZ},
};

fn pipeline(config: PipelineConfig) -> StrideDetectionPipeline {
    StrideDetectionPipeline::new(config.with_sample_rate(SAMPLE_RATE_HZ)).expect("valid config")
}

#[test]
fn gymin_recovers_heel_strikes() {
    let recording = GaitGenerator::new(12).recording();
    let output = pipeline(PipelineConfig::default()).run(&recording).expect("walking data");

    assert_eq!(output.table.layout(), StrideLayout::HeelStrikesAndToeOffs);
    assert_eq!(output.table.len(), 8);
    assert_well_formed(&output.table);

    for (k, stride) in output.table.iter().enumerate() {
        let start = 200 + 100 * k;
        assert_near(stride.right_heel_strike, start, 2);
        assert_near(stride.left_heel_strike, start + 50, 2);
        assert_near(stride.stride_end, start + 99, 2);
    }
}

#[test]
fn gyzero_toe_offs_sit_on_push_off_crossing() {
    let recording = GaitGenerator::new(12).recording();
    let output = pipeline(PipelineConfig::default()).run(&recording).expect("walking data");

    for stride in output.table.iter() {
        let rhs = stride.right_heel_strike;
        assert_near(stride.left_toe_off.expect("toe offs requested"), rhs + 14, 2);
        assert_near(stride.right_toe_off.expect("toe offs requested"), rhs + 64, 2);
    }
}

#[test]
fn report_counts_every_stage() {
    let recording = GaitGenerator::new(12).recording();
    let output = pipeline(PipelineConfig::default()).run(&recording).expect("walking data");
    let report = output.report;

    assert_eq!(report.right_peaks, 12);
    assert_eq!(report.left_peaks, 12);
    assert_eq!(report.dropped_double_steps, 0);
    assert!(!report.discarded_leading_peak);
    // The last right peak has no later left peak to bound its GYmin search
    assert_eq!(report.heel_strike_failures, 1);
    assert_eq!(report.toe_off_failures, 0);
    assert_eq!(report.outliers_removed, 0);
    assert_eq!(output.removed, 0);
    assert_eq!(report.edge_trimmed, 2);
}

#[test]
fn cadence_matches_stride_rate() {
    let recording = GaitGenerator::new(12).recording();
    let output = pipeline(PipelineConfig::default()).run(&recording).expect("walking data");

    assert_eq!(output.cadence.len(), output.table.len());
    for value in output.cadence.values() {
        assert!((value - 120.0).abs() < 3.0, "cadence {}", value);
    }
    let mean = output.mean_cadence().expect("strides survived");
    assert!((mean - 120.0).abs() < 1.0);
}

#[test]
fn edge_buffer_bounds_every_index() {
    let generator = GaitGenerator::new(12);
    let n = generator.len();
    let output = pipeline(PipelineConfig::default().with_buffer_seconds(2.0))
        .run(&generator.recording())
        .expect("walking data");

    for stride in output.table.iter() {
        for &index in stride.indices().iter() {
            assert!(index >= 200 && index <= n - 200, "index {} inside buffer", index);
        }
    }
}

#[test]
fn zero_buffer_keeps_edge_strides() {
    let output = pipeline(PipelineConfig::default().with_buffer_seconds(0.0))
        .run(&GaitGenerator::new(12).recording())
        .expect("walking data");
    assert_eq!(output.table.len(), 10);
    assert_eq!(output.report.edge_trimmed, 0);
    assert_near(output.table.strides()[0].right_heel_strike, 100, 2);
}

#[test]
fn gyzero_heel_strikes_follow_midswing() {
    let config = PipelineConfig::default().with_heel_strike_method(DetectionMethod::GyroZero);
    let output = pipeline(config).run(&GaitGenerator::new(12).recording()).expect("walking data");

    assert_well_formed(&output.table);
    assert_eq!(output.report.heel_strike_failures, 0);
    assert_eq!(output.table.len(), 7);
    for (k, stride) in output.table.iter().enumerate() {
        assert_near(stride.right_heel_strike, 293 + 100 * k, 2);
        assert_near(stride.left_heel_strike, 343 + 100 * k, 2);
    }
}

#[test]
fn gyzero_heel_strike_reads_unfiltered_pitch() {
    let generator = GaitGenerator::new(12);
    let mut right = generator.right_rows();
    // One-sample dropout that the low-pass filter smooths away
    right[289][4] = -40.0;
    let recording = DualFootRecording::from_rows(&right, &generator.left_rows()).expect("equal lengths");

    let config = PipelineConfig::default().with_heel_strike_method(DetectionMethod::GyroZero);
    let output = pipeline(config).run(&recording).expect("walking data");
    assert_eq!(output.table.strides()[0].right_heel_strike, 289);
    assert_near(output.table.strides()[1].right_heel_strike, 393, 2);
}

#[test]
fn netacc_uses_acceleration_dip_and_spike() {
    let config = PipelineConfig::default()
        .with_heel_strike_method(DetectionMethod::NetAcc)
        .with_toe_off_method(Some(DetectionMethod::NetAcc));
    let output = pipeline(config).run(&GaitGenerator::new(12).recording()).expect("walking data");

    assert_well_formed(&output.table);
    assert_eq!(output.table.len(), 7);
    for stride in output.table.iter() {
        let rhs = stride.right_heel_strike;
        assert_eq!(rhs % 100, 97);
        assert_eq!(stride.left_heel_strike, rhs + 50);
        assert_eq!(stride.left_toe_off, Some(rhs + 11));
        assert_eq!(stride.right_toe_off, Some(rhs + 61));
    }
}

#[test]
fn gymin_toe_offs_at_push_off_minimum() {
    let config = PipelineConfig::default().with_toe_off_method(Some(DetectionMethod::GyroMin));
    let output = pipeline(config).run(&GaitGenerator::new(12).recording()).expect("walking data");

    for stride in output.table.iter() {
        let rhs = stride.right_heel_strike;
        assert_near(stride.left_toe_off.expect("toe offs requested"), rhs + 5, 1);
        assert_near(stride.right_toe_off.expect("toe offs requested"), rhs + 55, 1);
    }
}

#[test]
fn heel_strikes_only_layout() {
    let config = PipelineConfig::default().with_events(EventSet::HeelStrikes);
    let output = pipeline(config).run(&GaitGenerator::new(12).recording()).expect("walking data");

    assert_eq!(output.table.row_count(), 3);
    assert_eq!(output.table.len(), 8);
    assert!(output.table.iter().all(|s| s.left_toe_off.is_none() && s.right_toe_off.is_none()));

    let rows = output.table.rows();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.len() == 8));
}

#[test]
fn right_leading_recording_needs_no_rotation() {
    let recording = GaitGenerator::new(12).right_leading().recording();
    let output = pipeline(PipelineConfig::default().with_buffer_seconds(0.0))
        .run(&recording)
        .expect("walking data");

    assert_well_formed(&output.table);
    assert_eq!(output.table.len(), 11);
    assert_eq!(output.report.heel_strike_failures, 0);
    assert_near(output.table.strides()[0].right_heel_strike, 50, 2);
    assert_near(output.table.strides()[0].left_heel_strike, 100, 2);
}

#[test]
fn jitter_is_filtered_out() {
    let recording = GaitGenerator::new(12).with_jitter(15.0).recording();
    let output = pipeline(PipelineConfig::default()).run(&recording).expect("walking data");

    assert_eq!(output.table.len(), 8);
    for (k, stride) in output.table.iter().enumerate() {
        assert_near(stride.right_heel_strike, 200 + 100 * k, 2);
    }
}

#[test]
fn spurious_stance_peak_is_resolved() {
    let clean = pipeline(PipelineConfig::default())
        .run(&GaitGenerator::new(12).recording())
        .expect("walking data");
    let bumped = pipeline(PipelineConfig::default())
        .run(&GaitGenerator::new(12).with_right_bump(520, 200.0).recording())
        .expect("walking data");

    assert_eq!(bumped.report.right_peaks, 13);
    assert_eq!(bumped.report.dropped_double_steps, 1);
    assert_eq!(bumped.table, clean.table);
}

#[test]
fn weak_opening_step_is_discarded() {
    let recording = GaitGenerator::new(12).with_weak_first_swing(0.3).recording();
    let output = pipeline(PipelineConfig::default()).run(&recording).expect("walking data");

    assert!(output.report.discarded_leading_peak);
    assert_eq!(output.table.len(), 8);
    assert_near(output.table.strides()[0].right_heel_strike, 200, 2);
}

#[test]
fn gait_events_mode_keeps_regular_strides() {
    let config = PipelineConfig::default().with_bad_stride_filter(BadStrideMode::GaitEvents, 50.0);
    let output = pipeline(config).run(&GaitGenerator::new(12).recording()).expect("walking data");
    assert_eq!(output.removed, 0);
    assert_eq!(output.table.len(), 8);
}

#[test]
fn flat_foot_is_a_data_quality_error() {
    let generator = GaitGenerator::new(12);
    let still = vec![[0.0, 0.0, 9.81, 0.0, 0.0, 0.0]; generator.len()];
    let recording = DualFootRecording::new(
        FootRecording::from_rows(&generator.right_rows()),
        FootRecording::from_rows(&still),
    )
    .expect("equal lengths");

    let result = pipeline(PipelineConfig::default()).run(&recording);
    assert_eq!(
        result,
        Err(GaitError::InsufficientPeaks {
            foot: Foot::Left,
            required: 2,
            found: 0
        })
    );
}

#[test]
fn unequal_feet_rejected() {
    let generator = GaitGenerator::new(4);
    let mut left = generator.left_rows();
    left.pop();
    let result = DualFootRecording::from_rows(&generator.right_rows(), &left);
    assert_eq!(
        result,
        Err(GaitError::LengthMismatch {
            right: 400,
            left: 399
        })
    );
}

#[test]
fn pipeline_is_reusable_across_recordings() {
    let pipeline = pipeline(PipelineConfig::default());
    let first = pipeline.run(&GaitGenerator::new(12).recording()).expect("walking data");
    let second = pipeline.run(&GaitGenerator::new(12).recording()).expect("walking data");
    assert_eq!(first, second);
}

#[cfg(feature = "std")]
#[test]
fn output_serializes_to_json() {
    let output = pipeline(PipelineConfig::default())
        .run(&GaitGenerator::new(12).recording())
        .expect("walking data");
    let json = output.to_json().expect("serializable");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["report"]["edgeTrimmed"], 2);
    assert_eq!(value["cadence"].as_array().map(Vec::len), Some(8));
}
