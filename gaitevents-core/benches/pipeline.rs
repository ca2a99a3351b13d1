//! Benchmarks for the stride detection pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gaitevents_core::{
    signal::LowPassFilter, DualFootRecording, FootRecording, PipelineConfig, StrideDetectionPipeline,
};

/// Periodic gait-like pitch rate: 1 s strides at 100 Hz
fn pitch(i: usize, lag: usize) -> f64 {
    use std::f64::consts::PI;

    let phase = ((i + 100 - lag % 100) % 100) as f64 / 100.0;
    let swing = (2.0 * PI * (phase - 0.55) / 0.45).sin().max(0.0) * 350.0;
    let stance = -120.0 * (2.0 * PI * phase).cos().max(0.0);
    swing + stance + (i as f64 * 2.9).sin() * 5.0
}

fn recording(strides: usize) -> DualFootRecording {
    let rows = |lag: usize| -> Vec<[f64; 6]> {
        (0..strides * 100)
            .map(|i| [0.0, 0.0, 9.81, 0.0, pitch(i, lag), 0.0])
            .collect()
    };
    DualFootRecording::new(FootRecording::from_rows(&rows(0)), FootRecording::from_rows(&rows(50)))
        .expect("equal lengths")
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = StrideDetectionPipeline::new(PipelineConfig::default()).expect("valid config");

    for strides in [30, 120, 600].iter() {
        let input = recording(*strides);
        group.bench_with_input(BenchmarkId::from_parameter(strides), strides, |b, _| {
            b.iter(|| black_box(pipeline.run(black_box(&input))))
        });
    }

    group.finish();
}

fn bench_filtfilt(c: &mut Criterion) {
    let filter = LowPassFilter::butterworth(4, 20.0, 100.0).expect("valid design");
    let signal: Vec<f64> = (0..60_000).map(|i| pitch(i, 0)).collect();

    c.bench_function("filtfilt_10min", |b| {
        b.iter(|| black_box(filter.filtfilt(black_box(&signal))))
    });
}

criterion_group!(benches, bench_pipeline, bench_filtfilt);
criterion_main!(benches);
