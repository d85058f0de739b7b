//! Benchmark tests for hotreel-core operations
//!
//! Run with: cargo bench -p hotreel-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::{Duration, Instant};

use hotreel_core::types::*;
use hotreel_core::{fit_surface, ui_channel, UiTask};

// ============================================================================
// Helpers
// ============================================================================

fn create_bindings(count: usize) -> BindingSet {
    (0..count)
        .map(|i| (format!("ctrl+alt+F{i}"), format!("/media/clip_{i}.mp4")))
        .collect()
}

// ============================================================================
// Layout
// ============================================================================

fn bench_fit_surface(c: &mut Criterion) {
    let window = WindowSize::new(640, 480);
    let mut group = c.benchmark_group("Surface Fit");

    for (name, video) in [
        ("landscape", VideoDimensions::new(1920, 1080)),
        ("portrait", VideoDimensions::new(1080, 1920)),
        ("square", VideoDimensions::new(720, 720)),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &video, |b, video| {
            b.iter(|| fit_surface(black_box(*video), black_box(window), black_box(20)))
        });
    }
    group.finish();
}

// ============================================================================
// Binding set
// ============================================================================

fn bench_binding_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("Binding Serialization");

    for count in [1, 10, 100] {
        let bindings = create_bindings(count);
        let json = serde_json::to_vec_pretty(&bindings).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", count), &bindings, |b, bindings| {
            b.iter(|| serde_json::to_vec_pretty(black_box(bindings)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("deserialize", count), &json, |b, json| {
            b.iter(|| serde_json::from_slice::<BindingSet>(black_box(json)).unwrap())
        });
    }
    group.finish();
}

fn bench_binding_entries(c: &mut Criterion) {
    let bindings = create_bindings(100);
    c.bench_function("binding_entries_100", |b| b.iter(|| black_box(&bindings).entries()));
}

// ============================================================================
// UI queue
// ============================================================================

fn bench_queue_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("UI Queue Drain");

    for burst in [1, 16, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(burst), &burst, |b, &burst| {
            let (dispatcher, mut queue) = ui_channel(None);
            b.iter(|| {
                for i in 0..burst {
                    dispatcher.send(UiTask::Play {
                        combo: "shift+t".to_string(),
                        path: format!("/media/{i}.mp4"),
                    });
                }
                queue.schedule_after(Duration::ZERO, UiTask::ProbeDimensions(SessionId::new()));
                black_box(queue.drain(Instant::now()))
            })
        });
    }
    group.finish();
}

criterion_group!(layout_benches, bench_fit_surface);
criterion_group!(binding_benches, bench_binding_serde, bench_binding_entries);
criterion_group!(queue_benches, bench_queue_drain);

criterion_main!(layout_benches, binding_benches, queue_benches);
