//! Benchmarks for SVG track map rendering
//!
//! Platform: Cross-platform (synthetic traces, CI-safe)

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minisector::test_utils::split_speed_trace;
use minisector::{RenderOptions, SegmentComparator, SessionKey, TrackRenderer};
use std::hint::black_box;

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_track_map");
    let renderer = TrackRenderer::new(RenderOptions::default());
    let session = SessionKey::qualifying(2023, "Bahrain Grand Prix");

    for samples in [500, 5_000] {
        let (reference, comparison) = split_speed_trace(samples, 5412.0);
        let result = SegmentComparator::default()
            .compare(&reference, &comparison)
            .expect("synthetic traces compare");

        group.bench_with_input(BenchmarkId::from_parameter(samples), &samples, |b, _| {
            b.iter(|| black_box(renderer.render(black_box(&result), &session)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
