use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use trajkit_eval::align::align_translations;

fn spiral(num_points: usize) -> Vec<[f64; 3]> {
    (0..num_points)
        .map(|i| {
            let s = i as f64 * 0.1;
            [s.cos() * (1.0 + s * 0.05), s.sin() * (1.0 + s * 0.05), s * 0.2]
        })
        .collect()
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("align_translations");
    for num_points in [100usize, 1000, 10000].iter() {
        let gt = spiral(*num_points);
        let est: Vec<[f64; 3]> = gt
            .iter()
            .map(|p| [p[0] * 0.5 + 1.0, p[1] * 0.5 - 2.0, p[2] * 0.5])
            .collect();

        group.bench_with_input(
            BenchmarkId::new("solve_scale", num_points),
            num_points,
            |b, _| b.iter(|| align_translations(black_box(&gt), black_box(&est), true)),
        );
        group.bench_with_input(
            BenchmarkId::new("rigid_only", num_points),
            num_points,
            |b, _| b.iter(|| align_translations(black_box(&gt), black_box(&est), false)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_align);
criterion_main!(benches);
