//! Benchmark range data insertion performance.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f32::consts::PI;
use vastu_grid::grid::LookupTable;
use vastu_grid::{Pose2D, ProbabilityGridConfig, RangeData, RangeDataInserter, RangeDataInserterOptions};

/// Create a room scan for benchmarking, in the sensor frame.
fn room_scan(room_width: f32, room_height: f32, pose: Pose2D, num_points: usize) -> RangeData {
    let angle_increment = 2.0 * PI / num_points as f32;
    let max_range = 8.0;

    let mut ranges = Vec::with_capacity(num_points);
    let mut angles = Vec::with_capacity(num_points);

    for i in 0..num_points {
        let angle = i as f32 * angle_increment - PI;
        angles.push(angle);

        let (sin_a, cos_a) = (pose.theta + angle).sin_cos();
        let mut range = f32::INFINITY;

        // Simple room ray casting
        if cos_a > 0.0 {
            range = range.min((room_width - pose.x) / cos_a);
        }
        if cos_a < 0.0 {
            range = range.min(-pose.x / cos_a);
        }
        if sin_a > 0.0 {
            range = range.min((room_height - pose.y) / sin_a);
        }
        if sin_a < 0.0 {
            range = range.min(-pose.y / sin_a);
        }

        ranges.push(range);
    }

    RangeData::from_polar(&ranges, &angles, 0.15, max_range)
}

fn bench_insert(c: &mut Criterion) {
    let mut grid = ProbabilityGridConfig::default().build().unwrap();
    let inserter = RangeDataInserter::new(RangeDataInserterOptions::default()).unwrap();

    let pose = Pose2D::new(3.0, 3.0, 0.0);
    let scan = room_scan(6.0, 6.0, pose, 360).transformed(&pose);

    // Warm up
    for _ in 0..5 {
        inserter.insert(&scan, &mut grid);
    }

    c.bench_function("insert_360pts", |b| {
        b.iter(|| inserter.insert(black_box(&scan), black_box(&mut grid)))
    });
}

fn bench_insert_point_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_point_count");

    for num_points in [180, 360, 720].iter() {
        let mut grid = ProbabilityGridConfig::default().build().unwrap();
        let inserter = RangeDataInserter::new(RangeDataInserterOptions::default()).unwrap();

        let pose = Pose2D::new(3.0, 3.0, 0.0);
        let scan = room_scan(6.0, 6.0, pose, *num_points).transformed(&pose);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_points),
            num_points,
            |b, _| b.iter(|| inserter.insert(black_box(&scan), black_box(&mut grid))),
        );
    }

    group.finish();
}

fn bench_lookup_table(c: &mut Criterion) {
    c.bench_function("lookup_table_build", |b| {
        b.iter(|| LookupTable::for_probability(black_box(0.55)))
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_insert_point_counts,
    bench_lookup_table
);
criterion_main!(benches);
