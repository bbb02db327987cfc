//! Test utilities for VastuGrid.
//!
//! Synthetic scans of rectangular rooms and simple point clouds.

#![allow(dead_code)]

use std::f32::consts::PI;
use vastu_grid::{Point3, PointCloud, Pose2D, RangeData};

/// Sensor range limits used by the fixtures.
pub const MIN_RANGE: f32 = 0.15;
pub const MAX_RANGE: f32 = 8.0;

/// Initialise logging once for the test binary.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Cast `num_points` rays from `pose` inside an axis-aligned room spanning
/// `[0, width] × [0, height]`. Returns `(ranges, angles)` in the sensor frame.
pub fn room_ranges(width: f32, height: f32, pose: Pose2D, num_points: usize) -> (Vec<f32>, Vec<f32>) {
    let angle_increment = 2.0 * PI / num_points as f32;
    let mut ranges = Vec::with_capacity(num_points);
    let mut angles = Vec::with_capacity(num_points);

    for i in 0..num_points {
        let angle = i as f32 * angle_increment - PI;
        angles.push(angle);

        let (sin_a, cos_a) = (pose.theta + angle).sin_cos();
        let mut range = f32::INFINITY;

        if cos_a > 0.0 {
            range = range.min((width - pose.x) / cos_a);
        }
        if cos_a < 0.0 {
            range = range.min(-pose.x / cos_a);
        }
        if sin_a > 0.0 {
            range = range.min((height - pose.y) / sin_a);
        }
        if sin_a < 0.0 {
            range = range.min(-pose.y / sin_a);
        }
        ranges.push(range);
    }

    (ranges, angles)
}

/// Sensor-frame range data for a room scan taken at `pose`.
pub fn room_scan(width: f32, height: f32, pose: Pose2D, num_points: usize) -> RangeData {
    let (ranges, angles) = room_ranges(width, height, pose, num_points);
    RangeData::from_polar(&ranges, &angles, MIN_RANGE, MAX_RANGE)
}

/// `n` points evenly spaced on a circle around the origin.
pub fn circle_cloud(radius: f32, n: usize) -> PointCloud {
    (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f32 / n as f32;
            Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
        .collect()
}
