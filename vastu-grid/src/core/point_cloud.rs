//! Point cloud and range data containers.

use serde::{Deserialize, Serialize};

use super::{Point3, Pose2D};

/// Ordered sequence of 3D points.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    points: Vec<Point3>,
}

impl PointCloud {
    /// Create an empty point cloud.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create an empty point cloud with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Build a cloud from polar ranges in the sensor plane (z = 0).
    pub fn from_polar(ranges: &[f32], angles: &[f32]) -> Self {
        ranges
            .iter()
            .zip(angles)
            .map(|(&r, &a)| {
                let (sin_a, cos_a) = a.sin_cos();
                Point3::new(r * cos_a, r * sin_a, 0.0)
            })
            .collect()
    }

    /// Append a point.
    #[inline]
    pub fn push(&mut self, point: Point3) {
        self.points.push(point);
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the cloud has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as a slice.
    #[inline]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Iterate over the points.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }

    /// Largest horizontal distance from the origin, or `None` if empty.
    pub fn max_range_2d(&self) -> Option<f32> {
        self.points.iter().map(Point3::range_2d).reduce(f32::max)
    }

    /// Return a copy with every point transformed by `pose`.
    pub fn transformed(&self, pose: &Pose2D) -> Self {
        self.points
            .iter()
            .map(|p| pose.transform_point3(*p))
            .collect()
    }

    /// Return a copy rotated about the z axis by `angle` radians.
    pub fn rotated(&self, angle: f32) -> Self {
        self.transformed(&Pose2D::new(0.0, 0.0, angle))
    }
}

impl FromIterator<Point3> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Point3>> for PointCloud {
    fn from(points: Vec<Point3>) -> Self {
        Self { points }
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One burst of range measurements.
///
/// `returns` are endpoints where the beam hit something; `misses` are the
/// endpoints of beams that reached maximum range without a return. Both are
/// expressed in the same frame as `origin`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeData {
    /// Sensor origin
    pub origin: Point3,
    /// Endpoints of beams with a return
    pub returns: PointCloud,
    /// Endpoints of beams without a return
    pub misses: PointCloud,
}

impl RangeData {
    /// Create range data with returns only.
    pub fn new(origin: Point3, returns: PointCloud) -> Self {
        Self {
            origin,
            returns,
            misses: PointCloud::new(),
        }
    }

    /// Create range data with both returns and misses.
    pub fn with_misses(origin: Point3, returns: PointCloud, misses: PointCloud) -> Self {
        Self {
            origin,
            returns,
            misses,
        }
    }

    /// Build range data from a polar scan taken in the sensor frame.
    ///
    /// Ranges at or beyond `max_range` become misses clamped to
    /// `max_range`; ranges below `min_range` and non-finite ranges are
    /// dropped. The result is expressed in the sensor frame (origin at zero).
    pub fn from_polar(ranges: &[f32], angles: &[f32], min_range: f32, max_range: f32) -> Self {
        let mut returns = PointCloud::with_capacity(ranges.len());
        let mut misses = PointCloud::new();

        for (&range, &angle) in ranges.iter().zip(angles) {
            if !range.is_finite() || range < min_range {
                continue;
            }
            let (sin_a, cos_a) = angle.sin_cos();
            if range >= max_range {
                misses.push(Point3::new(max_range * cos_a, max_range * sin_a, 0.0));
            } else {
                returns.push(Point3::new(range * cos_a, range * sin_a, 0.0));
            }
        }

        Self {
            origin: Point3::default(),
            returns,
            misses,
        }
    }

    /// Return a copy with origin and all endpoints transformed by `pose`.
    ///
    /// Use this to move sensor-frame data into the map frame before
    /// insertion.
    pub fn transformed(&self, pose: &Pose2D) -> Self {
        Self {
            origin: pose.transform_point3(self.origin),
            returns: self.returns.transformed(pose),
            misses: self.misses.transformed(pose),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_max_range_2d() {
        let cloud: PointCloud = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, -2.0, 5.0),
            Point3::new(0.5, 0.5, 0.0),
        ]
        .into();
        assert_relative_eq!(cloud.max_range_2d().unwrap(), 2.0);
        assert!(PointCloud::new().max_range_2d().is_none());
    }

    #[test]
    fn test_rotated_preserves_z() {
        let cloud: PointCloud = vec![Point3::new(1.0, 0.0, 0.3)].into();
        let rotated = cloud.rotated(FRAC_PI_2);
        let p = rotated.points()[0];
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.3);
    }

    #[test]
    fn test_range_data_from_polar() {
        let ranges = [1.0, 8.0, 0.05, f32::NAN, 2.0];
        let angles = [0.0, FRAC_PI_2, 0.0, 0.0, -FRAC_PI_2];
        let data = RangeData::from_polar(&ranges, &angles, 0.15, 8.0);

        assert_eq!(data.returns.len(), 2);
        assert_eq!(data.misses.len(), 1);
        assert_relative_eq!(data.misses.points()[0].y, 8.0, epsilon = 1e-5);
        assert_relative_eq!(data.returns.points()[1].y, -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_range_data_transformed() {
        let data = RangeData::new(
            Point3::default(),
            vec![Point3::new(1.0, 0.0, 0.0)].into(),
        );
        let moved = data.transformed(&Pose2D::new(2.0, 3.0, FRAC_PI_2));
        assert_relative_eq!(moved.origin.x, 2.0);
        assert_relative_eq!(moved.origin.y, 3.0);
        assert_relative_eq!(moved.returns.points()[0].x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(moved.returns.points()[0].y, 4.0, epsilon = 1e-6);
    }
}
