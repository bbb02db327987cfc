//! 2D rigid pose.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use super::{Point3, WorldPoint};

/// Robot pose in 2D: position (x, y) and heading theta.
///
/// Theta is counter-clockwise from +X in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position (meters)
    pub x: f32,
    /// Y position (meters)
    pub y: f32,
    /// Heading (radians)
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose.
    #[inline]
    pub const fn new(x: f32, y: f32, theta: f32) -> Self {
        Self { x, y, theta }
    }

    /// Identity pose.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Position as a world point.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Transform a point from this pose's frame into the parent frame.
    #[inline]
    pub fn transform_point(&self, point: WorldPoint) -> WorldPoint {
        let (sin_t, cos_t) = self.theta.sin_cos();
        WorldPoint::new(
            self.x + point.x * cos_t - point.y * sin_t,
            self.y + point.x * sin_t + point.y * cos_t,
        )
    }

    /// Transform a 3D point, rotating about z and leaving z untouched.
    #[inline]
    pub fn transform_point3(&self, point: Point3) -> Point3 {
        let p = self.transform_point(point.xy());
        Point3::new(p.x, p.y, point.z)
    }

    /// Compose two poses: `self ∘ other`.
    pub fn compose(&self, other: &Pose2D) -> Pose2D {
        let p = self.transform_point(other.position());
        Pose2D::new(p.x, p.y, normalize_angle(self.theta + other.theta))
    }
}

/// Normalize an angle to [-π, π).
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if a >= PI {
        a -= 2.0 * PI;
    }
    a
}
