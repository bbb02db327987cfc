//! Point and coordinate types.

use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Integer cell index into a grid.
///
/// `x` indexes columns and `y` indexes rows. Indices may be negative or
/// beyond the grid while a point is being discretized; validity is checked
/// against [`CellLimits`](crate::grid::CellLimits).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column index
    pub x: i32,
    /// Row index
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl Add for GridCoord {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridCoord {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for GridCoord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// 2D point in world coordinates (meters).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate (meters)
    pub x: f32,
    /// Y coordinate (meters)
    pub y: f32,
}

impl WorldPoint {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new world point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).norm()
    }

    /// Distance from the origin.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 3D point as delivered by a range sensor (meters).
///
/// Only the horizontal projection is used by the 2D grid; `z` is carried
/// through transforms untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate (meters)
    pub x: f32,
    /// Y coordinate (meters)
    pub y: f32,
    /// Z coordinate (meters)
    pub z: f32,
}

impl Point3 {
    /// Create a new 3D point.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Horizontal projection.
    #[inline]
    pub fn xy(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Horizontal distance from the origin.
    #[inline]
    pub fn range_2d(&self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl From<WorldPoint> for Point3 {
    fn from(p: WorldPoint) -> Self {
        Self::new(p.x, p.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_coord_ops() {
        let a = GridCoord::new(3, -2);
        let b = GridCoord::new(-1, 5);
        assert_eq!(a + b, GridCoord::new(2, 3));
        assert_eq!(a - b, GridCoord::new(4, -7));
        assert_eq!(-a, GridCoord::new(-3, 2));
        assert_eq!(a.min(b), GridCoord::new(-1, -2));
        assert_eq!(a.max(b), GridCoord::new(3, 5));
    }

    #[test]
    fn test_range_2d_ignores_z() {
        let p = Point3::new(3.0, 4.0, 10.0);
        assert!((p.range_2d() - 5.0).abs() < 1e-6);
        assert_eq!(p.xy(), WorldPoint::new(3.0, 4.0));
    }
}
