//! Core types for the VastuGrid library.
//!
//! All types follow the ROS REP-103 coordinate convention:
//! - **X-axis**: Forward (positive ahead of robot)
//! - **Y-axis**: Left (positive to robot's left)
//! - **Theta**: Counter-clockwise rotation from +X axis (radians)
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`GridCoord`]: Integer cell indices for grid access
//! - [`WorldPoint`]: Floating-point 2D world coordinates in meters
//! - [`Point3`]: Raw 3D sensor point
//!
//! ### Poses
//! - [`Pose2D`]: Position (x, y) and heading (theta)
//!
//! ### Sensor Data
//! - [`PointCloud`]: Ordered sequence of [`Point3`]
//! - [`RangeData`]: Sensor origin plus returns and misses
//!
//! ## Example
//!
//! ```rust,ignore
//! use vastu_grid::core::{Pose2D, RangeData};
//!
//! // Sensor-frame scan, moved into the map frame at the robot pose
//! let local = RangeData::from_polar(&ranges, &angles, 0.15, 8.0);
//! let world = local.transformed(&Pose2D::new(1.0, 2.0, 0.3));
//! ```

mod point;
mod point_cloud;
mod pose;

pub use point::{GridCoord, Point3, WorldPoint};
pub use point_cloud::{PointCloud, RangeData};
pub use pose::{Pose2D, normalize_angle};
