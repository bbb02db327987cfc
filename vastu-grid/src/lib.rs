//! # VastuGrid
//!
//! Quantized occupancy grid mapping and correlative scan-matching search
//! spaces for 2D SLAM.
//!
//! ## Overview
//!
//! VastuGrid provides two building blocks of a grid-based SLAM front end:
//!
//! - **Range data insertion** - Fold lidar returns into a 16-bit probability
//!   grid through precomputed hit/miss lookup tables, marking traversed cells
//!   as free with Bresenham rays
//! - **Search space construction** - Derive the rotations and translations a
//!   correlative scan matcher must evaluate, clipped to the grid
//!
//! It does not score candidates, choose trajectories or close loops.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_grid::{Pose2D, RangeData, RangeDataInserter, SearchSpace, Settings};
//!
//! let settings = Settings::load_default()?;
//! let mut grid = settings.grid.build()?;
//! let inserter = RangeDataInserter::new(settings.range_data_inserter.clone())?;
//!
//! // Insert a scan taken at `pose`
//! let scan = RangeData::from_polar(&ranges, &angles, 0.15, 8.0);
//! inserter.insert(&scan.transformed(&pose), &mut grid);
//!
//! // Candidate poses for the next scan
//! let space = SearchSpace::build(&scan.returns, pose, grid.limits(), &settings.correlative_search)?;
//! println!("{} candidates", space.num_candidates());
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward (positive ahead of robot)
//! - Y: Left (positive to robot's left)
//! - Theta: Rotation in radians, CCW positive from +X axis
//!
//! Grid cell `(x, y)` covers `[origin + x·res, origin + (x+1)·res)` on each
//! axis.

#![warn(missing_docs)]

// Core types
pub mod core;

// Probability grid and range data insertion
pub mod grid;

// Correlative search space
pub mod matching;

// Settings and parameter dictionaries
pub mod config;

// Error types
pub mod error;

// Re-export commonly used types
pub use core::{GridCoord, Point3, PointCloud, Pose2D, RangeData, WorldPoint};

pub use grid::{
    CellLimits, LookupTable, MapLimits, ProbabilityGrid, ProbabilityGridConfig, RangeDataInserter,
    RangeDataInserterOptions,
};

pub use matching::{
    Candidate, CorrelativeSearchConfig, DiscreteScan, LinearBounds, SearchParameters, SearchSpace,
    discretize_scans, generate_rotated_scans,
};

pub use config::{ParameterDictionary, Settings};

pub use error::{ConfigError, Result};
