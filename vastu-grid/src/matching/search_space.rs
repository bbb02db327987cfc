//! Candidate poses for correlative scan matching.
//!
//! Builds everything a scorer needs, without scoring:
//!
//! ```text
//! PointCloud (sensor frame)
//!     │  rotate by initial heading
//!     ▼
//! SearchParameters::new ──▶ generate_rotated_scans ──▶ discretize_scans
//!                                                            │
//!                          shrink_to_fit(grid limits) ◀──────┘
//!                                   │
//!                                   ▼
//!                     candidates(): (rotation, dx, dy)
//! ```

use crate::core::{GridCoord, PointCloud, Pose2D, normalize_angle};
use crate::error::Result;
use crate::grid::MapLimits;

use super::config::CorrelativeSearchConfig;
use super::rotated_scans::{DiscreteScan, discretize_scans, generate_rotated_scans};
use super::search_parameters::SearchParameters;

/// One pose offset to evaluate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Index into the rotated scans
    pub scan_index: usize,
    /// X offset in cells
    pub x_index_offset: i32,
    /// Y offset in cells
    pub y_index_offset: i32,
    /// Rotation relative to the initial heading (radians)
    pub orientation: f64,
    /// X offset (meters)
    pub x: f64,
    /// Y offset (meters)
    pub y: f64,
}

/// Precomputed rotations, discretizations and bounds around an initial pose.
#[derive(Clone, Debug)]
pub struct SearchSpace {
    initial_pose: Pose2D,
    parameters: SearchParameters,
    rotated_scans: Vec<PointCloud>,
    discrete_scans: Vec<DiscreteScan>,
}

impl SearchSpace {
    /// Build the search space for `point_cloud`, given in the sensor frame,
    /// around `initial_pose` on a grid placed at `map_limits`.
    pub fn build(
        point_cloud: &PointCloud,
        initial_pose: Pose2D,
        map_limits: &MapLimits,
        config: &CorrelativeSearchConfig,
    ) -> Result<Self> {
        config.validate()?;

        let rotated_cloud = point_cloud.rotated(initial_pose.theta);
        let mut parameters = SearchParameters::new(
            config.linear_search_window,
            config.angular_search_window,
            &rotated_cloud,
            f64::from(map_limits.resolution()),
        )?;

        let rotated_scans = generate_rotated_scans(&rotated_cloud, &parameters);
        let discrete_scans =
            discretize_scans(map_limits, &rotated_scans, initial_pose.position());
        parameters.shrink_to_fit(&discrete_scans, map_limits.cell_limits());

        log::debug!(
            "Search space: {} points, {} rotations, {} candidates",
            point_cloud.len(),
            parameters.num_scans,
            parameters.num_candidates()
        );

        Ok(Self {
            initial_pose,
            parameters,
            rotated_scans,
            discrete_scans,
        })
    }

    /// Pose the search is centred on.
    pub fn initial_pose(&self) -> Pose2D {
        self.initial_pose
    }

    /// Shrunk search parameters.
    pub fn parameters(&self) -> &SearchParameters {
        &self.parameters
    }

    /// Scan copies, one per rotation, in the grid frame's orientation.
    pub fn rotated_scans(&self) -> &[PointCloud] {
        &self.rotated_scans
    }

    /// Cell indices of each rotated scan at the initial translation.
    pub fn discrete_scans(&self) -> &[DiscreteScan] {
        &self.discrete_scans
    }

    /// Number of candidates [`candidates`](Self::candidates) yields.
    pub fn num_candidates(&self) -> usize {
        self.parameters.num_candidates()
    }

    /// Every (rotation, x, y) inside the shrunk bounds.
    ///
    /// Ordered by rotation, then x, then y. Rotations with empty bounds
    /// yield nothing.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        let resolution = self.parameters.resolution;
        self.parameters
            .linear_bounds
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, bounds)| !bounds.is_empty())
            .flat_map(move |(scan_index, bounds)| {
                let orientation = self.parameters.angle(scan_index);
                (bounds.min_x..=bounds.max_x).flat_map(move |x_index_offset| {
                    (bounds.min_y..=bounds.max_y).map(move |y_index_offset| Candidate {
                        scan_index,
                        x_index_offset,
                        y_index_offset,
                        orientation,
                        x: f64::from(x_index_offset) * resolution,
                        y: f64::from(y_index_offset) * resolution,
                    })
                })
            })
    }

    /// Grid cells covered by the scan under `candidate`.
    pub fn candidate_cells<'a>(
        &'a self,
        candidate: &Candidate,
    ) -> impl Iterator<Item = GridCoord> + 'a {
        let offset = GridCoord::new(candidate.x_index_offset, candidate.y_index_offset);
        self.discrete_scans[candidate.scan_index]
            .iter()
            .map(move |&coord| coord + offset)
    }

    /// World pose a candidate represents.
    pub fn candidate_pose(&self, candidate: &Candidate) -> Pose2D {
        Pose2D::new(
            self.initial_pose.x + candidate.x as f32,
            self.initial_pose.y + candidate.y as f32,
            normalize_angle(self.initial_pose.theta + candidate.orientation as f32),
        )
    }
}
