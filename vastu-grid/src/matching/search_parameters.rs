//! Discrete search window for correlative scan matching.
//!
//! The angular step is chosen so that rotating the farthest point by one step
//! moves it by at most one cell:
//!
//! ```text
//! r   = resolution
//! R   = max(3r, farthest point range)
//! cos(step) = 1 - r² / (2R²)          (law of cosines, chord = r)
//! step      = (1 - 1e-3) · acos(1 - r² / (2R²))
//! ```

use std::f64::consts::PI;

use crate::core::PointCloud;
use crate::error::{ConfigError, Result};
use crate::grid::CellLimits;

use super::config::check_window;
use super::rotated_scans::DiscreteScan;

/// Shrinks the angular step slightly below the one-cell chord.
const ANGULAR_SAFETY_MARGIN: f64 = 1.0 - 1e-3;

/// Largest perturbation count on one side of zero; keeps `2n + 1` in `i32`.
pub const MAX_PERTURBATIONS: i32 = (i32::MAX - 1) / 2;

/// Inclusive translational offsets, in cells, for one rotation.
///
/// Empty when `min > max` on either axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearBounds {
    /// Smallest x offset
    pub min_x: i32,
    /// Largest x offset
    pub max_x: i32,
    /// Smallest y offset
    pub min_y: i32,
    /// Largest y offset
    pub max_y: i32,
}

impl LinearBounds {
    /// Create bounds from explicit limits.
    pub const fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// `[-n, n]` on both axes.
    pub const fn symmetric(n: i32) -> Self {
        Self::new(-n, n, -n, n)
    }

    /// True if no offset satisfies the bounds.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Number of (x, y) offsets inside the bounds.
    pub fn num_candidates(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        // Non-empty, so both spans are positive
        let nx = (i64::from(self.max_x) - i64::from(self.min_x) + 1) as u64;
        let ny = (i64::from(self.max_y) - i64::from(self.min_y) + 1) as u64;
        usize::try_from(nx.saturating_mul(ny)).unwrap_or(usize::MAX)
    }

    /// Intersect with another bound in place.
    fn intersect(&mut self, other: &LinearBounds) {
        self.min_x = self.min_x.max(other.min_x);
        self.max_x = self.max_x.min(other.max_x);
        self.min_y = self.min_y.max(other.min_y);
        self.max_y = self.max_y.min(other.max_y);
    }
}

/// Rotations and per-rotation translations to evaluate.
///
/// Scan `i` is rotated by `(i - num_angular_perturbations) · step`, so the
/// middle scan is the unrotated one. `linear_bounds.len() == num_scans`
/// always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchParameters {
    /// Grid resolution (meters per cell)
    pub resolution: f64,
    /// Angle between neighbouring rotations (radians)
    pub angular_perturbation_step_size: f64,
    /// Rotations on each side of zero
    pub num_angular_perturbations: i32,
    /// Total rotations, `2 · num_angular_perturbations + 1`
    pub num_scans: i32,
    /// Translational window for each rotation
    pub linear_bounds: Vec<LinearBounds>,
}

impl SearchParameters {
    /// Derive search parameters from windows and the scan to match.
    ///
    /// `linear_search_window` is in meters, `angular_search_window` in
    /// radians. An empty cloud is valid and uses the minimum range of three
    /// cells. Angular windows wider than π are clamped to π, since larger
    /// rotations repeat smaller ones. Windows needing more than
    /// [`MAX_PERTURBATIONS`] steps per side are rejected.
    pub fn new(
        linear_search_window: f64,
        angular_search_window: f64,
        point_cloud: &PointCloud,
        resolution: f64,
    ) -> Result<Self> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(ConfigError::InvalidResolution(resolution));
        }
        check_window("linear_search_window", linear_search_window)?;
        check_window("angular_search_window", angular_search_window)?;

        let max_scan_range = point_cloud
            .iter()
            .map(|p| f64::from(p.range_2d()))
            .fold(3.0 * resolution, f64::max);

        let angular_perturbation_step_size = ANGULAR_SAFETY_MARGIN
            * (1.0 - resolution * resolution / (2.0 * max_scan_range * max_scan_range)).acos();
        let num_angular_perturbations = perturbation_count(
            "angular_search_window",
            angular_search_window.min(PI),
            angular_perturbation_step_size,
        )?;
        let num_linear_perturbations =
            perturbation_count("linear_search_window", linear_search_window, resolution)?;

        log::debug!(
            "Search parameters: range {:.2}m, step {:.4}rad, {} rotations, ±{} cells",
            max_scan_range,
            angular_perturbation_step_size,
            2 * num_angular_perturbations + 1,
            num_linear_perturbations
        );

        Ok(Self::from_perturbations(
            num_linear_perturbations,
            num_angular_perturbations,
            angular_perturbation_step_size,
            resolution,
        ))
    }

    /// Build parameters with explicit perturbation counts.
    ///
    /// Every rotation gets `[-num_linear, num_linear]` on both axes.
    ///
    /// # Panics
    ///
    /// If `num_angular_perturbations` lies outside `[0, MAX_PERTURBATIONS]`.
    pub fn from_perturbations(
        num_linear_perturbations: i32,
        num_angular_perturbations: i32,
        angular_perturbation_step_size: f64,
        resolution: f64,
    ) -> Self {
        assert!(
            (0..=MAX_PERTURBATIONS).contains(&num_angular_perturbations),
            "angular perturbation count out of range: {}",
            num_angular_perturbations
        );
        let num_scans = 2 * num_angular_perturbations + 1;
        Self {
            resolution,
            angular_perturbation_step_size,
            num_angular_perturbations,
            num_scans,
            linear_bounds: vec![
                LinearBounds::symmetric(num_linear_perturbations);
                num_scans as usize
            ],
        }
    }

    /// Rotation of scan `scan_index` relative to the initial heading.
    #[inline]
    pub fn angle(&self, scan_index: usize) -> f64 {
        (scan_index as i64 - i64::from(self.num_angular_perturbations)) as f64
            * self.angular_perturbation_step_size
    }

    /// Total (rotation, x, y) candidates across all rotations.
    pub fn num_candidates(&self) -> usize {
        self.linear_bounds
            .iter()
            .map(LinearBounds::num_candidates)
            .fold(0usize, usize::saturating_add)
    }

    /// Narrow each rotation's bounds so every translated scan cell lands
    /// inside a grid of `cell_limits`.
    ///
    /// Bounds are only ever intersected, never widened. Rotations whose scan
    /// is empty keep their bounds; rotations that cannot fit end up empty.
    ///
    /// # Panics
    ///
    /// If `scans.len()` or `linear_bounds.len()` differs from `num_scans`.
    pub fn shrink_to_fit(&mut self, scans: &[DiscreteScan], cell_limits: CellLimits) {
        assert_eq!(
            scans.len(),
            self.num_scans as usize,
            "one discrete scan per rotation"
        );
        assert_eq!(
            self.linear_bounds.len(),
            self.num_scans as usize,
            "one linear bound per rotation"
        );

        let max_x = cell_limits.num_x_cells - 1;
        let max_y = cell_limits.num_y_cells - 1;

        for (bounds, scan) in self.linear_bounds.iter_mut().zip(scans) {
            if scan.is_empty() {
                continue;
            }
            // Offsets keeping every cell within [0, max_x] × [0, max_y]
            let fit = scan.iter().fold(
                LinearBounds::new(i32::MIN, i32::MAX, i32::MIN, i32::MAX),
                |mut fit, coord| {
                    fit.min_x = fit.min_x.max(coord.x.saturating_neg());
                    fit.max_x = fit.max_x.min(max_x.saturating_sub(coord.x));
                    fit.min_y = fit.min_y.max(coord.y.saturating_neg());
                    fit.max_y = fit.max_y.min(max_y.saturating_sub(coord.y));
                    fit
                },
            );
            bounds.intersect(&fit);
        }
    }
}

/// Steps of `step` needed to cover `window` on one side of zero.
fn perturbation_count(name: &'static str, window: f64, step: f64) -> Result<i32> {
    if window == 0.0 {
        return Ok(0);
    }
    let count = (window / step).ceil();
    if count <= f64::from(MAX_PERTURBATIONS) {
        Ok(count as i32)
    } else {
        Err(ConfigError::InvalidSearchWindow {
            name,
            value: window,
        })
    }
}
