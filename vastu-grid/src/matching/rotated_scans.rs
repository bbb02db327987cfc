//! Rotated and discretized copies of a scan.

use crate::core::{GridCoord, PointCloud, WorldPoint};
use crate::grid::MapLimits;

use super::search_parameters::SearchParameters;

/// Cell indices of one rotated scan, in point order.
pub type DiscreteScan = Vec<GridCoord>;

/// Rotate `point_cloud` once per search rotation.
///
/// Scan `i` is rotated about z by [`SearchParameters::angle`]`(i)`. The
/// middle scan is an exact copy of the input.
pub fn generate_rotated_scans(
    point_cloud: &PointCloud,
    search_parameters: &SearchParameters,
) -> Vec<PointCloud> {
    (0..search_parameters.num_scans.max(0) as usize)
        .map(|scan_index| {
            let angle = search_parameters.angle(scan_index);
            if angle == 0.0 {
                point_cloud.clone()
            } else {
                point_cloud.rotated(angle as f32)
            }
        })
        .collect()
}

/// Translate each scan by `initial_translation` and map its points to cells.
///
/// Cells outside the grid are kept; `shrink_to_fit` accounts for them.
pub fn discretize_scans(
    map_limits: &MapLimits,
    scans: &[PointCloud],
    initial_translation: WorldPoint,
) -> Vec<DiscreteScan> {
    scans
        .iter()
        .map(|scan| {
            scan.iter()
                .map(|point| map_limits.cell_index(point.xy() + initial_translation))
                .collect()
        })
        .collect()
}
