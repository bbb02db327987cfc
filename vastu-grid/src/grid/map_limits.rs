//! Grid geometry: cell counts and the world-to-cell mapping.

use serde::{Deserialize, Serialize};

use crate::core::{GridCoord, WorldPoint};

/// Number of cells along each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLimits {
    /// Cells along X (columns)
    pub num_x_cells: i32,
    /// Cells along Y (rows)
    pub num_y_cells: i32,
}

impl CellLimits {
    /// Create new cell limits.
    #[inline]
    pub const fn new(num_x_cells: i32, num_y_cells: i32) -> Self {
        Self {
            num_x_cells,
            num_y_cells,
        }
    }

    /// True if `coord` addresses a cell inside these limits.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.num_x_cells && coord.y < self.num_y_cells
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.num_x_cells.max(0) as usize * self.num_y_cells.max(0) as usize
    }

    /// Largest valid index on each axis.
    #[inline]
    pub fn max_index(&self) -> GridCoord {
        GridCoord::new(self.num_x_cells - 1, self.num_y_cells - 1)
    }
}

/// Placement of a grid in the world.
///
/// Cell `(x, y)` covers `[origin + x·res, origin + (x+1)·res)` on each axis,
/// so the world-to-cell mapping is a floor division relative to `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapLimits {
    resolution: f32,
    /// Pre-computed 1.0 / resolution for faster world-to-grid conversion.
    inv_resolution: f32,
    origin: WorldPoint,
    cell_limits: CellLimits,
}

impl MapLimits {
    /// Create limits for a grid whose cell (0, 0) corner sits at `origin`.
    pub fn new(resolution: f32, origin: WorldPoint, cell_limits: CellLimits) -> Self {
        Self {
            resolution,
            inv_resolution: 1.0 / resolution,
            origin,
            cell_limits,
        }
    }

    /// Create limits for a grid centered on the world origin.
    pub fn centered(resolution: f32, cell_limits: CellLimits) -> Self {
        let half_width = cell_limits.num_x_cells as f32 * resolution / 2.0;
        let half_height = cell_limits.num_y_cells as f32 * resolution / 2.0;
        Self::new(
            resolution,
            WorldPoint::new(-half_width, -half_height),
            cell_limits,
        )
    }

    /// Meters per cell.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World position of the (0, 0) cell corner.
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Number of cells along each axis.
    #[inline]
    pub fn cell_limits(&self) -> CellLimits {
        self.cell_limits
    }

    /// World position of the far corner.
    pub fn max(&self) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + self.cell_limits.num_x_cells as f32 * self.resolution,
            self.origin.y + self.cell_limits.num_y_cells as f32 * self.resolution,
        )
    }

    /// Cell containing a world point. May lie outside the grid.
    #[inline]
    pub fn cell_index(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            ((point.x - self.origin.x) * self.inv_resolution).floor() as i32,
            ((point.y - self.origin.y) * self.inv_resolution).floor() as i32,
        )
    }

    /// World position of a cell's center.
    #[inline]
    pub fn cell_center(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (coord.x as f32 + 0.5) * self.resolution,
            self.origin.y + (coord.y as f32 + 0.5) * self.resolution,
        )
    }

    /// True if the cell lies inside the grid.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.cell_limits.contains(coord)
    }

    /// True if the world point lies inside the grid.
    #[inline]
    pub fn contains_point(&self, point: WorldPoint) -> bool {
        self.contains(self.cell_index(point))
    }
}
