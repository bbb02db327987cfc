//! Quantized probability grid.

use crate::core::{GridCoord, WorldPoint};

use super::map_limits::{CellLimits, MapLimits};
use super::probability_values::{
    LookupTable, UNKNOWN_PROBABILITY_VALUE, UPDATE_MARKER, probability_to_value,
    value_to_probability,
};

/// Axis-aligned box of cell indices, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBox {
    /// Smallest index on each axis
    pub min: GridCoord,
    /// Largest index on each axis
    pub max: GridCoord,
}

impl CellBox {
    fn around(coord: GridCoord) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    fn extend(&mut self, coord: GridCoord) {
        self.min = self.min.min(coord);
        self.max = self.max.max(coord);
    }

    /// Number of cells on each axis.
    pub fn size(&self) -> CellLimits {
        CellLimits::new(self.max.x - self.min.x + 1, self.max.y - self.min.y + 1)
    }
}

/// 2D grid of quantized occupancy probabilities.
///
/// Cells are stored row-major: index = `y * num_x_cells + x`. Each cell holds
/// a value from [`probability_values`](super::probability_values); `0` means
/// never observed.
///
/// Updates go through [`apply_lookup_table`](Self::apply_lookup_table), which
/// sets the update marker on the cell so that a second update in the same
/// batch is ignored. [`finish_update`](Self::finish_update) clears the
/// markers and ends the batch.
#[derive(Clone, Debug)]
pub struct ProbabilityGrid {
    limits: MapLimits,
    cells: Vec<u16>,
    /// Flat indices marked during the current batch.
    update_indices: Vec<usize>,
    known_cells_box: Option<CellBox>,
    max_limits: CellLimits,
}

impl ProbabilityGrid {
    /// Create an empty grid. The grid never grows.
    pub fn new(limits: MapLimits) -> Self {
        let max_limits = limits.cell_limits();
        Self::with_max_limits(limits, max_limits)
    }

    /// Create an empty grid that may grow up to `max_limits` cells.
    pub fn with_max_limits(limits: MapLimits, max_limits: CellLimits) -> Self {
        Self {
            cells: vec![UNKNOWN_PROBABILITY_VALUE; limits.cell_limits().cell_count()],
            update_indices: Vec::new(),
            known_cells_box: None,
            max_limits,
            limits,
        }
    }

    /// Create an empty grid centered on the world origin.
    pub fn centered(num_x_cells: i32, num_y_cells: i32, resolution: f32) -> Self {
        Self::new(MapLimits::centered(
            resolution,
            CellLimits::new(num_x_cells, num_y_cells),
        ))
    }

    // === Basic Properties ===

    /// Grid placement and size.
    #[inline]
    pub fn limits(&self) -> &MapLimits {
        &self.limits
    }

    /// Current size in cells.
    #[inline]
    pub fn cell_limits(&self) -> CellLimits {
        self.limits.cell_limits()
    }

    /// Largest size the grid may grow to.
    #[inline]
    pub fn max_limits(&self) -> CellLimits {
        self.max_limits
    }

    /// Meters per cell.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.limits.resolution()
    }

    /// Cell containing a world point. May lie outside the grid.
    #[inline]
    pub fn cell_index(&self, point: WorldPoint) -> GridCoord {
        self.limits.cell_index(point)
    }

    /// True if the cell lies inside the grid.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.limits.contains(coord)
    }

    /// Bounding box of every cell that has been observed, if any.
    #[inline]
    pub fn known_cells_box(&self) -> Option<CellBox> {
        self.known_cells_box
    }

    #[inline]
    fn flat_index(&self, coord: GridCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.limits.cell_limits().num_x_cells as usize + coord.x as usize)
        } else {
            None
        }
    }

    // === Cell Access ===

    /// Raw stored value, or unknown if outside the grid.
    #[inline]
    pub fn value(&self, coord: GridCoord) -> u16 {
        self.flat_index(coord)
            .map(|i| self.cells[i])
            .unwrap_or(UNKNOWN_PROBABILITY_VALUE)
    }

    /// Raw cell values, row-major.
    #[inline]
    pub fn values(&self) -> &[u16] {
        &self.cells
    }

    /// True if the cell has been observed.
    #[inline]
    pub fn is_known(&self, coord: GridCoord) -> bool {
        self.value(coord) != UNKNOWN_PROBABILITY_VALUE
    }

    /// Occupancy probability of a cell.
    ///
    /// Unknown and out-of-grid cells report the minimum probability.
    #[inline]
    pub fn probability(&self, coord: GridCoord) -> f32 {
        value_to_probability(self.value(coord))
    }

    /// Seed an unknown cell with a probability.
    ///
    /// # Panics
    /// If the cell is outside the grid or already known.
    pub fn set_probability(&mut self, coord: GridCoord, probability: f32) {
        let index = self
            .flat_index(coord)
            .unwrap_or_else(|| panic!("cell {:?} outside grid", coord));
        assert_eq!(
            self.cells[index], UNKNOWN_PROBABILITY_VALUE,
            "cell {:?} already known",
            coord
        );
        self.cells[index] = probability_to_value(probability);
        self.mark_known(coord);
    }

    /// Apply a lookup table to a cell as part of the current batch.
    ///
    /// Returns false, leaving the cell untouched, if the cell lies outside
    /// the grid or was already updated since the last
    /// [`finish_update`](Self::finish_update).
    pub fn apply_lookup_table(&mut self, coord: GridCoord, table: &LookupTable) -> bool {
        let Some(index) = self.flat_index(coord) else {
            return false;
        };
        let cell = self.cells[index];
        if cell >= UPDATE_MARKER {
            return false;
        }
        self.update_indices.push(index);
        self.cells[index] = table.lookup(cell) + UPDATE_MARKER;
        self.mark_known(coord);
        true
    }

    /// End the current batch: clear update markers.
    ///
    /// Returns the number of cells updated in the batch.
    pub fn finish_update(&mut self) -> usize {
        let updated = self.update_indices.len();
        for index in self.update_indices.drain(..) {
            debug_assert!(self.cells[index] >= UPDATE_MARKER);
            self.cells[index] -= UPDATE_MARKER;
        }
        updated
    }

    fn mark_known(&mut self, coord: GridCoord) {
        match self.known_cells_box.as_mut() {
            Some(b) => b.extend(coord),
            None => self.known_cells_box = Some(CellBox::around(coord)),
        }
    }

    /// Clear all cells to unknown.
    pub fn clear(&mut self) {
        self.cells.fill(UNKNOWN_PROBABILITY_VALUE);
        self.update_indices.clear();
        self.known_cells_box = None;
    }

    // === Grid Growth ===

    /// Grow the grid until it contains `point`.
    ///
    /// Each step doubles both dimensions, keeping the existing content
    /// centered. Growth stops at [`max_limits`](Self::max_limits); in that
    /// case the grid keeps its last size and false is returned. Must not be
    /// called in the middle of an update batch.
    pub fn grow_limits(&mut self, point: WorldPoint) -> bool {
        debug_assert!(self.update_indices.is_empty());

        while !self.limits.contains_point(point) {
            let old = self.cell_limits();
            let new = CellLimits::new(
                old.num_x_cells
                    .saturating_mul(2)
                    .min(self.max_limits.num_x_cells)
                    .max(old.num_x_cells),
                old.num_y_cells
                    .saturating_mul(2)
                    .min(self.max_limits.num_y_cells)
                    .max(old.num_y_cells),
            );
            if new == old {
                return false;
            }
            self.resize(new);
        }
        true
    }

    fn resize(&mut self, new: CellLimits) {
        let old = self.cell_limits();
        let offset = GridCoord::new(
            (new.num_x_cells - old.num_x_cells) / 2,
            (new.num_y_cells - old.num_y_cells) / 2,
        );
        let resolution = self.resolution();
        let origin = self.limits.origin();

        let old_width = old.num_x_cells as usize;
        let new_width = new.num_x_cells as usize;
        let mut cells = vec![UNKNOWN_PROBABILITY_VALUE; new.cell_count()];
        for y in 0..old.num_y_cells as usize {
            let old_row_start = y * old_width;
            let new_row_start = (y + offset.y as usize) * new_width + offset.x as usize;
            cells[new_row_start..new_row_start + old_width]
                .copy_from_slice(&self.cells[old_row_start..old_row_start + old_width]);
        }

        log::debug!(
            "Grid grown from {}x{} to {}x{} cells",
            old.num_x_cells,
            old.num_y_cells,
            new.num_x_cells,
            new.num_y_cells
        );

        self.cells = cells;
        self.limits = MapLimits::new(
            resolution,
            WorldPoint::new(
                origin.x - offset.x as f32 * resolution,
                origin.y - offset.y as f32 * resolution,
            ),
            new,
        );
        if let Some(b) = self.known_cells_box.as_mut() {
            b.min = b.min + offset;
            b.max = b.max + offset;
        }
    }
}
