//! Range data insertion into a probability grid.
//!
//! Each insertion is one update batch on the grid:
//! - the cell of every return receives a "hit" (table lookup)
//! - cells between the sensor origin and every return receive a "miss"
//! - cells between the origin and every miss endpoint, inclusive, receive a
//!   "miss"
//!
//! Hits are applied first. Because a cell is updated at most once per batch,
//! a return cell crossed by another beam keeps its hit, and a cell crossed by
//! many beams is only cleared once.

use crate::core::{GridCoord, RangeData, WorldPoint};
use crate::error::Result;

use super::config::RangeDataInserterOptions;
use super::probability_grid::ProbabilityGrid;
use super::probability_values::LookupTable;
use super::raycaster::BresenhamLine;

/// Inserts range data into a [`ProbabilityGrid`] using precomputed hit and
/// miss tables.
#[derive(Clone, Debug)]
pub struct RangeDataInserter {
    options: RangeDataInserterOptions,
    hit_table: LookupTable,
    miss_table: LookupTable,
}

impl RangeDataInserter {
    /// Build the inserter and its lookup tables.
    ///
    /// Fails if either probability lies outside (0, 1).
    pub fn new(options: RangeDataInserterOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            hit_table: LookupTable::for_probability(options.hit_probability),
            miss_table: LookupTable::for_probability(options.miss_probability),
            options,
        })
    }

    /// Inserter options.
    pub fn options(&self) -> &RangeDataInserterOptions {
        &self.options
    }

    /// Table applied to return cells.
    pub fn hit_table(&self) -> &LookupTable {
        &self.hit_table
    }

    /// Table applied to traversed cells.
    pub fn miss_table(&self) -> &LookupTable {
        &self.miss_table
    }

    /// Insert `range_data` into `grid`.
    ///
    /// The grid grows first, up to its maximum size, to cover the origin and
    /// every endpoint. Cells that still fall outside are skipped. Range data
    /// must already be in the grid's frame and contain finite coordinates.
    pub fn insert(&self, range_data: &RangeData, grid: &mut ProbabilityGrid) {
        if !grow_as_needed(range_data, grid) {
            log::warn!(
                "Range data exceeds maximum grid size {:?}, clipping",
                grid.max_limits()
            );
        }

        let limits = *grid.limits();
        let origin = limits.cell_index(range_data.origin.xy());

        let mut hits = 0usize;
        for point in &range_data.returns {
            if grid.apply_lookup_table(limits.cell_index(point.xy()), &self.hit_table) {
                hits += 1;
            }
        }

        let mut misses = 0usize;
        if self.options.insert_free_space {
            for point in &range_data.returns {
                let end = limits.cell_index(point.xy());
                misses += self.cast_miss_ray(grid, origin, end, false);
            }
            for point in &range_data.misses {
                let end = limits.cell_index(point.xy());
                misses += self.cast_miss_ray(grid, origin, end, true);
            }
        }

        let updated = grid.finish_update();
        log::trace!(
            "Inserted {} returns, {} misses: {} hit cells, {} miss cells",
            range_data.returns.len(),
            range_data.misses.len(),
            hits,
            misses
        );
        debug_assert_eq!(updated, hits + misses);
    }

    /// Apply the miss table along the ray `origin → end`.
    ///
    /// The end cell is included only when `include_end` is set. Returns the
    /// number of cells updated.
    fn cast_miss_ray(
        &self,
        grid: &mut ProbabilityGrid,
        origin: GridCoord,
        end: GridCoord,
        include_end: bool,
    ) -> usize {
        let mut updated = 0;
        let mut entered = false;

        for coord in BresenhamLine::new(origin, end) {
            if coord == end && !include_end {
                break;
            }
            if !grid.contains(coord) {
                // A straight ray that has left the grid never re-enters it
                if entered {
                    break;
                }
                continue;
            }
            entered = true;
            if grid.apply_lookup_table(coord, &self.miss_table) {
                updated += 1;
            }
        }

        updated
    }
}

/// Grow the grid to cover the bounding box of the range data.
///
/// Returns false if the grid hit its maximum size first.
fn grow_as_needed(range_data: &RangeData, grid: &mut ProbabilityGrid) -> bool {
    let origin = range_data.origin.xy();
    let (min, max) = range_data
        .returns
        .iter()
        .chain(range_data.misses.iter())
        .map(|p| p.xy())
        .fold((origin, origin), |(min, max), p| {
            (
                WorldPoint::new(min.x.min(p.x), min.y.min(p.y)),
                WorldPoint::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });

    let grown_min = grid.grow_limits(min);
    let grown_max = grid.grow_limits(max);
    grown_min && grown_max
}
