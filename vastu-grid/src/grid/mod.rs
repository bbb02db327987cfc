//! Quantized occupancy grid with lookup-table updates.
//!
//! Each cell stores a 16-bit value: `0` means unknown, `1..=32767` map
//! linearly onto probabilities in `[0.1, 0.9]`. Bit 15 is the update marker
//! that guarantees a cell changes at most once per insertion.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 RangeData (grid frame)                  │
//! │        origin  │  returns (hits)  │  misses             │
//! └────────────────┴────────┬─────────┴─────────────────────┘
//!                           ▼
//!              ┌─────────────────────────┐
//!              │    RangeDataInserter    │
//!              │  hit table │ miss table │
//!              └────────────┬────────────┘
//!                           │  BresenhamLine rays
//!                           ▼
//!              ┌─────────────────────────┐
//!              │     ProbabilityGrid     │
//!              │ apply_lookup_table  ──▶ │
//!              │ finish_update           │
//!              └─────────────────────────┘
//! ```
//!
//! ## Update Model
//!
//! ```text
//! odds(p)   = p / (1 - p)
//! new_odds  = odds(cell) · odds(observation)
//! table[v]  = value(probability_from_odds(new_odds))   v ≠ 0
//! table[0]  = value(observation)                       first observation
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use vastu_grid::core::RangeData;
//! use vastu_grid::grid::{ProbabilityGridConfig, RangeDataInserter, RangeDataInserterOptions};
//!
//! let mut grid = ProbabilityGridConfig::default().build()?;
//! let inserter = RangeDataInserter::new(RangeDataInserterOptions::default())?;
//!
//! inserter.insert(&range_data, &mut grid);
//! let p = grid.probability(coord); // 0.1 - 0.9
//! ```

mod config;
mod map_limits;
mod probability_grid;
pub mod probability_values;
mod range_data_inserter;
pub mod raycaster;

pub use config::{ProbabilityGridConfig, RangeDataInserterOptions};
pub use map_limits::{CellLimits, MapLimits};
pub use probability_grid::{CellBox, ProbabilityGrid};
pub use probability_values::LookupTable;
pub use range_data_inserter::RangeDataInserter;
pub use raycaster::BresenhamLine;
