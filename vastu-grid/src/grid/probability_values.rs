//! Quantized occupancy probabilities and odds lookup tables.
//!
//! Cell occupancy is stored as a `u16`:
//!
//! ```text
//! 0            unknown (never observed)
//! 1 ..= 32767  probability in [MIN_PROBABILITY, MAX_PROBABILITY], linear
//! bit 15       update marker, set while an insertion is in progress
//! ```
//!
//! A Bayesian update multiplies the cell's odds by the observation odds:
//!
//! ```text
//! odds(p)  = p / (1 - p)
//! p_new    = from_odds(odds(p_obs) * odds(p_old))
//! ```
//!
//! [`LookupTable`] precomputes that product for every possible stored value
//! so the inserter does one array read per cell instead of float math.

use std::fmt;

/// Stored value for a cell that has never been observed.
pub const UNKNOWN_PROBABILITY_VALUE: u16 = 0;

/// Bit set on a cell while it has already been updated in the current
/// insertion.
pub const UPDATE_MARKER: u16 = 1 << 15;

/// Smallest value of an observed cell.
pub const MIN_VALUE: u16 = 1;

/// Largest value of an observed cell.
pub const MAX_VALUE: u16 = UPDATE_MARKER - 1;

/// Probability represented by [`MIN_VALUE`].
pub const MIN_PROBABILITY: f32 = 0.1;

/// Probability represented by [`MAX_VALUE`].
pub const MAX_PROBABILITY: f32 = 1.0 - MIN_PROBABILITY;

/// Number of entries in a lookup table: one per value below the marker.
pub const TABLE_SIZE: usize = UPDATE_MARKER as usize;

/// Odds of a probability.
#[inline]
pub fn odds(probability: f32) -> f32 {
    probability / (1.0 - probability)
}

/// Probability from odds.
#[inline]
pub fn probability_from_odds(odds: f32) -> f32 {
    odds / (odds + 1.0)
}

/// Clamp a probability into the representable range.
#[inline]
pub fn clamp_probability(probability: f32) -> f32 {
    probability.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

/// Quantize a probability to a stored value in `[MIN_VALUE, MAX_VALUE]`.
#[inline]
pub fn probability_to_value(probability: f32) -> u16 {
    let p = clamp_probability(probability);
    let scale = f32::from(MAX_VALUE - MIN_VALUE) / (MAX_PROBABILITY - MIN_PROBABILITY);
    let offset = ((p - MIN_PROBABILITY) * scale).round() as u16;
    offset.min(MAX_VALUE - MIN_VALUE) + MIN_VALUE
}

/// Probability represented by a stored value.
///
/// The update marker is ignored. Unknown cells report [`MIN_PROBABILITY`].
#[inline]
pub fn value_to_probability(value: u16) -> f32 {
    let value = value & !UPDATE_MARKER;
    if value == UNKNOWN_PROBABILITY_VALUE {
        return MIN_PROBABILITY;
    }
    let step = (MAX_PROBABILITY - MIN_PROBABILITY) / f32::from(MAX_VALUE - MIN_VALUE);
    MIN_PROBABILITY + f32::from(value - MIN_VALUE) * step
}

/// Precomputed result of applying fixed observation odds to every stored
/// value.
///
/// Entry 0 holds the result for an unknown cell, i.e. the observation
/// probability itself. Every entry lies in `[MIN_VALUE, MAX_VALUE]` and
/// carries no update marker.
#[derive(Clone, PartialEq, Eq)]
pub struct LookupTable {
    table: Box<[u16]>,
}

impl LookupTable {
    /// Build the table that applies `odds` to every stored value.
    pub fn for_odds(odds: f32) -> Self {
        let mut table = Vec::with_capacity(TABLE_SIZE);
        table.push(probability_to_value(probability_from_odds(odds)));
        for value in MIN_VALUE..=MAX_VALUE {
            let current = self::odds(value_to_probability(value));
            table.push(probability_to_value(probability_from_odds(odds * current)));
        }
        Self {
            table: table.into_boxed_slice(),
        }
    }

    /// Build the table for an observation with the given probability.
    pub fn for_probability(probability: f32) -> Self {
        Self::for_odds(odds(probability))
    }

    /// Updated value for a cell currently holding `value`.
    ///
    /// # Panics
    /// If `value` carries the update marker.
    #[inline]
    pub fn lookup(&self, value: u16) -> u16 {
        self.table[usize::from(value)]
    }

    /// All entries, indexed by current value.
    pub fn values(&self) -> &[u16] {
        &self.table
    }

    /// Number of entries (always [`TABLE_SIZE`]).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupTable")
            .field("len", &self.table.len())
            .field("unknown", &self.table[0])
            .finish()
    }
}
