//! Configuration types for the probability grid and range data inserter.

use serde::{Deserialize, Serialize};

use crate::config::ParameterDictionary;
use crate::core::WorldPoint;
use crate::error::{ConfigError, Result};

use super::map_limits::{CellLimits, MapLimits};
use super::probability_grid::ProbabilityGrid;

/// Grid configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProbabilityGridConfig {
    /// Meters per cell (e.g., 0.05 = 5cm cells)
    #[serde(default = "default_resolution")]
    pub resolution: f32,

    /// Initial grid width in cells
    #[serde(default = "default_grid_size")]
    pub initial_width: usize,

    /// Initial grid height in cells
    #[serde(default = "default_grid_size")]
    pub initial_height: usize,

    /// Maximum grid width in cells (to limit memory)
    #[serde(default = "default_max_grid_size")]
    pub max_width: usize,

    /// Maximum grid height in cells (to limit memory)
    #[serde(default = "default_max_grid_size")]
    pub max_height: usize,

    /// World coordinates of cell (0,0) corner
    /// If None, grid will be centered at origin
    #[serde(default)]
    pub origin: Option<WorldPoint>,
}

fn default_resolution() -> f32 {
    0.05 // 5cm cells
}

fn default_grid_size() -> usize {
    200 // 10m at 5cm
}

fn default_max_grid_size() -> usize {
    4000 // 200m at 5cm
}

impl Default for ProbabilityGridConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            initial_width: default_grid_size(),
            initial_height: default_grid_size(),
            max_width: default_max_grid_size(),
            max_height: default_max_grid_size(),
            origin: None,
        }
    }
}

impl ProbabilityGridConfig {
    /// Create a configuration for a specific area size (in meters)
    ///
    /// Nothing is checked here; [`validate`](Self::validate) rejects a bad
    /// resolution or an area too large to allocate.
    pub fn for_area(width_m: f32, height_m: f32, resolution: f32) -> Self {
        let width = (width_m / resolution).ceil() as usize;
        let height = (height_m / resolution).ceil() as usize;

        Self {
            resolution,
            initial_width: width,
            initial_height: height,
            max_width: width.saturating_mul(4),
            max_height: height.saturating_mul(4),
            origin: None,
        }
    }

    /// Read from a parameter dictionary.
    ///
    /// `resolution` is required; sizes fall back to defaults and must be
    /// non-negative integers. `origin`, if present, is a nested dictionary
    /// with `x` and `y`.
    pub fn from_dictionary(dict: &ParameterDictionary) -> Result<Self> {
        let defaults = Self::default();
        let size = |key: &str, default: usize| -> Result<usize> {
            if !dict.has_key(key) {
                return Ok(default);
            }
            usize::try_from(dict.get_i64(key)?).map_err(|_| ConfigError::InvalidType {
                key: key.to_string(),
                expected: "non-negative integer",
            })
        };
        let origin = if dict.has_key("origin") {
            let origin = dict.get_dictionary("origin")?;
            Some(WorldPoint::new(
                origin.get_f64("x")? as f32,
                origin.get_f64("y")? as f32,
            ))
        } else {
            None
        };

        let config = Self {
            resolution: dict.get_f64("resolution")? as f32,
            initial_width: size("initial_width", defaults.initial_width)?,
            initial_height: size("initial_height", defaults.initial_height)?,
            max_width: size("max_width", defaults.max_width)?,
            max_height: size("max_height", defaults.max_height)?,
            origin,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check resolution and sizes.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(ConfigError::InvalidResolution(f64::from(self.resolution)));
        }
        let fits = |v: usize| v > 0 && i32::try_from(v).is_ok();
        if !(fits(self.initial_width)
            && fits(self.initial_height)
            && fits(self.max_width)
            && fits(self.max_height))
            || self.initial_width > self.max_width
            || self.initial_height > self.max_height
        {
            return Err(ConfigError::InvalidGridSize {
                width: self.initial_width,
                height: self.initial_height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }
        Ok(())
    }

    /// Initial placement of the grid.
    pub fn map_limits(&self) -> MapLimits {
        let cells = CellLimits::new(self.initial_width as i32, self.initial_height as i32);
        match self.origin {
            Some(origin) => MapLimits::new(self.resolution, origin, cells),
            None => MapLimits::centered(self.resolution, cells),
        }
    }

    /// Validate and allocate an empty grid.
    pub fn build(&self) -> Result<ProbabilityGrid> {
        self.validate()?;
        Ok(ProbabilityGrid::with_max_limits(
            self.map_limits(),
            CellLimits::new(self.max_width as i32, self.max_height as i32),
        ))
    }
}

/// Options for [`RangeDataInserter`](super::RangeDataInserter).
///
/// Probabilities describe a single observation: a return makes its cell
/// occupied with `hit_probability`; a beam passing through a cell makes it
/// occupied with `miss_probability`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeDataInserterOptions {
    /// Occupancy probability of a cell containing a return.
    #[serde(default = "default_hit_probability")]
    pub hit_probability: f32,

    /// Occupancy probability of a cell traversed by a beam.
    #[serde(default = "default_miss_probability")]
    pub miss_probability: f32,

    /// Mark cells between the origin and each endpoint as free.
    #[serde(default = "default_true")]
    pub insert_free_space: bool,
}

fn default_hit_probability() -> f32 {
    0.55
}

fn default_miss_probability() -> f32 {
    0.49
}

fn default_true() -> bool {
    true
}

impl Default for RangeDataInserterOptions {
    fn default() -> Self {
        Self {
            hit_probability: default_hit_probability(),
            miss_probability: default_miss_probability(),
            insert_free_space: true,
        }
    }
}

impl RangeDataInserterOptions {
    /// Read from a parameter dictionary.
    ///
    /// `hit_probability` and `miss_probability` are required;
    /// `insert_free_space` defaults to true.
    pub fn from_dictionary(dict: &ParameterDictionary) -> Result<Self> {
        let insert_free_space = if dict.has_key("insert_free_space") {
            dict.get_bool("insert_free_space")?
        } else {
            true
        };
        let options = Self {
            hit_probability: dict.get_f64("hit_probability")? as f32,
            miss_probability: dict.get_f64("miss_probability")? as f32,
            insert_free_space,
        };
        options.validate()?;
        Ok(options)
    }

    /// Check both probabilities lie in the open interval (0, 1).
    pub fn validate(&self) -> Result<()> {
        check_probability("hit_probability", self.hit_probability)?;
        check_probability("miss_probability", self.miss_probability)?;
        if self.hit_probability <= 0.5 {
            log::warn!(
                "hit_probability {} does not raise occupancy",
                self.hit_probability
            );
        }
        if self.miss_probability >= 0.5 {
            log::warn!(
                "miss_probability {} does not lower occupancy",
                self.miss_probability
            );
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}
