//! Configuration loading for VastuGrid.
//!
//! Two ways in:
//!
//! - [`Settings`]: typed YAML with serde defaults for every field
//! - [`ParameterDictionary`]: untyped key/value lookup, used by the
//!   `from_dictionary` constructors where every required key must be present
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vastu_grid::config::Settings;
//!
//! // Load from default path (configs/config.yaml), or built-in defaults
//! let settings = Settings::load_default()?;
//!
//! let mut grid = settings.grid.build()?;
//! let inserter = RangeDataInserter::new(settings.range_data_inserter.clone())?;
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   resolution: 0.05        # 5cm cells
//!   initial_width: 200      # 10m
//!   max_width: 4000
//!
//! range_data_inserter:
//!   hit_probability: 0.55
//!   miss_probability: 0.49
//!   insert_free_space: true
//!
//! correlative_search:
//!   linear_search_window: 0.1      # meters
//!   angular_search_window: 0.349   # radians (~20°)
//! ```

mod dictionary;
mod settings;

pub use dictionary::ParameterDictionary;
pub use settings::{DEFAULT_SETTINGS_PATH, Settings};
