//! Correlative search configuration.

use serde::{Deserialize, Serialize};

use crate::config::ParameterDictionary;
use crate::error::{ConfigError, Result};

/// Search window for correlative scan matching.
///
/// The search covers `±linear_search_window` in x and y and
/// `±angular_search_window` in heading, centred on the initial pose.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelativeSearchConfig {
    /// Half-width of the translational window (meters).
    #[serde(default = "default_linear_search_window")]
    pub linear_search_window: f64,

    /// Half-width of the rotational window (radians).
    #[serde(default = "default_angular_search_window")]
    pub angular_search_window: f64,
}

fn default_linear_search_window() -> f64 {
    0.1 // 10cm
}

fn default_angular_search_window() -> f64 {
    20f64.to_radians()
}

impl Default for CorrelativeSearchConfig {
    fn default() -> Self {
        Self {
            linear_search_window: default_linear_search_window(),
            angular_search_window: default_angular_search_window(),
        }
    }
}

impl CorrelativeSearchConfig {
    /// Create a config with explicit windows.
    pub fn new(linear_search_window: f64, angular_search_window: f64) -> Self {
        Self {
            linear_search_window,
            angular_search_window,
        }
    }

    /// Read from a parameter dictionary. Both windows are required.
    pub fn from_dictionary(dict: &ParameterDictionary) -> Result<Self> {
        let config = Self::new(
            dict.get_f64("linear_search_window")?,
            dict.get_f64("angular_search_window")?,
        );
        config.validate()?;
        Ok(config)
    }

    /// Check both windows are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        check_window("linear_search_window", self.linear_search_window)?;
        check_window("angular_search_window", self.angular_search_window)
    }
}

pub(super) fn check_window(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSearchWindow { name, value })
    }
}
