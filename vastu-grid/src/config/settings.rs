//! Top-level settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::{ProbabilityGridConfig, RangeDataInserterOptions};
use crate::matching::CorrelativeSearchConfig;

use super::dictionary::ParameterDictionary;

/// Default settings path, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "configs/config.yaml";

/// Full VastuGrid settings loaded from YAML
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Grid allocation and growth
    #[serde(default)]
    pub grid: ProbabilityGridConfig,

    /// Range data insertion
    #[serde(default)]
    pub range_data_inserter: RangeDataInserterOptions,

    /// Correlative search window
    #[serde(default)]
    pub correlative_search: CorrelativeSearchConfig,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&contents)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from [`DEFAULT_SETTINGS_PATH`], or use defaults if absent
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_SETTINGS_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{} not found, using defaults", DEFAULT_SETTINGS_PATH);
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build from a parameter dictionary.
    ///
    /// Missing sections fall back to defaults; present sections must carry
    /// their required keys.
    pub fn from_dictionary(dict: &ParameterDictionary) -> Result<Self> {
        let mut settings = Self::default();
        if dict.has_key("grid") {
            settings.grid = ProbabilityGridConfig::from_dictionary(&dict.get_dictionary("grid")?)?;
        }
        if dict.has_key("range_data_inserter") {
            settings.range_data_inserter = RangeDataInserterOptions::from_dictionary(
                &dict.get_dictionary("range_data_inserter")?,
            )?;
        }
        if dict.has_key("correlative_search") {
            settings.correlative_search = CorrelativeSearchConfig::from_dictionary(
                &dict.get_dictionary("correlative_search")?,
            )?;
        }
        Ok(settings)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.range_data_inserter.validate()?;
        self.correlative_search.validate()
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
