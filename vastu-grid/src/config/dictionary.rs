//! Key/value parameter dictionary over a YAML mapping.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{ConfigError, Result};

/// Nested parameter dictionary.
///
/// Lookups are by string key; nested mappings are returned as their own
/// dictionaries. Numbers are read as `f64` whether written as integers or
/// floats.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterDictionary {
    values: Mapping,
}

impl ParameterDictionary {
    /// Wrap an existing mapping.
    pub fn new(values: Mapping) -> Self {
        Self { values }
    }

    /// Parse a YAML document whose top level is a mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::from_value("<root>", value)
    }

    /// Load a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    fn from_value(key: &str, value: Value) -> Result<Self> {
        match value {
            Value::Mapping(values) => Ok(Self { values }),
            // An empty document parses as null
            Value::Null => Ok(Self::default()),
            _ => Err(ConfigError::InvalidType {
                key: key.to_string(),
                expected: "dictionary",
            }),
        }
    }

    /// True if `key` is present.
    pub fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().filter_map(Value::as_str)
    }

    fn get(&self, key: &str) -> Result<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// Read a number.
    pub fn get_f64(&self, key: &str) -> Result<f64> {
        self.get(key)?
            .as_f64()
            .ok_or_else(|| ConfigError::InvalidType {
                key: key.to_string(),
                expected: "number",
            })
    }

    /// Read an integer.
    pub fn get_i64(&self, key: &str) -> Result<i64> {
        self.get(key)?
            .as_i64()
            .ok_or_else(|| ConfigError::InvalidType {
                key: key.to_string(),
                expected: "integer",
            })
    }

    /// Read a boolean.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)?
            .as_bool()
            .ok_or_else(|| ConfigError::InvalidType {
                key: key.to_string(),
                expected: "boolean",
            })
    }

    /// Read a nested dictionary.
    pub fn get_dictionary(&self, key: &str) -> Result<ParameterDictionary> {
        Self::from_value(key, self.get(key)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
resolution: 0.05
num_cells: 200
insert_free_space: false
range_data_inserter:
  hit_probability: 0.55
  miss_probability: 0.49
name: grid
"#;

    #[test]
    fn test_get_values() {
        let dict = ParameterDictionary::from_yaml(YAML).unwrap();
        assert_eq!(dict.get_f64("resolution").unwrap(), 0.05);
        assert_eq!(dict.get_f64("num_cells").unwrap(), 200.0);
        assert_eq!(dict.get_i64("num_cells").unwrap(), 200);
        assert!(!dict.get_bool("insert_free_space").unwrap());
        assert!(dict.has_key("name"));
        assert!(!dict.has_key("missing"));
    }

    #[test]
    fn test_nested_dictionary() {
        let dict = ParameterDictionary::from_yaml(YAML).unwrap();
        let inserter = dict.get_dictionary("range_data_inserter").unwrap();
        assert_eq!(inserter.get_f64("miss_probability").unwrap(), 0.49);
        assert_eq!(
            inserter.keys().collect::<Vec<_>>(),
            vec!["hit_probability", "miss_probability"]
        );
    }

    #[test]
    fn test_missing_key() {
        let dict = ParameterDictionary::from_yaml(YAML).unwrap();
        assert!(matches!(
            dict.get_f64("missing"),
            Err(ConfigError::MissingKey(key)) if key == "missing"
        ));
    }

    #[test]
    fn test_wrong_type() {
        let dict = ParameterDictionary::from_yaml(YAML).unwrap();
        assert!(matches!(
            dict.get_f64("name"),
            Err(ConfigError::InvalidType { expected: "number", .. })
        ));
        assert!(matches!(
            dict.get_bool("resolution"),
            Err(ConfigError::InvalidType { expected: "boolean", .. })
        ));
        assert!(matches!(
            dict.get_dictionary("resolution"),
            Err(ConfigError::InvalidType { expected: "dictionary", .. })
        ));
    }

    #[test]
    fn test_non_mapping_root() {
        assert!(ParameterDictionary::from_yaml("- 1\n- 2\n").is_err());
        assert!(ParameterDictionary::from_yaml("").unwrap().keys().next().is_none());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ParameterDictionary::from_yaml("a: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }
}
