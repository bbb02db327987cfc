//! Error types for VastuGrid

/// Result type alias
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors.
///
/// These are raised when an inserter, grid or search space is constructed
/// from invalid settings. Mapping and search operations themselves never
/// fail once construction succeeded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Probability outside the open interval (0, 1)
    #[error("Invalid probability for '{name}': {value} (must be in (0, 1))")]
    InvalidProbability {
        /// Option name
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// Grid resolution not strictly positive and finite
    #[error("Invalid resolution: {0} (must be > 0)")]
    InvalidResolution(f64),

    /// Negative or non-finite search window
    #[error("Invalid search window for '{name}': {value}")]
    InvalidSearchWindow {
        /// Option name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Grid dimensions that cannot be allocated
    #[error("Invalid grid size: {width}x{height} (max {max_width}x{max_height})")]
    InvalidGridSize {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
        /// Maximum width in cells
        max_width: usize,
        /// Maximum height in cells
        max_height: usize,
    },

    /// Required key missing from a parameter dictionary
    #[error("Missing key: {0}")]
    MissingKey(String),

    /// Key present but holding a value of the wrong type
    #[error("Key '{key}' is not a {expected}")]
    InvalidType {
        /// Dictionary key
        key: String,
        /// Expected type name
        expected: &'static str,
    },

    /// I/O error while reading a settings file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}
