//! Error types
//!
//! Event handling itself never fails (detached elements and degenerate
//! geometry are defined no-op cases); errors only come from loading
//! configuration and from replaying scenarios.

use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is not valid TOML for the expected schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be written back out
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Scenario replay errors
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// Scenario file could not be read
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario is not valid JSON for the step schema
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// An assertion step did not hold
    #[error("Step {step}: {message}")]
    Assertion { step: usize, message: String },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
