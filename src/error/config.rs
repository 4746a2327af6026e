use std::path::PathBuf;
use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Config '{field}' must list at least one metric.")]
    EmptyMetricList { field: &'static str },
    #[error("Config '{field}' entry {index} has an empty metric key.")]
    EmptyMetricKey { field: &'static str, index: usize },
    #[error("Config cannot set both 'subject' and 'input'.")]
    ConflictingInputs,
    #[error("Config '{field}' must be > 0, got {value}.")]
    FieldMustBePositive { field: &'static str, value: f64 },
    #[error("Config '{field}' must be >= 0, got {value}.")]
    FieldMustBeNonNegative { field: &'static str, value: f64 },
    #[error("Invalid duration for '{field}': {source}")]
    InvalidDuration {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
