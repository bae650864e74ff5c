//! Error types for habitboard-core
//!
//! Only loading (taxonomy seed files, config) can fail. Validation and
//! aggregation are total functions and report problems as data.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML in {path}: {message}")]
    TomlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse YAML in {path}: {message}")]
    YamlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported file format: {path} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    // ===================
    // Domain Errors
    // ===================
    #[error("Invalid taxonomy: {message}")]
    InvalidTaxonomy { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    /// Map an IO error on `path` to `FileNotFound` or `FileRead`
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CoreError::FileRead {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }

    /// Actionable hint for CLI output, if one applies
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoreError::FileNotFound { path } => {
                Some(format!("Check if file exists: ls {}", path.display()))
            }
            CoreError::FileRead { path, .. } => {
                Some(format!("Check permissions: chmod +r {}", path.display()))
            }
            CoreError::JsonParse { .. } => {
                Some("Validate JSON syntax with: jq . <file>".to_string())
            }
            CoreError::InvalidTaxonomy { .. } => Some(
                "Each tag must be kebab-case and belong to exactly one umbrella, or be contextual"
                    .to_string(),
            ),
            _ => None,
        }
    }
}
