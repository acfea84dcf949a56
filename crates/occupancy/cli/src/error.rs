//! CLI error types

use occupancy_client::ClientError;
use thiserror::Error;

/// CLI error types
///
/// Only configuration and output problems end up here. A room that cannot
/// be read is rendered inline and never aborts the report.
#[derive(Debug, Error)]
pub enum CliError {
    /// Density client could not be constructed
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file is not valid TOML or fails room validation
    #[error("Configuration error: {path}: {source}")]
    Toml {
        /// Config file path
        path: String,
        source: toml::de::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
