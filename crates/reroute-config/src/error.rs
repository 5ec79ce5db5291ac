//! Error types for configuration loading

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The route config file exists but cannot be read as a route tree
    #[error("invalid route config {}: {reason}", path.display())]
    RoutesFile { path: PathBuf, reason: String },

    #[error("invalid config value for `{field}`{}", hint.as_deref().map(|hint| format!(": {hint}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
