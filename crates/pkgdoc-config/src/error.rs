//! Error types for pkgdoc configuration.

use std::path::PathBuf;

use pkgdoc_graph::RuntimeError;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A config file exists but could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// Config file has an extension we cannot parse
    #[error("Unsupported config format: {} (expected .toml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The merged layers could not be extracted into a configuration
    #[error("Invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {hint}")]
    InvalidValue {
        /// Dotted path of the offending field
        field: String,
        /// What a valid value looks like
        hint: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            hint: hint.into(),
        }
    }
}
