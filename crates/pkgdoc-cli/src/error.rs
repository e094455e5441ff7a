//! Error handling for the pkgdoc CLI.
//!
//! Resolution problems inside a package are diagnostics, not errors. The
//! variants here cover the outer edges: unreadable inputs, invalid
//! records, bad configuration, and a `--fail-on` threshold being hit.

use std::path::PathBuf;

use miette::Report;
use pkgdoc_config::ConfigError;
use pkgdoc_graph::DiagnosticLevel;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Parsed-file records could not be loaded
    #[error("Invalid input: {0}")]
    Input(#[from] pkgdoc_graph::Error),

    /// An input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from reading stdin or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The effective configuration could not be rendered as TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Diagnostics at or above the `--fail-on` level were reported
    #[error("{count} diagnostic(s) at or above {level:?} level")]
    DiagnosticsFailed {
        count: usize,
        level: DiagnosticLevel,
    },
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Convert a CLI error into a miette report with a hint where one helps.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::NotFound(path)) => miette::miette!(
            "Config file not found: {}\n\nHint: Paths given to --config are relative to the package root",
            path.display()
        ),
        CliError::Config(e @ ConfigError::InvalidValue { .. }) => miette::miette!(
            "{}\n\nHint: Run 'pkgdoc config' to see the effective configuration",
            e
        ),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Input(pkgdoc_graph::Error::InvalidRecords(e)) => miette::miette!(
            "Invalid parsed file records: {}\n\nHint: Input must be a JSON array of {{ relativePath, exports, imports }} records",
            e
        ),
        CliError::FileNotFound(path) => miette::miette!(
            "File not found: {}\n\nHint: Pass `-` to read from stdin",
            path.display()
        ),
        CliError::DiagnosticsFailed { count, level } => miette::miette!(
            "{} diagnostic(s) at or above {:?} level\n\nHint: Lower the threshold with --fail-on or rerun with --verbose",
            count,
            level
        ),
        _ => miette::miette!("{}", err),
    }
}
