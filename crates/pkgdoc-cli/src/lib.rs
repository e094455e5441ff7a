//! pkgdoc CLI - public API resolution for JavaScript/TypeScript packages.
//!
//! A thin layer over `pkgdoc-graph`: it reads parsed-file records, loads
//! the layered configuration from `pkgdoc-config`, runs the engine, and
//! prints the resulting symbol graph. It performs no source parsing.
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - command implementations
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - summaries and status messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
