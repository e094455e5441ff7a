use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::enums::*;

/// Available pkgdoc subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the symbol graph of a package
    ///
    /// Reads the package's parsed-file records, resolves every public
    /// export to its defining file, and prints the graph.
    Resolve(ResolveArgs),

    /// Build symbol graphs for several packages
    ///
    /// Reads a JSON array of `{ "root": ..., "files": [...] }` objects and
    /// builds every package in parallel.
    Batch(BatchArgs),

    /// Show which file is the package barrel and how it was found
    Locate(LocateArgs),

    /// Print the effective configuration after all layers are merged
    Config(ConfigArgs),
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Parsed-file records (JSON array), or `-` for stdin
    ///
    /// Each record carries `relativePath`, `exports`, and `imports` for one
    /// source file of the package.
    #[arg(short, long, value_name = "FILE")]
    pub files: PathBuf,

    /// Package root directory
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with an error when a diagnostic at or above this level is reported
    #[arg(long, value_enum, default_value = "never")]
    pub fail_on: FailOn,
}

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON array of packages, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub packages: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with an error when any package reports a diagnostic at or above this level
    #[arg(long, value_enum, default_value = "never")]
    pub fail_on: FailOn,
}

/// Arguments for the locate command
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Package root directory
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "summary")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Package root directory
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Serialization format
    #[arg(long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}
