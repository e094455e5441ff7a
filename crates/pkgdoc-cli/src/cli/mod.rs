//! Command-line interface definition for pkgdoc.
//!
//! # Command Structure
//!
//! - `pkgdoc resolve` - Build the symbol graph of one package
//! - `pkgdoc batch` - Build symbol graphs for many packages in parallel
//! - `pkgdoc locate` - Report which file is the package barrel
//! - `pkgdoc config` - Print the effective configuration

mod commands;
pub mod enums;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{BatchArgs, Command, ConfigArgs, LocateArgs, ResolveArgs};
pub use enums::*;

/// pkgdoc - public API resolution for JavaScript/TypeScript packages
#[derive(Parser, Debug)]
#[command(
    name = "pkgdoc",
    version,
    about = "Resolve the public API of JavaScript/TypeScript packages",
    long_about = "pkgdoc determines what a package actually exports. It locates the barrel file,\n\
                  follows re-export chains to their declarations, expands `export *`, and falls\n\
                  back to CLI bin entries when a package has no conventional entry point.\n\n\
                  Input is the per-file export/import records produced by a parser, as JSON."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file merged above pkgdoc.toml and pkgdoc.json
    ///
    /// Relative paths are taken from the package root.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
