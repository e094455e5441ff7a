//! # pkgdoc-graph
//!
//! Symbol graph and public API resolution for JavaScript/TypeScript packages.
//!
//! Given the per-file export/import records of a package (produced by an
//! external parsing stage) and access to the package directory, this crate
//! determines what the package's public API actually is:
//!
//! - locates the barrel file (root index, manifest `exports`/`main`/`module`,
//!   or `src/index`)
//! - follows named re-export chains to the declaring file, keeping aliases
//! - expands `export * from` into concrete members
//! - terminates on cycles with `circular` sentinels instead of errors
//! - falls back to CLI `bin` entries or a script barrel's imports when no
//!   conventional entry exists
//!
//! ## Architecture
//!
//! ```text
//! ParsedFile records ─┐
//!                     ▼
//!            build_symbol_graph ──► locate_barrel ──► SpecifierResolver
//!                     │                                   ▲
//!          ┌──────────┼───────────┐                       │
//!          ▼          ▼           ▼                       │
//!       chain       star      fallback (bin/script) ─────┘
//!                     │
//!                     ▼
//!               SymbolGraph
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pkgdoc_graph::{
//!     Diagnostics, ExportEntry, ExportKind, GraphOptions, NativeRuntime, ParsedFile,
//!     build_symbol_graph,
//! };
//! use std::path::Path;
//!
//! let files = vec![
//!     ParsedFile::builder("src/index.ts")
//!         .export(ExportEntry::star("./button"))
//!         .build(),
//!     ParsedFile::builder("src/button.ts")
//!         .export(ExportEntry::new("Button", ExportKind::Component))
//!         .build(),
//! ];
//!
//! let mut diagnostics = Diagnostics::new();
//! let graph = build_symbol_graph(
//!     Path::new("./my-package"),
//!     &files,
//!     &NativeRuntime::new(),
//!     &GraphOptions::default(),
//!     &mut diagnostics,
//! );
//!
//! for export in &graph.barrel_exports {
//!     println!("{} -> {}", export.export.name, export.defined_in);
//! }
//! ```
//!
//! ## Failure model
//!
//! Resolution never fails. Unresolved specifiers, boundary violations,
//! cycles, and malformed manifests are reported through a
//! [`DiagnosticSink`] and the graph is returned with whatever could be
//! determined. [`Error`] only covers invalid input records.

pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod entry;
pub mod export;
pub mod graph;
pub mod import;
pub mod module;
pub mod package_json;
pub mod resolver;
pub mod runtime;

mod chain;
mod context;
mod fallback;
mod star;

use std::path::Path;

pub use batch::{PackageInput, PackageOutput, build_many};
pub use config::{GraphOptions, MAX_PACKAGE_JSON_SIZE};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticLevel, DiagnosticSink, Diagnostics};
pub use entry::{BarrelLocation, BarrelSource, locate_barrel};
pub use export::{ExportEntry, ExportEntryError, ExportKind};
pub use graph::{DefinedIn, ResolvedExport, SymbolGraph, build_symbol_graph};
pub use import::ImportEntry;
pub use module::{FileIndex, ParsedFile};
pub use package_json::{BinTarget, PackageJson};
pub use resolver::{PathTraversalError, Resolution, SpecifierResolver};
pub use runtime::{MemoryRuntime, NativeRuntime, Runtime, RuntimeError, RuntimeResult};

/// Errors raised while loading engine inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parsed-file document is not valid JSON or violates record invariants.
    #[error("Invalid parsed file records: {0}")]
    InvalidRecords(#[from] serde_json::Error),

    /// The input could not be read.
    #[error("Failed to read input: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Result type alias for pkgdoc-graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse a JSON array of [`ParsedFile`] records.
pub fn parse_parsed_files(json: &str) -> Result<Vec<ParsedFile>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a JSON array of [`ParsedFile`] records.
pub fn load_parsed_files(runtime: &dyn Runtime, path: &Path, max_size: u64) -> Result<Vec<ParsedFile>> {
    let contents = runtime.read_to_string(path, max_size)?;
    parse_parsed_files(&contents)
}

#[cfg(test)]
mod tests;
