//! Multi-package driver.
//!
//! Packages share nothing during resolution, so each one gets its own guard
//! sets and diagnostics and they are built in parallel.

use std::path::PathBuf;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GraphOptions;
use crate::diagnostics::Diagnostics;
use crate::graph::{SymbolGraph, build_symbol_graph};
use crate::module::ParsedFile;
use crate::runtime::Runtime;

/// One package to analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInput {
    pub root: PathBuf,
    pub files: Vec<ParsedFile>,
}

impl PackageInput {
    pub fn new(root: impl Into<PathBuf>, files: Vec<ParsedFile>) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }
}

/// Graph and diagnostics for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOutput {
    pub root: PathBuf,
    pub graph: SymbolGraph,
    pub diagnostics: Diagnostics,
}

/// Build every package's graph, returning results in input order.
pub fn build_many(
    packages: &[PackageInput],
    runtime: &dyn Runtime,
    options: &GraphOptions,
) -> Vec<PackageOutput> {
    tracing::debug!(packages = packages.len(), "Building symbol graphs");
    packages
        .par_iter()
        .map(|package| {
            let mut diagnostics = Diagnostics::new();
            let graph = build_symbol_graph(
                &package.root,
                &package.files,
                runtime,
                options,
                &mut diagnostics,
            );
            PackageOutput {
                root: package.root.clone(),
                graph,
                diagnostics,
            }
        })
        .collect()
}
