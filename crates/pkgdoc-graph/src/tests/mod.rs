//! Package-level tests driven by an in-memory package fixture.

mod property_tests;

use std::path::Path;

use crate::{
    Diagnostics, GraphOptions, MemoryRuntime, ParsedFile, SymbolGraph, build_symbol_graph,
};

pub(crate) const ROOT: &str = "/pkg";

/// A package under [`ROOT`]: parsed records plus the files on "disk".
#[derive(Debug, Default)]
pub(crate) struct Fixture {
    runtime: MemoryRuntime,
    files: Vec<ParsedFile>,
    options: GraphOptions,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed file; it also exists on disk.
    pub fn file(mut self, parsed: ParsedFile) -> Self {
        self.runtime
            .insert(Path::new(ROOT).join(&parsed.relative_path), "");
        self.files.push(parsed);
        self
    }

    /// Add a file that exists on disk but was not parsed.
    pub fn disk_file(mut self, relative_path: &str, contents: &str) -> Self {
        self.runtime
            .insert(Path::new(ROOT).join(relative_path), contents);
        self
    }

    pub fn manifest(self, manifest: serde_json::Value) -> Self {
        let contents = manifest.to_string();
        self.disk_file("package.json", &contents)
    }

    pub fn options(mut self, options: GraphOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(&self) -> (SymbolGraph, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let graph = build_symbol_graph(
            Path::new(ROOT),
            &self.files,
            &self.runtime,
            &self.options,
            &mut diagnostics,
        );
        (graph, diagnostics)
    }
}

pub(crate) fn names(graph: &SymbolGraph) -> Vec<&str> {
    graph.public_names().collect()
}
