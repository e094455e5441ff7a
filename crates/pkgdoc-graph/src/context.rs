//! Per-package state shared by the chain resolver, star expander, and
//! fallback extractors.

use rustc_hash::FxHashSet;

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, emit};
use crate::graph::ResolvedExport;
use crate::module::{FileIndex, ParsedFile, relative_to_root};
use crate::resolver::{Resolution, SpecifierResolver};

/// Exports gathered by one extractor together with the files they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Contribution {
    pub exports: Vec<ResolvedExport>,
    pub files: Vec<String>,
}

impl Contribution {
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}

/// Everything needed to follow specifiers within one package.
///
/// Cycle guards are not stored here; each top-level resolution owns its own.
/// The context only remembers which cycles were already reported so the
/// same re-entry point produces a single diagnostic per package.
pub(crate) struct ResolveContext<'a> {
    pub specifiers: SpecifierResolver<'a>,
    pub files: &'a FileIndex<'a>,
    reported: FxHashSet<(DiagnosticCode, String, String)>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(specifiers: SpecifierResolver<'a>, files: &'a FileIndex<'a>) -> Self {
        Self {
            specifiers,
            files,
            reported: FxHashSet::default(),
        }
    }

    pub fn file(&self, relative_path: &str) -> Option<&'a ParsedFile> {
        self.files.get(relative_path)
    }

    /// Resolve `specifier` from `from_file`, reporting misses.
    pub fn resolve(
        &self,
        specifier: &str,
        from_file: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<String> {
        self.specifiers.resolve_from_file(specifier, from_file, sink)
    }

    /// Resolve `specifier` from `from_file` without reporting anything.
    pub fn resolve_quiet(&self, specifier: &str, from_file: &str) -> Option<String> {
        let from_dir = self
            .specifiers
            .absolute(crate::module::parent_dir(from_file));
        match self.specifiers.classify(specifier, &from_dir) {
            Resolution::Resolved(path) => relative_to_root(&path, self.specifiers.root()),
            _ => None,
        }
    }

    /// Emit `diagnostic` unless one with the same code was already emitted
    /// for `(file, name)`.
    pub fn report_once(
        &mut self,
        file: &str,
        name: &str,
        diagnostic: Diagnostic,
        sink: &mut dyn DiagnosticSink,
    ) {
        let key = (diagnostic.code, file.to_string(), name.to_string());
        if self.reported.insert(key) {
            emit(sink, diagnostic);
        }
    }
}
