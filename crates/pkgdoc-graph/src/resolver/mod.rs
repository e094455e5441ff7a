//! Module specifier resolution.
//!
//! Maps a relative import/re-export specifier to a file inside the package.
//! Anything that does not start with `./` or `../` is an external
//! dependency and is never resolved. Candidates are generated from the
//! specifier's shape (see [`extensions`]) and every one of them must stay
//! inside the package root; a single escaping candidate rejects the whole
//! specifier.

mod extensions;
mod validation;

pub use extensions::{SpecifierShape, candidate_paths, classify_specifier};
pub use validation::{PathTraversalError, join_within_root, validate_path_within_root};

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::config::GraphOptions;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, emit};
use crate::import::is_relative_specifier;
use crate::module::{parent_dir, relative_to_root};
use crate::runtime::Runtime;

const COMPONENT: &str = "resolver";

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Resolved to an existing file inside the package.
    Resolved(PathBuf),
    /// Bare specifier; belongs to another package.
    External,
    /// No candidate exists.
    NotFound { candidates: usize },
    /// A candidate escaped the package root.
    OutsideRoot(PathTraversalError),
}

impl Resolution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Resolved(path) => Some(path),
            _ => None,
        }
    }
}

/// Resolves specifiers for one package.
#[derive(Debug, Clone, Copy)]
pub struct SpecifierResolver<'a> {
    root: &'a Path,
    runtime: &'a dyn Runtime,
    options: &'a GraphOptions,
}

impl<'a> SpecifierResolver<'a> {
    /// `root` must be absolute and cleaned; see [`normalize_root`].
    pub fn new(root: &'a Path, runtime: &'a dyn Runtime, options: &'a GraphOptions) -> Self {
        Self {
            root,
            runtime,
            options,
        }
    }

    pub fn root(&self) -> &'a Path {
        self.root
    }

    pub fn runtime(&self) -> &'a dyn Runtime {
        self.runtime
    }

    pub fn options(&self) -> &'a GraphOptions {
        self.options
    }

    /// Resolve `specifier` from the absolute directory `from_dir` without
    /// emitting diagnostics.
    pub fn classify(&self, specifier: &str, from_dir: &Path) -> Resolution {
        if !is_relative_specifier(specifier) {
            return Resolution::External;
        }

        let candidates = candidate_paths(specifier, self.options);
        let mut absolute = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            match join_within_root(from_dir, candidate, self.root) {
                Ok(path) => absolute.push(path),
                Err(err) => return Resolution::OutsideRoot(err),
            }
        }

        absolute
            .into_iter()
            .find(|path| self.runtime.is_file(path))
            .map_or(
                Resolution::NotFound {
                    candidates: candidates.len(),
                },
                Resolution::Resolved,
            )
    }

    /// Resolve `specifier` from `from_dir`, reporting misses to `sink`.
    ///
    /// External specifiers return `None` without a diagnostic. `file` names
    /// the package-relative file the specifier appears in, for reporting.
    pub fn resolve(
        &self,
        specifier: &str,
        from_dir: &Path,
        file: Option<&str>,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<PathBuf> {
        match self.classify(specifier, from_dir) {
            Resolution::Resolved(path) => {
                tracing::debug!(specifier, resolved = %path.display(), "Resolved specifier");
                Some(path)
            }
            Resolution::External => None,
            Resolution::NotFound { candidates } => {
                let mut diagnostic = Diagnostic::warn(
                    DiagnosticCode::UnresolvedSpecifier,
                    COMPONENT,
                    format!("unresolved specifier '{specifier}' ({candidates} candidates tried)"),
                );
                if let Some(file) = file {
                    diagnostic = diagnostic.with_file(file);
                }
                emit(sink, diagnostic);
                None
            }
            Resolution::OutsideRoot(err) => {
                let mut diagnostic = Diagnostic::warn(
                    DiagnosticCode::BoundaryViolation,
                    COMPONENT,
                    format!("boundary violation: specifier '{specifier}' escapes the package root ({err})"),
                );
                if let Some(file) = file {
                    diagnostic = diagnostic.with_file(file);
                }
                emit(sink, diagnostic);
                None
            }
        }
    }

    /// Resolve `specifier` as written in the package-relative file
    /// `from_file`, returning the target's package-relative path.
    pub fn resolve_from_file(
        &self,
        specifier: &str,
        from_file: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<String> {
        let from_dir = self.absolute(parent_dir(from_file));
        let resolved = self.resolve(specifier, &from_dir, Some(from_file), sink)?;
        relative_to_root(&resolved, self.root)
    }

    /// Absolute path of a package-relative path.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        if relative.is_empty() {
            self.root.to_path_buf()
        } else {
            self.root.join(relative).clean()
        }
    }
}

/// Make `root` absolute and lexically clean.
pub fn normalize_root(root: &Path) -> PathBuf {
    std::path::absolute(root)
        .unwrap_or_else(|_| root.to_path_buf())
        .clean()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MemoryRuntime;

    fn runtime() -> MemoryRuntime {
        MemoryRuntime::new()
            .with_file("/pkg/src/index.ts", "")
            .with_file("/pkg/src/utils.ts", "")
            .with_file("/pkg/src/widget.tsx", "")
            .with_file("/pkg/src/components/index.ts", "")
            .with_file("/pkg/src/legacy.js", "")
            .with_file("/pkg/src/data.json", "{}")
            .with_file("/pkg/src/a/b/c/deep.ts", "")
            .with_file("/outside.ts", "")
    }

    #[test]
    fn test_resolve_relative_ts_file() {
        let runtime = runtime();
        let options = GraphOptions::default();
        let resolver = SpecifierResolver::new(Path::new("/pkg"), &runtime, &options);
        let mut sink = Vec::new();

        let resolved = resolver.resolve_from_file("./utils", "src/index.ts", &mut sink);
        assert_eq!(resolved.as_deref(), Some("src/utils.ts"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_resolve_compiled_extension_to_source() {
        let runtime = runtime();
        let options = GraphOptions::default();
        let resolver = SpecifierResolver::new(Path::new("/pkg"), &runtime, &options);
        let mut sink = Vec::new();

        assert_eq!(
            resolver
                .resolve_from_file("./utils.js", "src/index.ts", &mut sink)
                .as_deref(),
            Some("src/utils.ts")
        );
        assert_eq!(
            resolver
                .resolve_from_file("./widget.js", "src/index.ts", &mut sink)
                .as_deref(),
            Some("src/widget.tsx")
        );
        // No sibling source: falls back to the compiled file itself
        assert_eq!(
            resolver
                .resolve_from_file("./legacy.js", "src/index.ts", &mut sink)
                .as_deref(),
            Some("src/legacy.js")
        );
    }

    #[test]
    fn test_resolve_index_and_dotted() {
        let runtime = runtime();
        let options = GraphOptions::default();
        let resolver = SpecifierResolver::new(Path::new("/pkg"), &runtime, &options);
        let mut sink = Vec::new();

        assert_eq!(
            resolver
                .resolve_from_file("./components", "src/index.ts", &mut sink)
                .as_deref(),
            Some("src/components/index.ts")
        );
        assert_eq!(
            resolver
                .resolve_from_file("./data.json", "src/index.ts", &mut sink)
                .as_deref(),
            Some("src/data.json")
        );
        assert_eq!(
            resolver
                .resolve_from_file("..", "src/components/index.ts", &mut sink)
                .as_deref(),
            Some("src/index.ts")
        );
    }

    #[test]
    fn test_external_specifier_is_silent() {
        let runtime = runtime();
        let options = GraphOptions::default();
        let resolver = SpecifierResolver::new(Path::new("/pkg"), &runtime, &options);
        let mut sink = Vec::new();

        assert_eq!(resolver.resolve_from_file("react", "src/index.ts", &mut sink), None);
        assert_eq!(
            resolver.classify("@scope/pkg/sub", Path::new("/pkg/src")),
            Resolution::External
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unresolved_specifier_reports() {
        let runtime = runtime();
        let options = GraphOptions::default();
        let resolver = SpecifierResolver::new(Path::new("/pkg"), &runtime, &options);
        let mut sink = Vec::new();

        assert_eq!(resolver.resolve_from_file("./missing", "src/index.ts", &mut sink), None);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code, DiagnosticCode::UnresolvedSpecifier);
        assert_eq!(sink[0].file.as_deref(), Some("src/index.ts"));
    }

    #[test]
    fn test_boundary_violation_from_deep_file() {
        let runtime = runtime();
        let options = GraphOptions::default();
        let resolver = SpecifierResolver::new(Path::new("/pkg"), &runtime, &options);
        let mut sink = Vec::new();

        // `/outside.ts` exists, but it lies outside the package
        let resolved =
            resolver.resolve_from_file("../../../../../outside", "src/a/b/c/deep.ts", &mut sink);
        assert_eq!(resolved, None);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code, DiagnosticCode::BoundaryViolation);
    }

    #[test]
    fn test_boundary_rejects_whole_specifier() {
        let runtime = runtime();
        let options = GraphOptions::default();
        let resolver = SpecifierResolver::new(Path::new("/pkg"), &runtime, &options);

        // `./..` candidates such as `../index.ts` leave the root even though
        // other spellings would not
        let outcome = resolver.classify("..", Path::new("/pkg"));
        assert!(matches!(outcome, Resolution::OutsideRoot(_)));
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize_root(Path::new("/pkg/./sub/..")), PathBuf::from("/pkg"));
        assert!(normalize_root(Path::new("relative/pkg")).is_absolute());
    }
}
