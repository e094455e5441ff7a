//! Package entry-point (barrel) location.
//!
//! Search order, first hit wins:
//!
//! 1. a root index file (`index.ts`, `index.tsx`, ...)
//! 2. the manifest `exports` root entry
//! 3. manifest `main`
//! 4. manifest `module`
//! 5. `<source_dir>/index.*`
//!
//! Manifest targets are resolved like relative specifiers from the package
//! root, so a compiled target such as `./dist/index.js` is first retried as
//! `./dist/index.ts` and `./dist/index.tsx`.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, emit};
use crate::module::{normalize_relative_path, relative_to_root};
use crate::package_json::PackageJson;
use crate::resolver::{Resolution, SpecifierResolver};

const COMPONENT: &str = "entry";

/// Where the barrel was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarrelSource {
    RootIndex,
    Exports,
    Main,
    Module,
    SourceIndex,
}

/// A located barrel file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarrelLocation {
    /// Package-relative path.
    pub file: String,
    pub source: BarrelSource,
}

/// Find the package's barrel file.
pub fn locate_barrel(
    resolver: &SpecifierResolver<'_>,
    manifest: Option<&PackageJson>,
    sink: &mut dyn DiagnosticSink,
) -> Option<BarrelLocation> {
    let options = resolver.options();

    if let Some(file) = find_index(resolver, "") {
        return Some(found(file, BarrelSource::RootIndex));
    }

    if let Some(manifest) = manifest {
        let fields = [
            (manifest.exports_entry(), BarrelSource::Exports),
            (manifest.main(), BarrelSource::Main),
            (manifest.module(), BarrelSource::Module),
        ];
        for (target, source) in fields {
            let Some(target) = target else { continue };
            if let Some(file) = resolve_manifest_target(resolver, target, sink) {
                return Some(found(file, source));
            }
        }
    }

    let source_dir = normalize_relative_path(&options.source_dir);
    if let Some(file) = find_index(resolver, &source_dir) {
        return Some(found(file, BarrelSource::SourceIndex));
    }

    None
}

fn found(file: String, source: BarrelSource) -> BarrelLocation {
    tracing::debug!(barrel = %file, ?source, "Located barrel");
    BarrelLocation { file, source }
}

/// First existing `<dir>/index.<ext>`.
fn find_index(resolver: &SpecifierResolver<'_>, dir: &str) -> Option<String> {
    let root = resolver.root();
    resolver
        .options()
        .index_files()
        .into_iter()
        .map(|file| {
            if dir.is_empty() {
                file
            } else {
                format!("{dir}/{file}")
            }
        })
        .find(|relative| resolver.runtime().is_file(&root.join(relative)))
}

/// Resolve a manifest path (`./dist/index.js`, `lib/main.js`) to a file.
pub fn resolve_manifest_target(
    resolver: &SpecifierResolver<'_>,
    target: &str,
    sink: &mut dyn DiagnosticSink,
) -> Option<String> {
    let specifier = as_relative_specifier(target);
    match resolver.classify(&specifier, resolver.root()) {
        Resolution::Resolved(path) => relative_to_root(&path, resolver.root()),
        Resolution::OutsideRoot(err) => {
            emit(
                sink,
                Diagnostic::warn(
                    DiagnosticCode::BoundaryViolation,
                    COMPONENT,
                    format!("manifest target '{target}' escapes the package root ({err})"),
                ),
            );
            None
        }
        Resolution::External | Resolution::NotFound { .. } => {
            tracing::debug!(target, "Manifest target does not exist");
            None
        }
    }
}

fn as_relative_specifier(target: &str) -> String {
    let target = target.trim_start_matches('/');
    if target.starts_with("./") || target.starts_with("../") {
        target.to_string()
    } else {
        format!("./{target}")
    }
}
