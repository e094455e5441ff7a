//! The symbol graph and the orchestrator that builds it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::chain::resolve_chain;
use crate::config::GraphOptions;
use crate::context::{Contribution, ResolveContext};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, emit};
use crate::entry::locate_barrel;
use crate::export::ExportEntry;
use crate::fallback::{bin_entry_exports, script_barrel_exports};
use crate::import::ImportEntry;
use crate::module::{FileIndex, ParsedFile};
use crate::package_json::PackageJson;
use crate::resolver::{SpecifierResolver, normalize_root};
use crate::runtime::Runtime;
use crate::star::expand_star;

const COMPONENT: &str = "graph";

const CIRCULAR: &str = "circular";
const UNRESOLVED: &str = "unresolved";

/// Where a public symbol is truly defined.
///
/// Serialized as the package-relative path, or as the sentinel strings
/// `"circular"` and `"unresolved"` when resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefinedIn {
    File(String),
    Circular,
    Unresolved,
}

impl DefinedIn {
    pub fn file(path: impl Into<String>) -> Self {
        Self::File(path.into())
    }

    pub fn as_file(&self) -> Option<&str> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::File(path) => path,
            Self::Circular => CIRCULAR,
            Self::Unresolved => UNRESOLVED,
        }
    }
}

impl std::fmt::Display for DefinedIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DefinedIn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DefinedIn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(match value.as_str() {
            CIRCULAR => Self::Circular,
            UNRESOLVED => Self::Unresolved,
            _ => Self::File(value),
        })
    }
}

/// A public export together with its defining file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedExport {
    #[serde(flatten)]
    pub export: ExportEntry,
    pub defined_in: DefinedIn,
}

impl ResolvedExport {
    pub fn new(export: ExportEntry, defined_in: DefinedIn) -> Self {
        Self { export, defined_in }
    }

    pub fn name(&self) -> &str {
        &self.export.name
    }
}

/// Resolved public surface of one package.
///
/// Built once by [`build_symbol_graph`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolGraph {
    pub barrel_file: Option<String>,
    pub barrel_exports: Vec<ResolvedExport>,
    pub all_exports: BTreeMap<String, Vec<ExportEntry>>,
    pub import_graph: BTreeMap<String, Vec<ImportEntry>>,
    pub barrel_source_files: BTreeSet<String>,
}

impl SymbolGraph {
    /// True when no public export was determined.
    pub fn is_empty(&self) -> bool {
        self.barrel_exports.is_empty()
    }

    /// Public names in barrel order.
    pub fn public_names(&self) -> impl Iterator<Item = &str> {
        self.barrel_exports.iter().map(ResolvedExport::name)
    }

    /// Public exports whose definition lives in `file`.
    pub fn exports_defined_in<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a ResolvedExport> {
        self.barrel_exports
            .iter()
            .filter(move |export| export.defined_in.as_file() == Some(file))
    }

    /// True when `file` contributed to the public surface.
    pub fn is_public_source(&self, file: &str) -> bool {
        self.barrel_source_files.contains(file)
    }

    /// Public exports whose resolution ended in a sentinel.
    pub fn unresolved_exports(&self) -> impl Iterator<Item = &ResolvedExport> {
        self.barrel_exports
            .iter()
            .filter(|export| !export.defined_in.is_resolved())
    }
}

/// Build the symbol graph for the package rooted at `root`.
///
/// `files` are the parsed records of the package, keyed by their
/// package-relative paths. Filesystem checks and the manifest read go
/// through `runtime`. Recoverable problems are reported to `sink`; the
/// function always returns a graph.
pub fn build_symbol_graph(
    root: &Path,
    files: &[ParsedFile],
    runtime: &dyn Runtime,
    options: &GraphOptions,
    sink: &mut dyn DiagnosticSink,
) -> SymbolGraph {
    let root = normalize_root(root);
    let span = tracing::info_span!("build_symbol_graph", root = %root.display());
    let _guard = span.enter();

    let index = FileIndex::new(files);
    let mut graph = SymbolGraph::default();
    for (path, file) in index.iter() {
        graph.all_exports.insert(path.to_string(), file.exports.clone());
        graph.import_graph.insert(path.to_string(), file.imports.clone());
    }

    let specifiers = SpecifierResolver::new(&root, runtime, options);
    let manifest = PackageJson::load(runtime, &root, options, sink);
    let mut ctx = ResolveContext::new(specifiers, &index);

    let barrel = locate_barrel(&ctx.specifiers, manifest.as_ref(), sink);

    let Some(barrel) = barrel else {
        emit(
            sink,
            Diagnostic::info(DiagnosticCode::BarrelAbsent, "entry", "no barrel file found"),
        );
        let fallback = manifest
            .as_ref()
            .map(|manifest| bin_entry_exports(&mut ctx, manifest, sink))
            .unwrap_or_default();
        if fallback.is_empty() {
            emit_no_public_api(sink);
        } else {
            emit_fallback_used(sink, "bin entry", None);
            apply(&mut graph, fallback);
        }
        tracing::debug!(exports = graph.barrel_exports.len(), "Built symbol graph");
        return graph;
    };

    let barrel_file = barrel.file;
    graph.barrel_file = Some(barrel_file.clone());
    graph.barrel_source_files.insert(barrel_file.clone());

    let resolved = resolve_barrel(&mut ctx, &barrel_file, sink);
    if resolved.is_empty() {
        emit(
            sink,
            Diagnostic::info(DiagnosticCode::BarrelEmpty, "entry", "barrel file has no exports")
                .with_file(barrel_file.as_str()),
        );

        let bin = manifest
            .as_ref()
            .map(|manifest| bin_entry_exports(&mut ctx, manifest, sink))
            .unwrap_or_default();
        if !bin.is_empty() {
            emit_fallback_used(sink, "bin entry", Some(&barrel_file));
            apply(&mut graph, bin);
        } else {
            let script = script_barrel_exports(&mut ctx, &barrel_file, sink);
            if script.is_empty() {
                emit_no_public_api(sink);
            } else {
                emit_fallback_used(sink, "script barrel", Some(&barrel_file));
                apply(&mut graph, script);
            }
        }
    } else {
        apply(&mut graph, resolved);
    }

    tracing::debug!(
        barrel = %barrel_file,
        exports = graph.barrel_exports.len(),
        sources = graph.barrel_source_files.len(),
        "Built symbol graph"
    );
    graph
}

/// Classify and resolve each top-level export of the barrel.
///
/// Names declared explicitly by the barrel shadow the same name arriving
/// through a wildcard; among wildcards the first occurrence wins.
fn resolve_barrel(
    ctx: &mut ResolveContext<'_>,
    barrel: &str,
    sink: &mut dyn DiagnosticSink,
) -> Contribution {
    let mut out = Contribution::default();
    let Some(parsed) = ctx.file(barrel) else {
        tracing::debug!(barrel, "Barrel file was not parsed");
        return out;
    };

    let explicit: FxHashSet<&str> = parsed
        .exports
        .iter()
        .filter(|export| !export.is_star_re_export())
        .map(|export| export.name.as_str())
        .collect();
    let mut seen: FxHashSet<String> = FxHashSet::default();

    for export in &parsed.exports {
        if export.is_star_re_export() {
            let Some(target) = export
                .re_export_source()
                .and_then(|source| ctx.resolve(source, barrel, sink))
            else {
                continue;
            };
            let expansion = expand_star(ctx, barrel, &target, export.is_type_only, sink);
            out.files.extend(expansion.files);
            for resolved in expansion.exports {
                let name = resolved.name();
                if explicit.contains(name) || seen.contains(name) {
                    tracing::debug!(name, from = %target, "Dropping shadowed wildcard export");
                    continue;
                }
                seen.insert(name.to_string());
                out.exports.push(resolved);
            }
            continue;
        }

        if !seen.insert(export.name.clone()) {
            tracing::debug!(name = %export.name, "Dropping duplicate barrel export");
            continue;
        }

        if export.is_re_export() {
            let chain = resolve_chain(ctx, export, barrel, sink);
            out.files.extend(chain.trail);
            out.exports.push(chain.export);
        } else {
            out.exports.push(ResolvedExport::new(
                export.clone(),
                DefinedIn::File(barrel.to_string()),
            ));
        }
    }

    out
}

fn apply(graph: &mut SymbolGraph, contribution: Contribution) {
    graph.barrel_exports = contribution.exports;
    graph.barrel_source_files.extend(contribution.files);
}

fn emit_fallback_used(sink: &mut dyn DiagnosticSink, extractor: &str, barrel: Option<&str>) {
    let mut diagnostic = Diagnostic::info(
        DiagnosticCode::FallbackUsed,
        COMPONENT,
        format!("public API taken from the {extractor} fallback"),
    );
    if let Some(barrel) = barrel {
        diagnostic = diagnostic.with_file(barrel);
    }
    emit(sink, diagnostic);
}

fn emit_no_public_api(sink: &mut dyn DiagnosticSink) {
    emit(
        sink,
        Diagnostic::info(DiagnosticCode::NoPublicApi, COMPONENT, "no public API determined"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportKind;

    fn resolved(name: &str, defined_in: DefinedIn) -> ResolvedExport {
        ResolvedExport::new(ExportEntry::new(name, ExportKind::Function), defined_in)
    }

    #[test]
    fn test_defined_in_serialization() {
        assert_eq!(
            serde_json::to_value(DefinedIn::file("src/a.ts")).unwrap(),
            "src/a.ts"
        );
        assert_eq!(serde_json::to_value(DefinedIn::Circular).unwrap(), "circular");
        let parsed: DefinedIn = serde_json::from_str("\"unresolved\"").unwrap();
        assert_eq!(parsed, DefinedIn::Unresolved);
    }

    #[test]
    fn test_resolved_export_flattens_entry() {
        let export = resolved("run", DefinedIn::file("src/run.ts"));
        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(value["name"], "run");
        assert_eq!(value["kind"], "function");
        assert_eq!(value["definedIn"], "src/run.ts");

        let back: ResolvedExport = serde_json::from_value(value).unwrap();
        assert_eq!(back, export);
    }

    #[test]
    fn test_read_model_helpers() {
        let mut graph = SymbolGraph::default();
        graph.barrel_exports = vec![
            resolved("a", DefinedIn::file("src/a.ts")),
            resolved("b", DefinedIn::file("src/b.ts")),
            resolved("c", DefinedIn::Circular),
        ];
        graph.barrel_source_files.insert("src/a.ts".to_string());

        assert_eq!(graph.public_names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(graph.exports_defined_in("src/b.ts").count(), 1);
        assert!(graph.is_public_source("src/a.ts"));
        assert!(!graph.is_public_source("src/b.ts"));
        assert_eq!(graph.unresolved_exports().count(), 1);
        assert!(!graph.is_empty());
    }
}
