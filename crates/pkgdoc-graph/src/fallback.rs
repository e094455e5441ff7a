//! Best-effort public API for packages without a usable barrel.
//!
//! Two extractors share one strategy. The CLI bin-entry extractor maps each
//! `bin` target back to its source file, takes that file's own exports, and
//! then looks one hop further into the files it imports. The script-barrel
//! extractor applies only the one-hop step to a barrel that exports nothing.

use rustc_hash::FxHashSet;

use crate::chain::{ChainResolution, resolve_chain};
use crate::context::{Contribution, ResolveContext};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, emit};
use crate::export::ExportEntry;
use crate::graph::{DefinedIn, ResolvedExport};
use crate::module::{ParsedFile, normalize_relative_path, relative_to_root};
use crate::package_json::PackageJson;
use crate::resolver::{candidate_paths, join_within_root};

const COMPONENT: &str = "fallback";

/// Exports reachable from the manifest's `bin` targets.
pub(crate) fn bin_entry_exports(
    ctx: &mut ResolveContext<'_>,
    manifest: &PackageJson,
    sink: &mut dyn DiagnosticSink,
) -> Contribution {
    let mut out = Contribution::default();
    let mut seen = FxHashSet::default();

    for target in manifest.bin_targets() {
        let Some(file) = map_bin_target(ctx, &target.path, sink) else {
            tracing::debug!(path = %target.path, "bin target has no parsed source");
            continue;
        };
        let Some(parsed) = ctx.file(&file) else { continue };

        tracing::debug!(
            command = target.command.as_deref().unwrap_or(""),
            file = %file,
            "Collecting bin entry exports"
        );
        out.files.push(file.clone());

        for export in parsed.exports.iter().filter(|e| !e.is_star_re_export()) {
            if seen.contains(&export.name) {
                continue;
            }
            let resolution = resolve_one(ctx, export, &file, sink);
            seen.insert(resolution.export.export.name.clone());
            out.files.extend(resolution.trail);
            out.exports.push(resolution.export);
        }

        collect_one_hop(ctx, parsed, &file, &mut seen, &mut out, sink);
    }

    out
}

/// Exports of the files a side-effect barrel imports.
pub(crate) fn script_barrel_exports(
    ctx: &mut ResolveContext<'_>,
    barrel: &str,
    sink: &mut dyn DiagnosticSink,
) -> Contribution {
    let mut out = Contribution::default();
    if let Some(parsed) = ctx.file(barrel) {
        let mut seen = FxHashSet::default();
        collect_one_hop(ctx, parsed, barrel, &mut seen, &mut out, sink);
    }
    out
}

/// Map a `bin` path to a parsed source file.
///
/// Build-output prefixes (`dist/`, `build/`, ...) are swapped for the source
/// directory first; both spellings are then expanded with the usual
/// specifier candidates and checked against the parsed file set.
fn map_bin_target(
    ctx: &ResolveContext<'_>,
    path: &str,
    sink: &mut dyn DiagnosticSink,
) -> Option<String> {
    let options = ctx.specifiers.options();
    let root = ctx.specifiers.root();
    let normalized = normalize_relative_path(path.trim_start_matches('/'));

    let mut spellings = Vec::with_capacity(2);
    for dir in &options.build_output_dirs {
        if let Some(rest) = normalized.strip_prefix(&format!("{dir}/")) {
            spellings.push(format!("{}/{rest}", options.source_dir));
            break;
        }
    }
    spellings.push(normalized);

    for spelling in spellings {
        for candidate in candidate_paths(&format!("./{spelling}"), options) {
            let absolute = match join_within_root(root, &candidate, root) {
                Ok(absolute) => absolute,
                Err(err) => {
                    emit(
                        sink,
                        Diagnostic::warn(
                            DiagnosticCode::BoundaryViolation,
                            COMPONENT,
                            format!("bin target '{path}' escapes the package root ({err})"),
                        ),
                    );
                    return None;
                }
            };
            let Some(relative) = relative_to_root(&absolute, root) else { continue };
            if ctx.files.contains(&relative) {
                return Some(relative);
            }
        }
    }
    None
}

/// Runtime, non-default exports of every file `parsed` imports relatively.
fn collect_one_hop(
    ctx: &mut ResolveContext<'_>,
    parsed: &ParsedFile,
    file: &str,
    seen: &mut FxHashSet<String>,
    out: &mut Contribution,
    sink: &mut dyn DiagnosticSink,
) {
    for import in parsed.relative_imports().filter(|i| !i.is_type_only) {
        let Some(target) = ctx.resolve(&import.module_specifier, file, sink) else {
            continue;
        };
        if target == file {
            continue;
        }
        let Some(imported) = ctx.file(&target) else { continue };

        let before = out.exports.len();
        for export in &imported.exports {
            if export.is_star_re_export()
                || export.is_default()
                || is_type_level(export)
                || seen.contains(&export.name)
            {
                continue;
            }
            let resolution = resolve_one(ctx, export, &target, sink);
            if is_type_level(&resolution.export.export) {
                continue;
            }
            seen.insert(resolution.export.export.name.clone());
            out.files.extend(resolution.trail);
            out.exports.push(resolution.export);
        }

        if out.exports.len() > before {
            out.files.push(target);
        }
    }
}

fn resolve_one(
    ctx: &mut ResolveContext<'_>,
    export: &ExportEntry,
    file: &str,
    sink: &mut dyn DiagnosticSink,
) -> ChainResolution {
    if export.is_re_export() {
        return resolve_chain(ctx, export, file, sink);
    }
    ChainResolution {
        export: ResolvedExport::new(export.clone(), DefinedIn::File(file.to_string())),
        trail: Vec::new(),
    }
}

fn is_type_level(export: &ExportEntry) -> bool {
    export.is_type_only || export.kind.is_type_level()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphOptions;
    use crate::export::ExportKind;
    use crate::import::ImportEntry;
    use crate::module::FileIndex;
    use crate::resolver::SpecifierResolver;
    use crate::runtime::MemoryRuntime;
    use serde_json::json;
    use std::path::Path;

    fn cli_files() -> Vec<ParsedFile> {
        vec![
            ParsedFile::builder("src/cli.ts")
                .export(ExportEntry::new("main", ExportKind::Function))
                .import(ImportEntry::new("./commands/build", ["build"]))
                .import(ImportEntry::new("./commands/serve", ["serve"]))
                .import(ImportEntry::new("./types", ["Config"]).type_only())
                .import(ImportEntry::new("commander", ["Command"]))
                .build(),
            ParsedFile::builder("src/commands/build.ts")
                .export(ExportEntry::new("build", ExportKind::Function))
                .export(ExportEntry::new("BuildOptions", ExportKind::Interface))
                .export(ExportEntry::new("default", ExportKind::Function))
                .export(ExportEntry::new("main", ExportKind::Function))
                .build(),
            ParsedFile::builder("src/commands/serve.ts")
                .export(ExportEntry::new("serve", ExportKind::Function))
                .export(ExportEntry::new("ServeMode", ExportKind::Enum).with_type_only(true))
                .build(),
            ParsedFile::builder("src/types.ts")
                .export(ExportEntry::new("DEFAULTS", ExportKind::Const))
                .build(),
        ]
    }

    fn with_ctx<T>(
        files: &[ParsedFile],
        run: impl FnOnce(&mut ResolveContext<'_>, &mut Vec<Diagnostic>) -> T,
    ) -> (T, Vec<Diagnostic>) {
        let mut runtime = MemoryRuntime::new();
        for file in files {
            runtime.insert(Path::new("/pkg").join(&file.relative_path), "");
        }
        let options = GraphOptions::default();
        let index = FileIndex::new(files);
        let resolver = SpecifierResolver::new(Path::new("/pkg"), &runtime, &options);
        let mut ctx = ResolveContext::new(resolver, &index);
        let mut sink = Vec::new();
        let value = run(&mut ctx, &mut sink);
        (value, sink)
    }

    fn names(contribution: &Contribution) -> Vec<&str> {
        contribution
            .exports
            .iter()
            .map(|e| e.export.name.as_str())
            .collect()
    }

    #[test]
    fn test_bin_maps_dist_to_src_and_follows_one_hop() {
        let files = cli_files();
        let manifest: PackageJson =
            serde_json::from_value(json!({ "bin": { "tool": "./dist/cli.js" } })).unwrap();
        let (contribution, _) = with_ctx(&files, |ctx, sink| {
            bin_entry_exports(ctx, &manifest, sink)
        });

        assert_eq!(names(&contribution), vec!["main", "build", "serve"]);
        assert_eq!(
            contribution.exports[1].defined_in,
            DefinedIn::file("src/commands/build.ts")
        );
        assert!(contribution.files.contains(&"src/cli.ts".to_string()));
        assert!(!contribution.files.contains(&"src/types.ts".to_string()));
    }

    #[test]
    fn test_bin_without_source_yields_nothing() {
        let files = cli_files();
        let manifest: PackageJson =
            serde_json::from_value(json!({ "bin": "./dist/missing.js" })).unwrap();
        let (contribution, _) = with_ctx(&files, |ctx, sink| {
            bin_entry_exports(ctx, &manifest, sink)
        });
        assert!(contribution.is_empty());
    }

    #[test]
    fn test_bin_escaping_root_reports() {
        let files = cli_files();
        let manifest: PackageJson =
            serde_json::from_value(json!({ "bin": "../elsewhere/cli.js" })).unwrap();
        let (contribution, diagnostics) = with_ctx(&files, |ctx, sink| {
            bin_entry_exports(ctx, &manifest, sink)
        });
        assert!(contribution.is_empty());
        assert_eq!(diagnostics[0].code, DiagnosticCode::BoundaryViolation);
    }

    #[test]
    fn test_script_barrel_one_hop() {
        let mut files = cli_files();
        files.push(
            ParsedFile::builder("src/index.ts")
                .import(ImportEntry::new("./commands/serve", Vec::<String>::new()))
                .import(ImportEntry::new("./commands/build", ["build"]))
                .build(),
        );
        let (contribution, _) = with_ctx(&files, |ctx, sink| {
            script_barrel_exports(ctx, "src/index.ts", sink)
        });

        assert_eq!(names(&contribution), vec!["serve", "build", "main"]);
        assert_eq!(
            contribution.files,
            vec!["src/commands/serve.ts", "src/commands/build.ts"]
        );
    }

    #[test]
    fn test_forwarded_type_does_not_mark_sources() {
        let files = vec![
            ParsedFile::builder("src/index.ts")
                .import(ImportEntry::new("./a", Vec::<String>::new()))
                .build(),
            ParsedFile::builder("src/a.ts")
                .export(ExportEntry::new("run", ExportKind::Function))
                .export(ExportEntry::re_export("Shape", "./types"))
                .build(),
            ParsedFile::builder("src/types.ts")
                .export(ExportEntry::new("Shape", ExportKind::Interface))
                .build(),
        ];
        let (contribution, _) = with_ctx(&files, |ctx, sink| {
            script_barrel_exports(ctx, "src/index.ts", sink)
        });

        assert_eq!(names(&contribution), vec!["run"]);
        assert_eq!(contribution.files, vec!["src/a.ts"]);
    }
}
