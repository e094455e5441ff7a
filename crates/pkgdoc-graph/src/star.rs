//! Wildcard (`export * from`) expansion.
//!
//! Walks the target module's exports in declaration order, descending into
//! nested wildcards depth-first so the expansion lists members in the order
//! a reader of the source would see them. `default` is never forwarded.
//!
//! The guard is file-level and covers one top-level wildcard. The file that
//! declares the wildcard counts as in progress, so `a.ts -> b.ts -> a.ts`
//! stops when `b.ts` points back. A file reached twice through different
//! branches (a diamond) is expanded once and skipped silently afterwards.

use rustc_hash::FxHashSet;

use crate::chain::resolve_chain;
use crate::context::{Contribution, ResolveContext};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use crate::export::ExportEntry;
use crate::graph::{DefinedIn, ResolvedExport};

const COMPONENT: &str = "star";

struct Frame<'a> {
    file: String,
    exports: &'a [ExportEntry],
    cursor: usize,
    type_only: bool,
}

/// Expand `export * from` in `origin`, already resolved to `target`.
pub(crate) fn expand_star<'a>(
    ctx: &mut ResolveContext<'a>,
    origin: &str,
    target: &str,
    type_only: bool,
    sink: &mut dyn DiagnosticSink,
) -> Contribution {
    let mut walk: StarWalk<'a> = StarWalk {
        in_progress: FxHashSet::default(),
        done: FxHashSet::default(),
        stack: Vec::new(),
        out: Contribution::default(),
    };
    walk.in_progress.insert(origin.to_string());
    walk.enter(ctx, origin, target.to_string(), type_only, sink);

    while let Some(frame) = walk.stack.last_mut() {
        let exports = frame.exports;
        let Some(export) = exports.get(frame.cursor) else {
            if let Some(frame) = walk.stack.pop() {
                walk.in_progress.remove(&frame.file);
                walk.done.insert(frame.file);
            }
            continue;
        };
        frame.cursor += 1;
        let file = frame.file.clone();
        let inherited = frame.type_only;

        if export.is_default() {
            continue;
        }

        if export.is_star_re_export() {
            let resolved = export
                .re_export_source()
                .and_then(|source| ctx.resolve(source, &file, sink));
            if let Some(nested) = resolved {
                walk.enter(ctx, &file, nested, inherited || export.is_type_only, sink);
            }
            continue;
        }

        let mut resolved = if export.is_re_export() {
            let chain = resolve_chain(ctx, export, &file, sink);
            walk.out.files.extend(chain.trail);
            chain.export
        } else {
            ResolvedExport::new(export.clone(), DefinedIn::File(file))
        };
        resolved.export.is_type_only |= inherited;
        walk.out.exports.push(resolved);
    }

    walk.out
}

struct StarWalk<'a> {
    in_progress: FxHashSet<String>,
    done: FxHashSet<String>,
    stack: Vec<Frame<'a>>,
    out: Contribution,
}

impl<'a> StarWalk<'a> {
    fn enter(
        &mut self,
        ctx: &mut ResolveContext<'a>,
        from: &str,
        target: String,
        type_only: bool,
        sink: &mut dyn DiagnosticSink,
    ) {
        if self.in_progress.contains(&target) {
            let diagnostic = Diagnostic::warn(
                DiagnosticCode::CircularStarExpansion,
                COMPONENT,
                format!("circular star-expansion: wildcard in {from} re-enters {target}"),
            )
            .with_file(from);
            ctx.report_once(from, &target, diagnostic, sink);
            return;
        }
        if self.done.contains(&target) {
            return;
        }

        let Some(parsed) = ctx.file(&target) else {
            tracing::debug!(file = %target, "Wildcard target was not parsed");
            self.done.insert(target);
            return;
        };

        tracing::debug!(from, target = %target, "Expanding wildcard");
        self.in_progress.insert(target.clone());
        self.out.files.push(target.clone());
        self.stack.push(Frame {
            file: target,
            exports: &parsed.exports,
            cursor: 0,
            type_only,
        });
    }
}
