//! Named re-export chain resolution.
//!
//! Follows `export { foo as bar } from './x'` through any number of
//! forwarding files to the file that actually declares `foo`. The walk is
//! iterative: each frame searches one file for one name, either forwarding
//! to a single named re-export or trying the file's bare `export *`
//! statements one after another until one of them supplies the name.
//!
//! Cycle guards are keyed by `(file, name)` and are scoped to one top-level
//! resolution. A key is "in progress" while its frame is on the stack;
//! re-entering it yields the `circular` sentinel. Keys whose search finished
//! without a match are remembered so sibling wildcard branches that reach the
//! same file do not search it again.
//!
//! A `default` lookup never continues into wildcards. Cycle diagnostics are
//! held back until the walk ends and are emitted only when the resolution as
//! a whole ends in the `circular` sentinel.

use rustc_hash::FxHashSet;

use crate::context::ResolveContext;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, emit};
use crate::export::{DEFAULT_EXPORT, ExportEntry, ExportKind};
use crate::graph::{DefinedIn, ResolvedExport};

const COMPONENT: &str = "chain";

/// A resolved re-export plus every file visited on the successful path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChainResolution {
    pub export: ResolvedExport,
    pub trail: Vec<String>,
}

/// Resolve the re-export `entry`, declared in `file`, to its definition.
///
/// The returned entry keeps the name and alias as written in `file`. Kind,
/// signature, and doc comment come from the defining declaration and
/// `is_type_only` is true if any hop was type-only.
pub(crate) fn resolve_chain(
    ctx: &mut ResolveContext<'_>,
    entry: &ExportEntry,
    file: &str,
    sink: &mut dyn DiagnosticSink,
) -> ChainResolution {
    let Some(source) = entry.re_export_source() else {
        return ChainResolution {
            export: ResolvedExport::new(entry.clone(), DefinedIn::File(file.to_string())),
            trail: vec![file.to_string()],
        };
    };

    let Some(target) = ctx.resolve(source, file, sink) else {
        return sentinel(entry, DefinedIn::Unresolved);
    };

    if entry.is_namespace_re_export() {
        let mut export = entry.clone();
        export.kind = ExportKind::Namespace;
        return ChainResolution {
            export: ResolvedExport::new(export, DefinedIn::File(target.clone())),
            trail: vec![file.to_string(), target],
        };
    }

    let mut walk = ChainWalk::default();
    walk.in_progress.insert((file.to_string(), entry.name.clone()));

    let start = Frame::new(target.clone(), entry.lookup_name(), false).with_fallback(
        entry
            .local_name
            .as_ref()
            .filter(|local| **local != entry.name)
            .map(|_| entry.name.clone()),
    );

    let outcome = walk.run(ctx, start, sink);
    if matches!(outcome, Outcome::Circular) {
        for (file, name, diagnostic) in walk.cycles.drain(..) {
            ctx.report_once(&file, &name, diagnostic, sink);
        }
    }

    match outcome {
        Outcome::Found(definition) => {
            let mut export = entry.clone();
            export.kind = definition.kind;
            export.signature = definition.signature;
            export.js_doc_comment = definition.js_doc_comment;
            export.is_type_only = entry.is_type_only || definition.type_only;

            let mut trail = vec![file.to_string()];
            trail.extend(definition.trail.into_iter().rev());

            tracing::debug!(
                name = %entry.name,
                defined_in = %definition.file,
                hops = trail.len() - 1,
                "Resolved re-export chain"
            );

            ChainResolution {
                export: ResolvedExport::new(export, DefinedIn::File(definition.file)),
                trail,
            }
        }
        Outcome::Circular => sentinel(entry, DefinedIn::Circular),
        Outcome::Unresolved => sentinel(entry, DefinedIn::Unresolved),
        Outcome::Unmatched => {
            emit(
                sink,
                Diagnostic::warn(
                    DiagnosticCode::UnmatchedSymbol,
                    COMPONENT,
                    format!("'{}' is not exported by {target}", entry.lookup_name()),
                )
                .with_file(file),
            );
            sentinel(entry, DefinedIn::Unresolved)
        }
    }
}

fn sentinel(entry: &ExportEntry, defined_in: DefinedIn) -> ChainResolution {
    let mut export = entry.clone();
    export.kind = ExportKind::Unknown;
    ChainResolution {
        export: ResolvedExport::new(export, defined_in),
        trail: Vec::new(),
    }
}

/// The declaration a chain ends at.
#[derive(Debug)]
struct Definition {
    file: String,
    kind: ExportKind,
    signature: Option<String>,
    js_doc_comment: Option<String>,
    type_only: bool,
    /// Files on the path, innermost first.
    trail: Vec<String>,
}

impl Definition {
    fn declared(entry: &ExportEntry, file: &str) -> Self {
        Self {
            file: file.to_string(),
            kind: entry.kind,
            signature: entry.signature.clone(),
            js_doc_comment: entry.js_doc_comment.clone(),
            type_only: entry.is_type_only,
            trail: Vec::new(),
        }
    }

    fn namespace(entry: &ExportEntry, target: String) -> Self {
        Self {
            trail: vec![target.clone()],
            file: target,
            kind: ExportKind::Namespace,
            signature: entry.signature.clone(),
            js_doc_comment: entry.js_doc_comment.clone(),
            type_only: entry.is_type_only,
        }
    }
}

#[derive(Debug)]
enum Outcome {
    Found(Definition),
    Circular,
    Unresolved,
    Unmatched,
}

impl Outcome {
    /// Ranking used to keep the most telling failure across wildcard
    /// alternatives.
    fn severity(&self) -> u8 {
        match self {
            Self::Found(_) => 3,
            Self::Circular => 2,
            Self::Unresolved => 1,
            Self::Unmatched => 0,
        }
    }
}

/// Search `file` for the export called `name`.
#[derive(Debug)]
struct Frame {
    file: String,
    name: String,
    /// Literal name tried when `name` (an alias's local name) has no direct
    /// match.
    fallback: Option<String>,
    /// `is_type_only` of the statement that led into this frame.
    via_type_only: bool,
    /// Wildcard targets not tried yet, last one first.
    pending_stars: Vec<(String, bool)>,
    /// Most telling failure among tried wildcards.
    failure: Option<Outcome>,
    forwarding: bool,
}

impl Frame {
    fn new(file: String, name: &str, via_type_only: bool) -> Self {
        Self {
            file,
            name: name.to_string(),
            fallback: None,
            via_type_only,
            pending_stars: Vec::new(),
            failure: None,
            forwarding: false,
        }
    }

    fn with_fallback(mut self, fallback: Option<String>) -> Self {
        self.fallback = fallback;
        self
    }

    fn key(&self) -> (String, String) {
        (self.file.clone(), self.name.clone())
    }
}

enum Step {
    /// Suspend the frame and search the child.
    Descend(Frame, Frame),
    Done(Outcome),
}

#[derive(Default)]
struct ChainWalk {
    in_progress: FxHashSet<(String, String)>,
    exhausted: FxHashSet<(String, String)>,
    /// Re-entry points seen so far, reported only if the walk ends circular.
    cycles: Vec<(String, String, Diagnostic)>,
}

impl ChainWalk {
    fn run(
        &mut self,
        ctx: &mut ResolveContext<'_>,
        start: Frame,
        sink: &mut dyn DiagnosticSink,
    ) -> Outcome {
        let mut stack: Vec<Frame> = Vec::new();
        let mut step = self.enter(ctx, start, sink);
        loop {
            step = match step {
                Step::Descend(frame, child) => {
                    stack.push(frame);
                    self.enter(ctx, child, sink)
                }
                Step::Done(outcome) => match stack.pop() {
                    None => return outcome,
                    Some(parent) => self.resume(parent, outcome),
                },
            };
        }
    }

    fn enter(
        &mut self,
        ctx: &mut ResolveContext<'_>,
        mut frame: Frame,
        sink: &mut dyn DiagnosticSink,
    ) -> Step {
        let key = frame.key();
        if self.exhausted.contains(&key) {
            return Step::Done(Outcome::Unmatched);
        }
        if self.in_progress.contains(&key) {
            let diagnostic = Diagnostic::warn(
                DiagnosticCode::CircularReExport,
                COMPONENT,
                format!("circular re-export: '{}' re-enters {}", frame.name, frame.file),
            )
            .with_file(frame.file.as_str());
            self.cycles.push((frame.file, frame.name, diagnostic));
            return Step::Done(Outcome::Circular);
        }
        self.in_progress.insert(key);

        let Some(parsed) = ctx.file(&frame.file) else {
            tracing::debug!(file = %frame.file, "Re-export target was not parsed");
            return Step::Done(self.finish(frame, Outcome::Unmatched));
        };

        let direct = parsed
            .exports
            .iter()
            .find(|export| !export.is_star_re_export() && export.name == frame.name)
            .or_else(|| {
                let fallback = frame.fallback.as_deref()?;
                parsed
                    .exports
                    .iter()
                    .find(|export| !export.is_star_re_export() && export.name == fallback)
            });

        if let Some(export) = direct {
            let Some(source) = export.re_export_source() else {
                let definition = Definition::declared(export, &frame.file);
                return Step::Done(self.finish(frame, Outcome::Found(definition)));
            };

            let Some(target) = ctx.resolve(source, &frame.file, sink) else {
                return Step::Done(self.finish(frame, Outcome::Unresolved));
            };

            if export.is_namespace_re_export() {
                let definition = Definition::namespace(export, target);
                return Step::Done(self.finish(frame, Outcome::Found(definition)));
            }

            frame.forwarding = true;
            let child = Frame::new(target, export.lookup_name(), export.is_type_only);
            return Step::Descend(frame, child);
        }

        if frame.name == DEFAULT_EXPORT {
            return Step::Done(self.finish(frame, Outcome::Unmatched));
        }

        // No direct match: the name may arrive through a wildcard
        let mut stars: Vec<(String, bool)> = parsed
            .star_re_exports()
            .filter_map(|star| {
                let source = star.re_export_source()?;
                let target = ctx.resolve_quiet(source, &frame.file)?;
                Some((target, star.is_type_only))
            })
            .collect();
        stars.reverse();
        frame.pending_stars = stars;
        self.next_star(frame)
    }

    fn resume(&mut self, mut frame: Frame, outcome: Outcome) -> Step {
        if frame.forwarding || matches!(outcome, Outcome::Found(_)) {
            return Step::Done(self.finish(frame, outcome));
        }

        let keep = frame
            .failure
            .as_ref()
            .is_none_or(|failure| outcome.severity() > failure.severity());
        if keep {
            frame.failure = Some(outcome);
        }
        self.next_star(frame)
    }

    fn next_star(&mut self, mut frame: Frame) -> Step {
        match frame.pending_stars.pop() {
            Some((target, type_only)) => {
                let child = Frame::new(target, &frame.name, type_only);
                Step::Descend(frame, child)
            }
            None => {
                let outcome = frame.failure.take().unwrap_or(Outcome::Unmatched);
                Step::Done(self.finish(frame, outcome))
            }
        }
    }

    /// Close `frame`, folding its contribution into `outcome`.
    fn finish(&mut self, frame: Frame, outcome: Outcome) -> Outcome {
        let key = frame.key();
        self.in_progress.remove(&key);
        match outcome {
            Outcome::Found(mut definition) => {
                definition.trail.push(frame.file);
                definition.type_only |= frame.via_type_only;
                Outcome::Found(definition)
            }
            Outcome::Unmatched => {
                self.exhausted.insert(key);
                Outcome::Unmatched
            }
            other => other,
        }
    }
}
