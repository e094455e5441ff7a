//! Terminal output for summaries and status messages.

use std::fmt::Write as _;
use std::path::Path;

use console::style;
use pkgdoc_graph::{
    BarrelLocation, BinTarget, Diagnostic, DiagnosticLevel, Diagnostics, ResolvedExport,
    SymbolGraph,
};

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Human-readable summary of one package's graph.
pub fn graph_summary(root: &Path, graph: &SymbolGraph, diagnostics: &Diagnostics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", style("Package").bold(), root.display());

    match &graph.barrel_file {
        Some(barrel) => {
            let _ = writeln!(out, "  Barrel: {}", style(barrel).cyan());
        }
        None => {
            let _ = writeln!(out, "  Barrel: {}", style("none").dim());
        }
    }

    let sources = graph.barrel_source_files.len();
    let _ = writeln!(
        out,
        "  Public API: {} export(s) from {} file(s)",
        style(graph.barrel_exports.len()).cyan(),
        style(sources).cyan()
    );

    let width = graph
        .barrel_exports
        .iter()
        .map(|export| export.name().len())
        .max()
        .unwrap_or(0);
    for export in &graph.barrel_exports {
        let _ = writeln!(out, "    {}", export_line(export, width));
    }

    let warnings = diagnostics.at_least(DiagnosticLevel::Warn).count();
    if !diagnostics.is_empty() {
        let _ = writeln!(
            out,
            "  Diagnostics: {} ({} warning or worse)",
            diagnostics.len(),
            warnings
        );
        for diagnostic in diagnostics.iter() {
            let _ = writeln!(out, "    {}", diagnostic_line(diagnostic));
        }
    }

    out
}

fn export_line(export: &ResolvedExport, width: usize) -> String {
    let defined_in = if export.defined_in.is_resolved() {
        style(export.defined_in.as_str()).to_string()
    } else {
        style(export.defined_in.as_str()).red().to_string()
    };
    let mut line = format!(
        "{:<width$}  {:<9}  {}",
        export.name(),
        export.export.kind.as_str(),
        defined_in,
    );
    if export.export.is_type_only {
        line.push_str(&format!("  {}", style("(type-only)").dim()));
    }
    line
}

/// One diagnostic, colored by level.
pub fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    let level = match diagnostic.level {
        DiagnosticLevel::Info => style("info").blue(),
        DiagnosticLevel::Warn => style("warn").yellow(),
        DiagnosticLevel::Error => style("error").red(),
    };
    let mut line = format!(
        "[{}] {} {}: {}",
        level,
        diagnostic.code,
        diagnostic.module,
        diagnostic.message
    );
    if let Some(file) = &diagnostic.file {
        line.push_str(&format!(" ({file})"));
    }
    line
}

/// Human-readable result of barrel location.
pub fn location_summary(
    root: &Path,
    location: Option<&BarrelLocation>,
    bins: &[BinTarget],
    diagnostics: &Diagnostics,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", style("Package").bold(), root.display());

    match location {
        Some(location) => {
            let _ = writeln!(
                out,
                "  Barrel: {} (via {})",
                style(&location.file).cyan(),
                source_label(location)
            );
        }
        None => {
            let _ = writeln!(out, "  Barrel: {}", style("none").dim());
            for bin in bins {
                let command = bin.command.as_deref().unwrap_or("-");
                let _ = writeln!(out, "  Bin: {} -> {}", command, bin.path);
            }
        }
    }

    for diagnostic in diagnostics.iter() {
        let _ = writeln!(out, "    {}", diagnostic_line(diagnostic));
    }
    out
}

fn source_label(location: &BarrelLocation) -> &'static str {
    use pkgdoc_graph::BarrelSource::*;
    match location.source {
        RootIndex => "root index",
        Exports => "package.json exports",
        Main => "package.json main",
        Module => "package.json module",
        SourceIndex => "source index",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgdoc_graph::{BarrelSource, DefinedIn, DiagnosticCode, DiagnosticSink, ExportEntry, ExportKind};

    fn graph() -> SymbolGraph {
        let mut graph = SymbolGraph {
            barrel_file: Some("src/index.ts".to_string()),
            ..SymbolGraph::default()
        };
        graph.barrel_exports.push(ResolvedExport::new(
            ExportEntry::new("Button", ExportKind::Component),
            DefinedIn::file("src/button.tsx"),
        ));
        graph.barrel_exports.push(ResolvedExport::new(
            ExportEntry::new("Props", ExportKind::Interface).with_type_only(true),
            DefinedIn::Unresolved,
        ));
        graph.barrel_source_files.insert("src/index.ts".to_string());
        graph.barrel_source_files.insert("src/button.tsx".to_string());
        graph
    }

    #[test]
    fn test_graph_summary_lists_exports() {
        let summary = graph_summary(Path::new("/pkg"), &graph(), &Diagnostics::new());
        assert!(summary.contains("src/index.ts"));
        assert!(summary.contains("Button"));
        assert!(summary.contains("src/button.tsx"));
        assert!(summary.contains("unresolved"));
        assert!(summary.contains("(type-only)"));
        assert!(!summary.contains("Diagnostics"));
    }

    #[test]
    fn test_graph_summary_lists_diagnostics() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(
            Diagnostic::warn(DiagnosticCode::UnmatchedSymbol, "chain", "no export named Props")
                .with_file("src/index.ts"),
        );
        let summary = graph_summary(Path::new("/pkg"), &graph(), &diagnostics);
        assert!(summary.contains("unmatched-symbol"));
        assert!(summary.contains("no export named Props (src/index.ts)"));
    }

    #[test]
    fn test_location_summary() {
        let location = BarrelLocation {
            file: "lib/index.ts".to_string(),
            source: BarrelSource::Main,
        };
        let summary = location_summary(Path::new("/pkg"), Some(&location), &[], &Diagnostics::new());
        assert!(summary.contains("lib/index.ts"));
        assert!(summary.contains("package.json main"));
    }

    #[test]
    fn test_location_summary_lists_bins_without_barrel() {
        let bins = vec![BinTarget {
            command: Some("tool".to_string()),
            path: "dist/cli.js".to_string(),
        }];
        let summary = location_summary(Path::new("/pkg"), None, &bins, &Diagnostics::new());
        assert!(summary.contains("tool -> dist/cli.js"));
    }
}
