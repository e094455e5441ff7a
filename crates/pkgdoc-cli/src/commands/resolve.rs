//! `pkgdoc resolve`: build one package's symbol graph.

use std::path::Path;

use pkgdoc_graph::{
    Diagnostics, NativeRuntime, PackageOutput, build_symbol_graph, resolver::normalize_root,
};

use crate::cli::{OutputFormat, ResolveArgs};
use crate::commands::utils::{
    check_threshold, load_config, read_parsed_files, warning_count, write_output,
};
use crate::error::Result;
use crate::ui;

pub fn execute(args: ResolveArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime::new();
    let root = normalize_root(&args.root);
    let config = load_config(&root, config_path, &runtime)?;
    let files = read_parsed_files(&args.files, &runtime, config.max_input_size)?;

    let mut diagnostics = Diagnostics::new();
    let graph = build_symbol_graph(&root, &files, &runtime, &config.graph, &mut diagnostics);
    tracing::info!(
        exports = graph.barrel_exports.len(),
        diagnostics = diagnostics.len(),
        "Resolved public API"
    );

    let warnings = warning_count([&diagnostics]);
    let output = PackageOutput {
        root,
        graph,
        diagnostics,
    };

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&output)?,
        OutputFormat::Summary => ui::graph_summary(&output.root, &output.graph, &output.diagnostics),
    };
    write_output(args.output.as_deref(), &rendered)?;

    if warnings > 0 && args.format == OutputFormat::Json {
        ui::warning(&format!("{warnings} diagnostic(s) reported; see the `diagnostics` field"));
    }

    check_threshold(args.fail_on, [&output.diagnostics])
}
