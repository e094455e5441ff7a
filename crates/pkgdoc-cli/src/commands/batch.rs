//! `pkgdoc batch`: build many packages in one run.

use std::path::Path;

use pkgdoc_graph::{NativeRuntime, PackageInput, build_many};

use crate::cli::{BatchArgs, OutputFormat};
use crate::commands::utils::{check_threshold, load_config, read_input, write_output};
use crate::error::Result;
use crate::ui;

/// Configuration is loaded once, from the current directory, and shared by
/// every package in the batch.
pub fn execute(args: BatchArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime::new();
    let config = load_config(Path::new("."), config_path, &runtime)?;

    let contents = read_input(&args.packages, &runtime, config.max_input_size)?;
    let packages: Vec<PackageInput> = serde_json::from_str(&contents)?;
    tracing::info!(packages = packages.len(), "Building symbol graphs");

    let outputs = build_many(&packages, &runtime, &config.graph);

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&outputs)?,
        OutputFormat::Summary => outputs
            .iter()
            .map(|output| ui::graph_summary(&output.root, &output.graph, &output.diagnostics))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    write_output(args.output.as_deref(), &rendered)?;

    check_threshold(args.fail_on, outputs.iter().map(|output| &output.diagnostics))
}
