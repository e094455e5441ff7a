//! `pkgdoc locate`: report the barrel file without resolving exports.

use std::path::Path;

use pkgdoc_graph::{
    BinTarget, Diagnostics, NativeRuntime, PackageJson, SpecifierResolver, locate_barrel,
    resolver::normalize_root,
};
use serde_json::json;

use crate::cli::{LocateArgs, OutputFormat};
use crate::commands::utils::{load_config, write_output};
use crate::error::Result;
use crate::ui;

pub fn execute(args: LocateArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime::new();
    let root = normalize_root(&args.root);
    let config = load_config(&root, config_path, &runtime)?;

    let mut diagnostics = Diagnostics::new();
    let manifest = PackageJson::load(&runtime, &root, &config.graph, &mut diagnostics);
    let resolver = SpecifierResolver::new(&root, &runtime, &config.graph);
    let location = locate_barrel(&resolver, manifest.as_ref(), &mut diagnostics);
    let bins: Vec<BinTarget> = manifest
        .as_ref()
        .map(PackageJson::bin_targets)
        .unwrap_or_default();

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "root": root,
            "barrel": location,
            "bin": bins,
            "diagnostics": diagnostics,
        }))?,
        OutputFormat::Summary => ui::location_summary(&root, location.as_ref(), &bins, &diagnostics),
    };
    write_output(None, &rendered)
}
