//! `pkgdoc config`: print the merged configuration.

use std::path::Path;

use pkgdoc_config::ConfigLoader;
use pkgdoc_graph::NativeRuntime;

use crate::cli::{ConfigArgs, ConfigFormat};
use crate::commands::utils::write_output;
use crate::error::Result;

pub fn execute(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime::new();
    let mut loader = ConfigLoader::new(&args.root, &runtime);
    if let Some(path) = config_path {
        loader = loader.with_file(path);
    }

    for source in loader.sources()? {
        tracing::info!(source = %source.display(), "Merging config file");
    }
    let config = loader.load()?;

    let rendered = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(&config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
    };
    write_output(None, &rendered)
}
