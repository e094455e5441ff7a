//! The resolved pkgdoc configuration.

use std::path::{Component, Path};

use pkgdoc_graph::GraphOptions;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default limit for a parsed-file records document (256MB)
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 256 * 1024 * 1024;

/// Top-level configuration.
///
/// ```toml
/// max_input_size = 1048576
///
/// [graph]
/// source_dir = "lib"
/// build_output_dirs = ["dist"]
///
/// [graph.compiled_extensions]
/// js = ["ts"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PkgdocConfig {
    /// Conventions used by the resolution engine.
    pub graph: GraphOptions,

    /// Largest parsed-file records document accepted as input, in bytes.
    pub max_input_size: u64,
}

impl Default for PkgdocConfig {
    fn default() -> Self {
        Self {
            graph: GraphOptions::default(),
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl PkgdocConfig {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let graph = &self.graph;

        if graph.source_extensions.is_empty() {
            return Err(ConfigError::invalid(
                "graph.source_extensions",
                "at least one source extension is required",
            ));
        }

        let extension_lists = [
            ("graph.source_extensions", &graph.source_extensions),
            ("graph.script_extensions", &graph.script_extensions),
        ];
        for (field, extensions) in extension_lists {
            check_extensions(field, extensions.iter().map(String::as_str))?;
        }
        check_extensions(
            "graph.compiled_extensions",
            graph
                .compiled_extensions
                .iter()
                .flat_map(|(ext, sources)| std::iter::once(ext).chain(sources))
                .map(String::as_str),
        )?;

        if graph.index_name.is_empty() || graph.index_name.contains(['/', '\\', '.']) {
            return Err(ConfigError::invalid(
                "graph.index_name",
                "expected a bare file stem such as \"index\"",
            ));
        }

        if graph.manifest_name.is_empty() || graph.manifest_name.contains(['/', '\\']) {
            return Err(ConfigError::invalid(
                "graph.manifest_name",
                "expected a file name such as \"package.json\"",
            ));
        }

        check_package_dir("graph.source_dir", &graph.source_dir)?;
        for dir in &graph.build_output_dirs {
            check_package_dir("graph.build_output_dirs", dir)?;
        }

        if graph.max_manifest_size == 0 {
            return Err(ConfigError::invalid(
                "graph.max_manifest_size",
                "must be greater than zero",
            ));
        }
        if self.max_input_size == 0 {
            return Err(ConfigError::invalid("max_input_size", "must be greater than zero"));
        }

        Ok(())
    }
}

fn check_extensions<'a>(field: &str, mut extensions: impl Iterator<Item = &'a str>) -> Result<()> {
    match extensions.find(|ext| ext.is_empty() || ext.starts_with('.') || ext.contains('/')) {
        Some(ext) => Err(ConfigError::invalid(
            field,
            format!("\"{ext}\" is not an extension; write extensions without the leading dot"),
        )),
        None => Ok(()),
    }
}

/// Package directories are relative and stay inside the package.
fn check_package_dir(field: &str, dir: &str) -> Result<()> {
    let path = Path::new(dir);
    let escapes = path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if dir.is_empty() || escapes {
        return Err(ConfigError::invalid(
            field,
            format!("\"{dir}\" must be a relative directory inside the package"),
        ));
    }
    Ok(())
}
