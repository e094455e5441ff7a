//! Package manifest parsing.
//!
//! Only the entry-point fields are modeled. `exports` and `bin` take several
//! shapes in the wild, so they are kept as raw JSON and read through small
//! typed accessors that return `None` at the first step that does not match.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GraphOptions;
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, emit};
use crate::runtime::Runtime;

const COMPONENT: &str = "manifest";

/// Condition keys accepted in an `exports` map, most preferred first.
pub const CONDITION_PREFERENCE: [&str; 4] = ["types", "import", "require", "default"];

/// Entry-point fields of a parsed package.json.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageJson {
    /// Package name
    pub name: Option<String>,
    /// Package version
    pub version: Option<String>,
    #[serde(default)]
    pub exports: Option<Value>,
    #[serde(default)]
    pub main: Option<Value>,
    #[serde(default)]
    pub module: Option<Value>,
    #[serde(default)]
    pub bin: Option<Value>,
    /// File path this was loaded from
    #[serde(skip)]
    pub path: PathBuf,
}

/// One CLI command declared under `bin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinTarget {
    /// Command name; for the string form this is the unscoped package name.
    pub command: Option<String>,
    /// Target path as written in the manifest.
    pub path: String,
}

impl PackageJson {
    /// Parse manifest text.
    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Load the manifest at the package root.
    ///
    /// A missing manifest is silently absent. A manifest that cannot be
    /// read, exceeds the size limit, or is not valid JSON is reported as
    /// malformed and then treated as absent.
    pub fn load(
        runtime: &dyn Runtime,
        root: &Path,
        options: &GraphOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<Self> {
        let path = root.join(&options.manifest_name);
        if !runtime.is_file(&path) {
            tracing::debug!(path = %path.display(), "No package manifest");
            return None;
        }

        let parsed = runtime
            .read_to_string(&path, options.max_manifest_size)
            .map_err(|e| e.to_string())
            .and_then(|contents| Self::parse(&contents).map_err(|e| e.to_string()));

        match parsed {
            Ok(mut manifest) => {
                manifest.path = path;
                Some(manifest)
            }
            Err(reason) => {
                emit(
                    sink,
                    Diagnostic::warn(
                        DiagnosticCode::MalformedManifest,
                        COMPONENT,
                        format!("ignoring malformed manifest: {reason}"),
                    )
                    .with_file(options.manifest_name.as_str()),
                );
                None
            }
        }
    }

    /// The root entry of the `exports` field.
    ///
    /// Handles the string shorthand, the `"."` subpath, and the sugar form
    /// where the whole object is a condition map.
    pub fn exports_entry(&self) -> Option<&str> {
        match self.exports.as_ref()? {
            Value::String(target) => Some(target),
            Value::Object(map) => {
                if let Some(root) = map.get(".") {
                    return resolve_conditions(root);
                }
                if map.keys().any(|key| key.starts_with('.')) {
                    // Subpath map without a root entry
                    return None;
                }
                resolve_conditions(self.exports.as_ref()?)
            }
            Value::Array(_) => resolve_conditions(self.exports.as_ref()?),
            _ => None,
        }
    }

    pub fn main(&self) -> Option<&str> {
        self.main.as_ref()?.as_str()
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_ref()?.as_str()
    }

    /// Commands declared under `bin`, sorted by command for the map form.
    pub fn bin_targets(&self) -> Vec<BinTarget> {
        match self.bin.as_ref() {
            Some(Value::String(path)) => vec![BinTarget {
                command: self.unscoped_name().map(str::to_string),
                path: path.clone(),
            }],
            Some(Value::Object(map)) => {
                let mut targets: Vec<BinTarget> = map
                    .iter()
                    .filter_map(|(command, path)| {
                        Some(BinTarget {
                            command: Some(command.clone()),
                            path: path.as_str()?.to_string(),
                        })
                    })
                    .collect();
                targets.sort_by(|a, b| a.command.cmp(&b.command));
                targets
            }
            _ => Vec::new(),
        }
    }

    pub fn has_bin(&self) -> bool {
        !self.bin_targets().is_empty()
    }

    fn unscoped_name(&self) -> Option<&str> {
        let name = self.name.as_deref()?;
        Some(name.rsplit_once('/').map_or(name, |(_, bare)| bare))
    }
}

/// Pick a target from a condition value.
///
/// Strings are targets. Objects are searched in [`CONDITION_PREFERENCE`]
/// order, descending into nested condition maps. Arrays are fallback lists
/// and yield their first resolvable element.
pub fn resolve_conditions(value: &Value) -> Option<&str> {
    match value {
        Value::String(target) => Some(target),
        Value::Object(map) => CONDITION_PREFERENCE
            .iter()
            .filter_map(|condition| map.get(*condition))
            .find_map(resolve_conditions),
        Value::Array(items) => items.iter().find_map(resolve_conditions),
        _ => None,
    }
}
