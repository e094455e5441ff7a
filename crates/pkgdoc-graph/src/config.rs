//! Conventions used while locating entry points and resolving specifiers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum allowed size for package.json files (10MB)
pub const MAX_PACKAGE_JSON_SIZE: u64 = 10 * 1024 * 1024;

/// Options for building a symbol graph.
///
/// The defaults describe a TypeScript-first npm package. Every list is
/// ordered: earlier entries are tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Source extensions, without the leading dot. The first two are the
    /// primary and secondary extensions tried for extensionless specifiers.
    pub source_extensions: Vec<String>,

    /// Compiled-output extension mapped to the source extensions it is
    /// usually compiled from (`js` -> `ts`, `tsx`).
    pub compiled_extensions: IndexMap<String, Vec<String>>,

    /// Plain script extensions accepted for index files and as compiled
    /// fallbacks for extensionless specifiers.
    pub script_extensions: Vec<String>,

    /// Basename of implicit directory entry files.
    pub index_name: String,

    /// Directory holding the package's sources.
    pub source_dir: String,

    /// Build-output directories that mirror `source_dir`.
    pub build_output_dirs: Vec<String>,

    /// File name of the package manifest.
    pub manifest_name: String,

    /// Manifests larger than this are treated as malformed.
    pub max_manifest_size: u64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        let mut compiled_extensions = IndexMap::new();
        compiled_extensions.insert("d.ts".to_string(), strings(&["ts", "tsx"]));
        compiled_extensions.insert("js".to_string(), strings(&["ts", "tsx"]));
        compiled_extensions.insert("jsx".to_string(), strings(&["tsx"]));
        compiled_extensions.insert("mjs".to_string(), strings(&["mts"]));
        compiled_extensions.insert("cjs".to_string(), strings(&["cts"]));

        Self {
            source_extensions: strings(&["ts", "tsx", "mts", "cts"]),
            compiled_extensions,
            script_extensions: strings(&["js", "jsx", "mjs", "cjs"]),
            index_name: "index".to_string(),
            source_dir: "src".to_string(),
            build_output_dirs: strings(&["dist", "build", "lib", "out"]),
            manifest_name: "package.json".to_string(),
            max_manifest_size: MAX_PACKAGE_JSON_SIZE,
        }
    }
}

impl GraphOptions {
    /// Extensions recognized for index/barrel files: sources, then scripts.
    pub fn entry_extensions(&self) -> impl Iterator<Item = &str> {
        self.source_extensions
            .iter()
            .chain(self.script_extensions.iter())
            .map(String::as_str)
    }

    /// Candidate index file names (`index.ts`, `index.tsx`, ...).
    pub fn index_files(&self) -> Vec<String> {
        self.entry_extensions()
            .map(|ext| format!("{}.{ext}", self.index_name))
            .collect()
    }

    /// The compiled extension `file_name` ends with, longest match first.
    pub fn compiled_extension_of<'a>(&'a self, file_name: &str) -> Option<&'a str> {
        self.compiled_extensions
            .keys()
            .filter(|ext| has_extension(file_name, ext))
            .max_by_key(|ext| ext.len())
            .map(String::as_str)
    }

    /// The source extension `file_name` ends with, longest match first.
    pub fn source_extension_of<'a>(&'a self, file_name: &str) -> Option<&'a str> {
        self.source_extensions
            .iter()
            .filter(|ext| has_extension(file_name, ext))
            .max_by_key(|ext| ext.len())
            .map(String::as_str)
    }
}

fn has_extension(file_name: &str, ext: &str) -> bool {
    file_name
        .strip_suffix(ext)
        .and_then(|stem| stem.strip_suffix('.'))
        .is_some_and(|stem| !stem.is_empty())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_index_files() {
        let options = GraphOptions::default();
        let files = options.index_files();
        assert_eq!(files[0], "index.ts");
        assert_eq!(files[1], "index.tsx");
        assert!(files.contains(&"index.js".to_string()));
    }

    #[test]
    fn test_compiled_extension_prefers_longest() {
        let options = GraphOptions::default();
        assert_eq!(options.compiled_extension_of("index.d.ts"), Some("d.ts"));
        assert_eq!(options.compiled_extension_of("index.js"), Some("js"));
        assert_eq!(options.compiled_extension_of("index.mjs"), Some("mjs"));
        assert_eq!(options.compiled_extension_of("index.ts"), None);
        assert_eq!(options.compiled_extension_of(".js"), None);
    }

    #[test]
    fn test_source_extension_of() {
        let options = GraphOptions::default();
        assert_eq!(options.source_extension_of("a.ts"), Some("ts"));
        assert_eq!(options.source_extension_of("a.mts"), Some("mts"));
        assert_eq!(options.source_extension_of("a.config"), None);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let options: GraphOptions = serde_json::from_str(r#"{ "source_dir": "lib" }"#).unwrap();
        assert_eq!(options.source_dir, "lib");
        assert_eq!(options.index_name, "index");
        assert_eq!(options.max_manifest_size, MAX_PACKAGE_JSON_SIZE);
    }
}
