use std::path::Path;

use path_clean::PathClean;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::export::ExportEntry;
use crate::import::ImportEntry;

/// Per-file export/import record produced by the parsing stage.
///
/// The engine treats these records as read-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    /// Path relative to the package root, `/`-separated.
    pub relative_path: String,
    #[serde(default)]
    pub exports: Vec<ExportEntry>,
    #[serde(default)]
    pub imports: Vec<ImportEntry>,
}

impl ParsedFile {
    /// Create a new parsed-file builder with no exports or imports.
    pub fn builder(relative_path: impl Into<String>) -> ParsedFileBuilder {
        ParsedFileBuilder {
            file: Self {
                relative_path: relative_path.into(),
                exports: Vec::new(),
                imports: Vec::new(),
            },
        }
    }

    /// Find the first export with the given public name.
    pub fn find_export(&self, name: &str) -> Option<&ExportEntry> {
        self.exports.iter().find(|export| export.name == name)
    }

    /// Bare `export * from` statements, in declaration order.
    pub fn star_re_exports(&self) -> impl Iterator<Item = &ExportEntry> {
        self.exports.iter().filter(|export| export.is_star_re_export())
    }

    /// Imports with a `./` or `../` specifier.
    pub fn relative_imports(&self) -> impl Iterator<Item = &ImportEntry> {
        self.imports.iter().filter(|import| import.is_relative())
    }
}

/// Builder for `ParsedFile` to keep fixtures readable.
pub struct ParsedFileBuilder {
    file: ParsedFile,
}

impl ParsedFileBuilder {
    pub fn export(mut self, export: ExportEntry) -> Self {
        self.file.exports.push(export);
        self
    }

    pub fn exports(mut self, exports: impl IntoIterator<Item = ExportEntry>) -> Self {
        self.file.exports.extend(exports);
        self
    }

    pub fn import(mut self, import: ImportEntry) -> Self {
        self.file.imports.push(import);
        self
    }

    pub fn build(self) -> ParsedFile {
        self.file
    }
}

/// Lookup table from normalized relative path to parsed file.
///
/// When two records normalize to the same path the first one wins.
#[derive(Debug, Default)]
pub struct FileIndex<'a> {
    files: FxHashMap<String, &'a ParsedFile>,
}

impl<'a> FileIndex<'a> {
    pub fn new(files: &'a [ParsedFile]) -> Self {
        let mut index = FxHashMap::default();
        for file in files {
            index
                .entry(normalize_relative_path(&file.relative_path))
                .or_insert(file);
        }
        Self { files: index }
    }

    pub fn get(&self, relative_path: &str) -> Option<&'a ParsedFile> {
        self.files.get(relative_path).copied()
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.files.contains_key(relative_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a ParsedFile)> {
        self.files.iter().map(|(path, file)| (path.as_str(), *file))
    }
}

/// Normalize a package-relative path: `/` separators, no `.` segments,
/// no leading `./`.
pub fn normalize_relative_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let cleaned = Path::new(&unified).clean();
    let text = cleaned.to_string_lossy().replace('\\', "/");
    match text.as_str() {
        "." => String::new(),
        other => other.trim_start_matches("./").to_string(),
    }
}

/// Render `path` relative to `root` in the index's normalized form.
///
/// Returns `None` when `path` is not under `root`.
pub fn relative_to_root(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(normalize_relative_path(&relative.to_string_lossy()))
}

/// Directory portion of a normalized relative path (`""` for root files).
pub fn parent_dir(relative_path: &str) -> &str {
    relative_path
        .rsplit_once('/')
        .map_or("", |(dir, _)| dir)
}
