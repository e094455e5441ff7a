use serde::{Deserialize, Serialize};

/// Name used by the parser for a bare wildcard re-export (`export * from './module'`).
pub const STAR_EXPORT: &str = "*";

/// Name of a module's default export.
pub const DEFAULT_EXPORT: &str = "default";

/// Declared kind of an exported symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    /// A function following the `useXxx` hook convention.
    Hook,
    /// A function or class rendering UI.
    Component,
    /// `type X = ...`
    Type,
    Interface,
    Class,
    Enum,
    Const,
    /// A namespace object, including `export * as ns from './module'`.
    Namespace,
    #[default]
    Unknown,
}

impl ExportKind {
    /// Lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Hook => "hook",
            Self::Component => "component",
            Self::Type => "type",
            Self::Interface => "interface",
            Self::Class => "class",
            Self::Enum => "enum",
            Self::Const => "const",
            Self::Namespace => "namespace",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true for kinds that only exist at the type level.
    pub fn is_type_level(&self) -> bool {
        matches!(self, Self::Type | Self::Interface)
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when an export record violates its shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportEntryError {
    #[error("export '{name}' is marked as a re-export but has no reExportSource")]
    MissingReExportSource { name: String },

    #[error("export '{name}' has a reExportSource but is not marked as a re-export")]
    UnexpectedReExportSource { name: String },
}

/// A single export declared by a parsed file.
///
/// Re-exports carry the specifier they forward from; the source is only
/// reachable through [`ExportEntry::re_export_source`], so an entry is a
/// re-export exactly when it has a source. Deserialization rejects records
/// where `isReExport` and `reExportSource` disagree.
///
/// Shapes produced by the parser:
///
/// | Statement                         | `name`  | `local_name` | source |
/// |-----------------------------------|---------|--------------|--------|
/// | `export function foo() {}`        | `foo`   | -            | -      |
/// | `export { foo as bar } from './x'`| `bar`   | `foo`        | `./x`  |
/// | `export * from './x'`             | `*`     | -            | `./x`  |
/// | `export * as ns from './x'`       | `ns`    | `*`          | `./x`  |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExportEntry", into = "RawExportEntry")]
pub struct ExportEntry {
    pub name: String,
    pub local_name: Option<String>,
    pub kind: ExportKind,
    pub is_type_only: bool,
    re_export_source: Option<String>,
    pub signature: Option<String>,
    pub js_doc_comment: Option<String>,
}

impl ExportEntry {
    /// A local (non-forwarding) export.
    pub fn new(name: impl Into<String>, kind: ExportKind) -> Self {
        Self {
            name: name.into(),
            local_name: None,
            kind,
            is_type_only: false,
            re_export_source: None,
            signature: None,
            js_doc_comment: None,
        }
    }

    /// A named re-export: `export { name } from 'source'`.
    pub fn re_export(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            re_export_source: Some(source.into()),
            ..Self::new(name, ExportKind::Unknown)
        }
    }

    /// A bare wildcard re-export: `export * from 'source'`.
    pub fn star(source: impl Into<String>) -> Self {
        Self::re_export(STAR_EXPORT, source)
    }

    /// A namespace re-export: `export * as name from 'source'`.
    pub fn namespace(name: impl Into<String>, source: impl Into<String>) -> Self {
        let mut entry = Self::re_export(name, source).with_local_name(STAR_EXPORT);
        entry.kind = ExportKind::Namespace;
        entry
    }

    pub fn with_local_name(mut self, local_name: impl Into<String>) -> Self {
        self.local_name = Some(local_name.into());
        self
    }

    pub fn with_type_only(mut self, is_type_only: bool) -> Self {
        self.is_type_only = is_type_only;
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_js_doc(mut self, comment: impl Into<String>) -> Self {
        self.js_doc_comment = Some(comment.into());
        self
    }

    /// Returns true if the export forwards from another module.
    pub fn is_re_export(&self) -> bool {
        self.re_export_source.is_some()
    }

    /// The specifier this export forwards from, if it is a re-export.
    pub fn re_export_source(&self) -> Option<&str> {
        self.re_export_source.as_deref()
    }

    /// Convenience check for default exports.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_EXPORT
    }

    /// Returns true if this is a bare star re-export (`export * from './module'`).
    pub fn is_star_re_export(&self) -> bool {
        self.is_re_export() && self.name == STAR_EXPORT
    }

    /// Returns true for `export * as ns from './module'`.
    pub fn is_namespace_re_export(&self) -> bool {
        self.is_re_export() && self.local_name.as_deref() == Some(STAR_EXPORT)
    }

    /// The identifier to look up in the module this entry forwards from.
    pub fn lookup_name(&self) -> &str {
        self.local_name.as_deref().unwrap_or(&self.name)
    }
}

/// Wire shape of [`ExportEntry`] as emitted by the parsing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExportEntry {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    local_name: Option<String>,
    #[serde(default)]
    kind: ExportKind,
    #[serde(default)]
    is_re_export: bool,
    #[serde(default)]
    is_type_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    re_export_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    js_doc_comment: Option<String>,
}

impl TryFrom<RawExportEntry> for ExportEntry {
    type Error = ExportEntryError;

    fn try_from(raw: RawExportEntry) -> Result<Self, Self::Error> {
        match (raw.is_re_export, raw.re_export_source.is_some()) {
            (true, false) => {
                return Err(ExportEntryError::MissingReExportSource { name: raw.name });
            }
            (false, true) => {
                return Err(ExportEntryError::UnexpectedReExportSource { name: raw.name });
            }
            _ => {}
        }

        Ok(Self {
            name: raw.name,
            local_name: raw.local_name,
            kind: raw.kind,
            is_type_only: raw.is_type_only,
            re_export_source: raw.re_export_source,
            signature: raw.signature,
            js_doc_comment: raw.js_doc_comment,
        })
    }
}

impl From<ExportEntry> for RawExportEntry {
    fn from(entry: ExportEntry) -> Self {
        Self {
            is_re_export: entry.is_re_export(),
            name: entry.name,
            local_name: entry.local_name,
            kind: entry.kind,
            is_type_only: entry.is_type_only,
            re_export_source: entry.re_export_source,
            signature: entry.signature,
            js_doc_comment: entry.js_doc_comment,
        }
    }
}
