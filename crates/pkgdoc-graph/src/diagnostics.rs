//! Leveled diagnostics emitted while resolving a package.
//!
//! Nothing in the engine fails on a recoverable miss. Instead each miss is
//! described by a [`Diagnostic`] pushed into a caller-supplied
//! [`DiagnosticSink`], and mirrored as a `tracing` event.

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warn,
    Error,
}

/// Machine-readable classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// A relative specifier matched no file.
    UnresolvedSpecifier,
    /// A specifier would have escaped the package root.
    BoundaryViolation,
    /// A named re-export chain re-entered a `(file, name)` already in progress.
    CircularReExport,
    /// A wildcard expansion re-entered a file already being expanded.
    CircularStarExpansion,
    /// The target module has no export with the requested name.
    UnmatchedSymbol,
    /// The package manifest could not be read or parsed.
    MalformedManifest,
    /// No barrel file could be located.
    BarrelAbsent,
    /// The barrel exists but yields no exports.
    BarrelEmpty,
    /// Neither the barrel nor any fallback produced a public API.
    NoPublicApi,
    /// The public API was taken from a fallback extractor.
    FallbackUsed,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnresolvedSpecifier => "unresolved-specifier",
            Self::BoundaryViolation => "boundary-violation",
            Self::CircularReExport => "circular-re-export",
            Self::CircularStarExpansion => "circular-star-expansion",
            Self::UnmatchedSymbol => "unmatched-symbol",
            Self::MalformedManifest => "malformed-manifest",
            Self::BarrelAbsent => "barrel-absent",
            Self::BarrelEmpty => "barrel-empty",
            Self::NoPublicApi => "no-public-api",
            Self::FallbackUsed => "fallback-used",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single leveled diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: DiagnosticCode,
    /// Engine component that produced the diagnostic (`resolver`, `entry`, ...).
    pub module: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Diagnostic {
    pub fn new(
        level: DiagnosticLevel,
        code: DiagnosticCode,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            code,
            module: module.into(),
            message: message.into(),
            file: None,
        }
    }

    pub fn info(code: DiagnosticCode, module: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, code, module, message)
    }

    pub fn warn(code: DiagnosticCode, module: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, code, module, message)
    }

    pub fn error(code: DiagnosticCode, module: &str, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, code, module, message)
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.level {
            DiagnosticLevel::Info => "info",
            DiagnosticLevel::Warn => "warn",
            DiagnosticLevel::Error => "error",
        };
        write!(f, "[{level}] {}: {}", self.module, self.message)?;
        if let Some(file) = &self.file {
            write!(f, " ({file})")?;
        }
        Ok(())
    }
}

/// Destination for diagnostics.
pub trait DiagnosticSink {
    fn push(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn push(&mut self, diagnostic: Diagnostic) {
        Vec::push(self, diagnostic);
    }
}

/// Push `diagnostic` into `sink`, mirroring it as a tracing event.
pub(crate) fn emit(sink: &mut dyn DiagnosticSink, diagnostic: Diagnostic) {
    let file = diagnostic.file.as_deref().unwrap_or("");
    match diagnostic.level {
        DiagnosticLevel::Info => tracing::info!(
            code = %diagnostic.code,
            module = %diagnostic.module,
            file,
            "{}",
            diagnostic.message
        ),
        DiagnosticLevel::Warn => tracing::warn!(
            code = %diagnostic.code,
            module = %diagnostic.module,
            file,
            "{}",
            diagnostic.message
        ),
        DiagnosticLevel::Error => tracing::error!(
            code = %diagnostic.code,
            module = %diagnostic.module,
            file,
            "{}",
            diagnostic.message
        ),
    }
    sink.push(diagnostic);
}

/// Owned diagnostic collection with a few query helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics carrying `code`.
    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.items.iter().filter(|d| d.code == code).count()
    }

    pub fn has(&self, code: DiagnosticCode) -> bool {
        self.items.iter().any(|d| d.code == code)
    }

    /// Diagnostics at or above `level`.
    pub fn at_least(&self, level: DiagnosticLevel) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.level >= level)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl DiagnosticSink for Diagnostics {
    fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_into_vec_sink() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        emit(
            &mut sink,
            Diagnostic::warn(DiagnosticCode::UnresolvedSpecifier, "resolver", "no match")
                .with_file("src/a.ts"),
        );
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].file.as_deref(), Some("src/a.ts"));
    }

    #[test]
    fn test_diagnostics_queries() {
        let mut diagnostics = Diagnostics::new();
        emit(
            &mut diagnostics,
            Diagnostic::info(DiagnosticCode::BarrelAbsent, "entry", "no barrel"),
        );
        emit(
            &mut diagnostics,
            Diagnostic::warn(DiagnosticCode::CircularReExport, "chain", "cycle"),
        );

        assert_eq!(diagnostics.count(DiagnosticCode::CircularReExport), 1);
        assert!(diagnostics.has(DiagnosticCode::BarrelAbsent));
        assert!(!diagnostics.has(DiagnosticCode::NoPublicApi));
        assert_eq!(diagnostics.at_least(DiagnosticLevel::Warn).count(), 1);
    }

    #[test]
    fn test_display_and_serialize() {
        let diagnostic = Diagnostic::error(DiagnosticCode::MalformedManifest, "manifest", "bad json")
            .with_file("package.json");
        assert_eq!(
            diagnostic.to_string(),
            "[error] manifest: bad json (package.json)"
        );

        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(value["level"], "error");
        assert_eq!(value["code"], "malformed-manifest");
    }
}
