use serde::{Deserialize, Serialize};

use crate::export::STAR_EXPORT;

/// A single import declaration recorded by the parsing stage.
///
/// `imported_names` keeps source order. A leading `*` marks a namespace
/// import (`import * as ns from 'mod'`); it names no individual symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEntry {
    pub module_specifier: String,
    #[serde(default)]
    pub imported_names: Vec<String>,
    #[serde(default)]
    pub is_type_only: bool,
    #[serde(default)]
    pub is_dynamic: bool,
}

impl ImportEntry {
    /// Convenience constructor for building imports in tests/fixtures.
    pub fn new<I, S>(module_specifier: impl Into<String>, imported_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module_specifier: module_specifier.into(),
            imported_names: imported_names.into_iter().map(Into::into).collect(),
            is_type_only: false,
            is_dynamic: false,
        }
    }

    pub fn type_only(mut self) -> Self {
        self.is_type_only = true;
        self
    }

    pub fn dynamic(mut self) -> Self {
        self.is_dynamic = true;
        self
    }

    /// Returns `true` when the specifier points inside the package (`./` or `../`).
    pub fn is_relative(&self) -> bool {
        is_relative_specifier(&self.module_specifier)
    }

    /// Returns `true` for side-effect-only imports (`import './polyfill'`).
    pub fn is_side_effect_only(&self) -> bool {
        self.imported_names.is_empty()
    }

    /// Check if this is a namespace import (`import * as foo`).
    pub fn is_namespace_import(&self) -> bool {
        self.imported_names.first().map(String::as_str) == Some(STAR_EXPORT)
    }

    /// Symbol-level imports, skipping a leading namespace marker.
    pub fn named_imports(&self) -> impl Iterator<Item = &str> {
        let skip = usize::from(self.is_namespace_import());
        self.imported_names.iter().skip(skip).map(String::as_str)
    }
}

/// Returns `true` when `specifier` begins with a relative-path marker.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}
