//! Candidate generation for relative specifiers.
//!
//! A specifier is expanded into an ordered list of paths (relative to the
//! importing directory) based on its shape. Existence is checked by the
//! caller.

use crate::config::GraphOptions;

/// How a specifier's final segment looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierShape<'a> {
    /// Ends in a compiled-output extension such as `.js` or `.d.ts`.
    Compiled(&'a str),
    /// Ends in a source extension such as `.ts`.
    Source,
    /// Names a directory (`.`, `..`, or a trailing `/`).
    Directory,
    /// Has a dot in its last segment that is not a known extension
    /// (`./data.json`, `./foo.config`).
    Dotted,
    /// No extension at all.
    Extensionless,
}

/// Classify `specifier` against the configured extension tables.
pub fn classify_specifier<'a>(specifier: &str, options: &'a GraphOptions) -> SpecifierShape<'a> {
    if specifier.ends_with('/') {
        return SpecifierShape::Directory;
    }

    let last = specifier.rsplit('/').next().unwrap_or(specifier);
    if last == "." || last == ".." {
        return SpecifierShape::Directory;
    }

    if let Some(ext) = options.compiled_extension_of(last) {
        return SpecifierShape::Compiled(ext);
    }

    if options.source_extension_of(last).is_some() {
        return SpecifierShape::Source;
    }

    if last.trim_start_matches('.').contains('.') {
        SpecifierShape::Dotted
    } else {
        SpecifierShape::Extensionless
    }
}

/// Ordered candidate paths for `specifier`.
pub fn candidate_paths(specifier: &str, options: &GraphOptions) -> Vec<String> {
    match classify_specifier(specifier, options) {
        SpecifierShape::Compiled(ext) => {
            let stem = &specifier[..specifier.len() - ext.len() - 1];
            let mut candidates: Vec<String> = options
                .compiled_extensions
                .get(ext)
                .into_iter()
                .flatten()
                .map(|source_ext| format!("{stem}.{source_ext}"))
                .collect();
            candidates.push(specifier.to_string());
            candidates
        }
        SpecifierShape::Source => vec![specifier.to_string()],
        SpecifierShape::Directory => index_candidates(specifier.trim_end_matches('/'), options),
        SpecifierShape::Dotted => {
            let mut candidates = vec![specifier.to_string()];
            candidates.extend(extensionless_candidates(specifier, options));
            candidates
        }
        SpecifierShape::Extensionless => extensionless_candidates(specifier, options),
    }
}

/// `x.ts`, `x.tsx`, `x/index.ts`, `x/index.tsx`, remaining source
/// extensions, then compiled-output fallbacks.
fn extensionless_candidates(specifier: &str, options: &GraphOptions) -> Vec<String> {
    let index = &options.index_name;
    let (leading, trailing) = options
        .source_extensions
        .split_at(options.source_extensions.len().min(2));

    let mut candidates = Vec::new();
    for ext in leading {
        candidates.push(format!("{specifier}.{ext}"));
    }
    for ext in leading {
        candidates.push(format!("{specifier}/{index}.{ext}"));
    }
    for ext in trailing {
        candidates.push(format!("{specifier}.{ext}"));
    }
    for ext in &options.script_extensions {
        candidates.push(format!("{specifier}.{ext}"));
    }
    for ext in trailing.iter().chain(options.script_extensions.iter()) {
        candidates.push(format!("{specifier}/{index}.{ext}"));
    }
    candidates
}

fn index_candidates(dir: &str, options: &GraphOptions) -> Vec<String> {
    let dir = if dir.is_empty() { "." } else { dir };
    options
        .index_files()
        .into_iter()
        .map(|file| format!("{dir}/{file}"))
        .collect()
}
