//! Package-root boundary checks.
//!
//! Every path produced while resolving a specifier must stay inside the
//! package root after lexical normalization. The check is purely lexical so
//! it behaves the same for in-memory and on-disk runtimes and for paths that
//! do not exist.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use thiserror::Error;

/// Error indicating a path escaped the package root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Path traversal detected: path '{path}' escapes package root '{root}'")]
pub struct PathTraversalError {
    /// The normalized path that attempted to escape
    pub path: PathBuf,
    /// The package root that was escaped from
    pub root: PathBuf,
}

/// Validate that a normalized path stays within `root`.
///
/// Both paths are expected to be absolute and already cleaned.
pub fn validate_path_within_root(normalized_path: &Path, root: &Path) -> Result<(), PathTraversalError> {
    if normalized_path.starts_with(root) {
        Ok(())
    } else {
        Err(PathTraversalError {
            path: normalized_path.to_path_buf(),
            root: root.to_path_buf(),
        })
    }
}

/// Join `relative` onto `base`, clean the result, and validate it stays
/// within `root`.
pub fn join_within_root(base: &Path, relative: &str, root: &Path) -> Result<PathBuf, PathTraversalError> {
    let cleaned = base.join(relative).clean();
    validate_path_within_root(&cleaned, root)?;
    Ok(cleaned)
}
