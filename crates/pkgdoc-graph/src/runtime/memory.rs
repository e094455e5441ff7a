//! In-memory runtime.
//!
//! Holds a fixed set of files keyed by their cleaned absolute path.
//! Directories exist implicitly as ancestors of stored files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::{Runtime, RuntimeError, RuntimeResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryRuntime {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`MemoryRuntime::insert`].
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl AsRef<Path>, contents: impl Into<String>) {
        self.files.insert(path.as_ref().clean(), contents.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Runtime for MemoryRuntime {
    fn exists(&self, path: &Path) -> bool {
        let path = path.clean();
        self.files.contains_key(&path) || self.files.keys().any(|file| file.starts_with(&path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&path.clean())
    }

    fn read_to_string(&self, path: &Path, max_size: u64) -> RuntimeResult<String> {
        let contents = self
            .files
            .get(&path.clean())
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))?;

        let size = contents.len() as u64;
        if size > max_size {
            return Err(RuntimeError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: max_size,
            });
        }

        Ok(contents.clone())
    }
}
