//! Native Runtime Implementation
//!
//! Wraps `std::fs`. This is the only module in the engine that touches the
//! real filesystem.

#![allow(clippy::disallowed_methods)]

use std::io::ErrorKind;
use std::path::Path;

use super::{Runtime, RuntimeError, RuntimeResult};

/// Native filesystem Runtime implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeRuntime;

impl NativeRuntime {
    /// Create a new NativeRuntime instance.
    pub fn new() -> Self {
        Self
    }
}

impl Runtime for NativeRuntime {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path, max_size: u64) -> RuntimeResult<String> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(format!("Failed to stat {}: {}", path.display(), e))
            }
        })?;

        if metadata.len() > max_size {
            return Err(RuntimeError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                max: max_size,
            });
        }

        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(format!("Failed to read {}: {}", path.display(), e))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_native_runtime_reads_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        fs::write(&path, r#"{"name":"demo"}"#).unwrap();

        let runtime = NativeRuntime::new();
        assert!(runtime.exists(&path));
        assert!(runtime.is_file(&path));
        assert!(!runtime.is_file(temp.path()));
        assert_eq!(
            runtime.read_to_string(&path, 1024).unwrap(),
            r#"{"name":"demo"}"#
        );
    }

    #[test]
    fn test_native_runtime_size_limit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.json");
        fs::write(&path, "x".repeat(64)).unwrap();

        let err = NativeRuntime.read_to_string(&path, 16).unwrap_err();
        assert!(matches!(err, RuntimeError::TooLarge { size: 64, max: 16, .. }));
    }

    #[test]
    fn test_native_runtime_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = NativeRuntime
            .read_to_string(&temp.path().join("nope.json"), 16)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(_)));
    }
}
