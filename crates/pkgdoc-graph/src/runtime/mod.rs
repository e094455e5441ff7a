//! Filesystem abstraction for the resolution engine.
//!
//! The engine only needs three things from the outside world: whether a
//! candidate path exists, whether it is a regular file, and the text of a
//! package manifest. The `Runtime` trait captures exactly that so resolution
//! can run against the real filesystem or an in-memory file set.

pub mod memory;
pub mod native;

pub use memory::MemoryRuntime;
pub use native::NativeRuntime;

use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// File exceeds the caller's size limit
    #[error("File too large: {path} is {size} bytes (max: {max} bytes)")]
    TooLarge { path: PathBuf, size: u64, max: u64 },
}

/// Platform runtime trait
///
/// Implementations must be shareable across threads so that independent
/// packages can be resolved in parallel against one runtime.
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path exists and is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Read a UTF-8 file, refusing files larger than `max_size` bytes
    fn read_to_string(&self, path: &Path, max_size: u64) -> RuntimeResult<String>;
}

impl<R: Runtime + ?Sized> Runtime for &R {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn read_to_string(&self, path: &Path, max_size: u64) -> RuntimeResult<String> {
        (**self).read_to_string(path, max_size)
    }
}

impl<R: Runtime + ?Sized> Runtime for std::sync::Arc<R> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn read_to_string(&self, path: &Path, max_size: u64) -> RuntimeResult<String> {
        (**self).read_to_string(path, max_size)
    }
}
