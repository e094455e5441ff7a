//! # pkgdoc-config
//!
//! Configuration for pkgdoc: the resolution engine's [`GraphOptions`] plus
//! input limits, loaded from layered sources with `figment`.
//!
//! ```no_run
//! use pkgdoc_config::ConfigLoader;
//! use pkgdoc_graph::NativeRuntime;
//!
//! let runtime = NativeRuntime::new();
//! let config = ConfigLoader::new(".", &runtime)
//!     .with_file("ci/pkgdoc.toml")
//!     .load()?;
//! # Ok::<(), pkgdoc_config::ConfigError>(())
//! ```
//!
//! [`GraphOptions`]: pkgdoc_graph::GraphOptions

pub mod config;
pub mod error;
pub mod loader;

pub use config::{DEFAULT_MAX_INPUT_SIZE, PkgdocConfig};
pub use error::{ConfigError, Result};
pub use loader::{CONFIG_FILES, ConfigLoader, ENV_PREFIX, ENV_SEPARATOR};
