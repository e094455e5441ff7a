//! Layered configuration loading.
//!
//! Layers are merged in increasing priority:
//!
//! 1. built-in defaults
//! 2. `pkgdoc.toml` in the package root
//! 3. `pkgdoc.json` in the package root
//! 4. an explicitly supplied file (`--config`)
//! 5. `PKGDOC_`-prefixed environment variables, nested keys split on `__`
//!    (`PKGDOC_GRAPH__SOURCE_DIR=lib`)
//!
//! Files are read through a [`Runtime`] so loading works against an
//! in-memory file set as well as the real filesystem.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml};
use pkgdoc_graph::Runtime;

use crate::config::PkgdocConfig;
use crate::error::{ConfigError, Result};

/// Config file discovered in the package root, lowest priority first.
pub const CONFIG_FILES: [&str; 2] = ["pkgdoc.toml", "pkgdoc.json"];

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PKGDOC_";

/// Separator for nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Config files larger than this are rejected.
const MAX_CONFIG_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Builds a [`PkgdocConfig`] from defaults, files, and the environment.
///
/// # Example
///
/// ```no_run
/// use pkgdoc_config::ConfigLoader;
/// use pkgdoc_graph::NativeRuntime;
///
/// let runtime = NativeRuntime::new();
/// let config = ConfigLoader::new("./my-package", &runtime).load().unwrap();
/// println!("sources live in {}", config.graph.source_dir);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader<'a> {
    root: PathBuf,
    runtime: &'a dyn Runtime,
    explicit: Option<PathBuf>,
    env: bool,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(root: impl Into<PathBuf>, runtime: &'a dyn Runtime) -> Self {
        Self {
            root: root.into(),
            runtime,
            explicit: None,
            env: true,
        }
    }

    /// Merge `path` above the discovered files. Relative paths are taken
    /// from the package root.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.explicit = Some(self.root.join(path));
        self
    }

    /// Skip the environment layer.
    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Config files that will be merged, in merge order.
    pub fn sources(&self) -> Result<Vec<PathBuf>> {
        let mut sources: Vec<PathBuf> = CONFIG_FILES
            .iter()
            .map(|name| self.root.join(name))
            .filter(|path| self.runtime.is_file(path))
            .collect();

        if let Some(path) = &self.explicit {
            if !self.runtime.is_file(path) {
                return Err(ConfigError::NotFound(path.clone()));
            }
            sources.push(path.clone());
        }

        Ok(sources)
    }

    /// The merged provider stack, before extraction.
    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(PkgdocConfig::default()));

        for path in self.sources()? {
            let format = FileFormat::of(&path)
                .ok_or_else(|| ConfigError::UnsupportedFormat(path.clone()))?;
            let contents = self
                .runtime
                .read_to_string(&path, MAX_CONFIG_SIZE)
                .map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;

            tracing::debug!(path = %path.display(), "Merging config file");
            figment = match format {
                FileFormat::Toml => figment.merge(Toml::string(&contents)),
                FileFormat::Json => figment.merge(Json::string(&contents)),
            };
        }

        if self.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));
        }

        Ok(figment)
    }

    /// Extract and validate the configuration.
    pub fn load(&self) -> Result<PkgdocConfig> {
        let config: PkgdocConfig = self.figment()?.extract()?;
        config.validate()?;
        Ok(config)
    }
}
