use clap::ValueEnum;
use pkgdoc_graph::DiagnosticLevel;

/// How results are printed
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, suitable for downstream tools
    #[value(name = "json")]
    Json,

    /// Short human-readable summary
    #[value(name = "summary")]
    Summary,
}

/// Serialization of the effective configuration
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ConfigFormat {
    #[value(name = "toml")]
    Toml,

    #[value(name = "json")]
    Json,
}

/// Diagnostic level that turns a run into a failure
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum FailOn {
    /// Never fail because of diagnostics
    #[value(name = "never")]
    Never,

    /// Fail on warnings and errors
    #[value(name = "warn")]
    Warn,

    /// Fail on errors only
    #[value(name = "error")]
    Error,
}

impl FailOn {
    /// Lowest diagnostic level that fails the run.
    pub fn threshold(self) -> Option<DiagnosticLevel> {
        match self {
            Self::Never => None,
            Self::Warn => Some(DiagnosticLevel::Warn),
            Self::Error => Some(DiagnosticLevel::Error),
        }
    }
}
