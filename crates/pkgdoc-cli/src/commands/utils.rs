//! Input, output, and configuration helpers shared by commands.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use pkgdoc_config::{ConfigLoader, PkgdocConfig};
use pkgdoc_graph::{DiagnosticLevel, Diagnostics, ParsedFile, Runtime, parse_parsed_files};

use crate::cli::FailOn;
use crate::error::{CliError, Result};

/// Load the layered configuration for the package at `root`.
pub fn load_config(
    root: &Path,
    explicit: Option<&Path>,
    runtime: &dyn Runtime,
) -> Result<PkgdocConfig> {
    let mut loader = ConfigLoader::new(root, runtime);
    if let Some(path) = explicit {
        loader = loader.with_file(path);
    }
    let config = loader.load()?;
    tracing::debug!(root = %root.display(), "Loaded configuration");
    Ok(config)
}

/// Read a text input from a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path, runtime: &dyn Runtime, max_size: u64) -> Result<String> {
    if path == Path::new("-") {
        return Ok(io::read_to_string(io::stdin())?);
    }
    if !runtime.is_file(path) {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    runtime
        .read_to_string(path, max_size)
        .map_err(|e| CliError::Input(e.into()))
}

/// Read parsed-file records from a file or stdin.
pub fn read_parsed_files(
    path: &Path,
    runtime: &dyn Runtime,
    max_size: u64,
) -> Result<Vec<ParsedFile>> {
    let contents = read_input(path, runtime, max_size)?;
    let files = parse_parsed_files(&contents)?;
    tracing::debug!(records = files.len(), "Read parsed file records");
    Ok(files)
}

/// Write `contents` to `output`, or stdout when no output file is given.
pub fn write_output(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, contents)?;
            crate::ui::success(&format!("Wrote {}", path.display()));
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            if !contents.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Fail when any diagnostic reaches the `--fail-on` level.
pub fn check_threshold<'a>(
    fail_on: FailOn,
    diagnostics: impl IntoIterator<Item = &'a Diagnostics>,
) -> Result<()> {
    let Some(level) = fail_on.threshold() else {
        return Ok(());
    };
    let count: usize = diagnostics
        .into_iter()
        .map(|d| d.at_least(level).count())
        .sum();
    if count > 0 {
        return Err(CliError::DiagnosticsFailed { count, level });
    }
    Ok(())
}

/// Count of diagnostics at warn level or above.
pub fn warning_count<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostics>) -> usize {
    diagnostics
        .into_iter()
        .map(|d| d.at_least(DiagnosticLevel::Warn).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgdoc_graph::{Diagnostic, DiagnosticCode, DiagnosticSink, MemoryRuntime};

    fn warned() -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::info(DiagnosticCode::BarrelAbsent, "entry", "no barrel"));
        diagnostics.push(Diagnostic::warn(
            DiagnosticCode::UnresolvedSpecifier,
            "resolver",
            "./missing",
        ));
        diagnostics
    }

    #[test]
    fn test_threshold_never_passes() {
        assert!(check_threshold(FailOn::Never, [&warned()]).is_ok());
    }

    #[test]
    fn test_threshold_warn_fails() {
        let err = check_threshold(FailOn::Warn, [&warned()]).unwrap_err();
        assert!(matches!(err, CliError::DiagnosticsFailed { count: 1, .. }));
    }

    #[test]
    fn test_threshold_error_ignores_warnings() {
        assert!(check_threshold(FailOn::Error, [&warned()]).is_ok());
    }

    #[test]
    fn test_warning_count_across_packages() {
        assert_eq!(warning_count([&warned(), &Diagnostics::new(), &warned()]), 2);
    }

    #[test]
    fn test_read_missing_input() {
        let runtime = MemoryRuntime::new();
        let err = read_input(Path::new("/in/parsed.json"), &runtime, 1024).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_read_parsed_files_rejects_bad_records() {
        let runtime = MemoryRuntime::new().with_file("/in/parsed.json", r#"{ "not": "an array" }"#);
        let err = read_parsed_files(Path::new("/in/parsed.json"), &runtime, 1024).unwrap_err();
        assert!(matches!(err, CliError::Input(pkgdoc_graph::Error::InvalidRecords(_))));
    }

    #[test]
    fn test_read_input_size_limit() {
        let runtime = MemoryRuntime::new().with_file("/in/parsed.json", "[]".repeat(64));
        let err = read_input(Path::new("/in/parsed.json"), &runtime, 16).unwrap_err();
        assert!(matches!(err, CliError::Input(pkgdoc_graph::Error::Runtime(_))));
    }
}
