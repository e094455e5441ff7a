//! Layering against real files and environment variables.

use std::fs;

use figment::Jail;
use pkgdoc_config::{ConfigError, ConfigLoader, PkgdocConfig};
use pkgdoc_graph::NativeRuntime;
use tempfile::TempDir;

#[test]
fn env_overrides_every_file() {
    Jail::expect_with(|jail| {
        jail.create_file("pkgdoc.toml", "[graph]\nsource_dir = \"lib\"\n")?;
        jail.create_file("pkgdoc.json", r#"{ "graph": { "source_dir": "packages" } }"#)?;
        jail.set_env("PKGDOC_GRAPH__SOURCE_DIR", "app");
        jail.set_env("PKGDOC_GRAPH__MAX_MANIFEST_SIZE", "2048");

        let runtime = NativeRuntime::new();
        let config = ConfigLoader::new(jail.directory(), &runtime)
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.graph.source_dir, "app");
        assert_eq!(config.graph.max_manifest_size, 2048);
        Ok(())
    });
}

#[test]
fn env_sets_top_level_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("PKGDOC_MAX_INPUT_SIZE", "4096");

        let runtime = NativeRuntime::new();
        let config = ConfigLoader::new(jail.directory(), &runtime)
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.max_input_size, 4096);
        assert_eq!(config.graph, PkgdocConfig::default().graph);
        Ok(())
    });
}

#[test]
fn without_env_ignores_environment() {
    Jail::expect_with(|jail| {
        jail.set_env("PKGDOC_GRAPH__SOURCE_DIR", "app");

        let runtime = NativeRuntime::new();
        let config = ConfigLoader::new(jail.directory(), &runtime)
            .without_env()
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.graph.source_dir, "src");
        Ok(())
    });
}

#[test]
fn loads_explicit_json_from_disk() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pkgdoc.toml"), "[graph]\nindex_name = \"main\"\n").unwrap();
    fs::create_dir_all(dir.path().join("ci")).unwrap();
    fs::write(
        dir.path().join("ci/docs.json"),
        r#"{ "graph": { "build_output_dirs": ["out"] }, "max_input_size": 1024 }"#,
    )
    .unwrap();

    let runtime = NativeRuntime::new();
    let config = ConfigLoader::new(dir.path(), &runtime)
        .with_file("ci/docs.json")
        .without_env()
        .load()
        .unwrap();

    assert_eq!(config.graph.index_name, "main");
    assert_eq!(config.graph.build_output_dirs, vec!["out".to_string()]);
    assert_eq!(config.max_input_size, 1024);
}

#[test]
fn malformed_toml_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("pkgdoc.toml"), "[graph\nsource_dir = ").unwrap();

    let runtime = NativeRuntime::new();
    let err = ConfigLoader::new(dir.path(), &runtime)
        .without_env()
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Extract(_)));
}
