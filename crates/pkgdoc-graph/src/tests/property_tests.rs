//! Property-based tests for symbol graph construction.
//!
//! Random re-export graphs (cycles, wildcards, aliases, dangling and
//! escaping specifiers) must always produce a graph, never forward
//! `default` through a wildcard, and never point outside the package.
//!
//! Run with: cargo test --features proptest --package pkgdoc-graph property_tests

#![cfg(feature = "proptest")]

use proptest::prelude::*;

use super::Fixture;
use crate::{DefinedIn, DiagnosticCode, ExportEntry, ExportKind, ParsedFile};

const FILES: usize = 6;
const NAMES: [&str; 5] = ["alpha", "beta", "gamma", "default", "delta"];

#[derive(Debug, Clone)]
enum Statement {
    Direct(usize),
    Star(usize),
    Named { name: usize, local: usize, target: usize },
    Escaping(usize),
}

fn file_path(index: usize) -> String {
    if index == 0 {
        "src/index.ts".to_string()
    } else {
        format!("src/m{index}.ts")
    }
}

fn specifier(target: usize) -> String {
    if target == 0 {
        "./index".to_string()
    } else {
        format!("./m{target}")
    }
}

fn statement_strategy() -> impl Strategy<Value = Statement> {
    // Target FILES means a module that does not exist
    prop_oneof![
        (0..NAMES.len()).prop_map(Statement::Direct),
        (0..=FILES).prop_map(Statement::Star),
        (0..NAMES.len(), 0..NAMES.len(), 0..=FILES)
            .prop_map(|(name, local, target)| Statement::Named { name, local, target }),
        (1..4usize).prop_map(Statement::Escaping),
    ]
}

fn package_strategy() -> impl Strategy<Value = Vec<Vec<Statement>>> {
    prop::collection::vec(prop::collection::vec(statement_strategy(), 0..5), FILES)
}

fn build_fixture(package: &[Vec<Statement>]) -> Fixture {
    let mut fixture = Fixture::new();
    for (index, statements) in package.iter().enumerate() {
        let mut builder = ParsedFile::builder(file_path(index));
        for statement in statements {
            let export = match statement {
                // The barrel never declares `default` itself
                Statement::Direct(name) if index == 0 && NAMES[*name] == "default" => continue,
                Statement::Direct(name) => ExportEntry::new(NAMES[*name], ExportKind::Const),
                Statement::Star(target) => ExportEntry::star(specifier(*target)),
                Statement::Named { name, .. } if index == 0 && NAMES[*name] == "default" => {
                    continue;
                }
                Statement::Named {
                    name,
                    local,
                    target,
                } => ExportEntry::re_export(NAMES[*name], specifier(*target))
                    .with_local_name(NAMES[*local]),
                Statement::Escaping(depth) => ExportEntry::re_export(
                    "escaped",
                    format!("{}outside", "../".repeat(*depth + 1)),
                ),
            };
            builder = builder.export(export);
        }
        fixture = fixture.file(builder.build());
    }
    fixture.disk_file("../outside.ts", "").disk_file("../../outside.ts", "")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: resolution terminates and wildcards never forward `default`
    #[test]
    fn prop_terminates_without_default(package in package_strategy()) {
        let (graph, _) = build_fixture(&package).build();

        prop_assert_eq!(graph.barrel_file.as_deref(), Some("src/index.ts"));
        prop_assert!(graph.public_names().all(|name| name != "default"));
    }

    /// Property: every defining file and contributing file is a package file
    #[test]
    fn prop_never_leaves_package(package in package_strategy()) {
        let (graph, _) = build_fixture(&package).build();

        for export in &graph.barrel_exports {
            if let DefinedIn::File(file) = &export.defined_in {
                prop_assert!(graph.all_exports.contains_key(file), "{} is not a package file", file);
            }
        }
        for file in &graph.barrel_source_files {
            prop_assert!(!file.starts_with(".."));
            prop_assert!(graph.all_exports.contains_key(file));
        }
    }

    /// Property: one circular diagnostic per distinct re-entry point
    #[test]
    fn prop_circular_diagnostics_are_unique(package in package_strategy()) {
        let (_, diagnostics) = build_fixture(&package).build();

        let mut seen = std::collections::HashSet::new();
        for diagnostic in diagnostics.iter() {
            if diagnostic.code == DiagnosticCode::CircularReExport {
                prop_assert!(seen.insert(diagnostic.message.clone()));
            }
        }
    }
}
