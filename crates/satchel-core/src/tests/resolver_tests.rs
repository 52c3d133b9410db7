#![cfg(test)]

use crate::manifest::{DependencySpec, ManifestBuilder, ProvideEntry, ProvideKind};
use crate::resolver::{check_dependencies, installation_order, resolve, ConflictDetail, InstalledSet};

fn dep(name: &str) -> (String, DependencySpec) {
    (
        name.to_string(),
        DependencySpec {
            git: format!("https://example.com/{name}.git"),
            git_ref: None,
        },
    )
}

fn manifest(name: &str, deps: &[&str]) -> crate::manifest::PluginManifest {
    let mut builder = ManifestBuilder::new(name, "1.0.0").provide(ProvideEntry {
        kind: ProvideKind::SourceFiles,
        path: "src/".to_string(),
        build_hint: None,
        runtime_hint: None,
    });
    for d in deps {
        let (n, s) = dep(d);
        builder = builder.dependency(&n, s);
    }
    builder.finish().expect("valid manifest")
}

#[test]
fn resolve_against_empty_installed_set_has_nothing_satisfied() {
    let target = manifest("widgets", &["base"]);
    let installed = InstalledSet::new();
    let report = resolve(&target, &installed);
    assert!(report.is_resolved());
    assert!(report.satisfied.is_empty());
    assert_eq!(report.to_install.len(), 1);
}

#[test]
fn resolve_distinguishes_satisfied_from_to_install() {
    let target = manifest("widgets", &["base", "extras"]);
    let mut installed = InstalledSet::new();
    installed.insert("base".to_string(), manifest("base", &[]));
    let report = resolve(&target, &installed);

    assert!(report.is_resolved());
    assert_eq!(report.satisfied.len(), 1);
    assert!(report.satisfied.contains("base"));
    assert_eq!(report.to_install.len(), 1);
}

#[test]
fn resolve_flags_a_self_dependency_as_a_conflict() {
    let target = manifest("widgets", &["widgets"]);
    let installed = InstalledSet::new();
    let report = resolve(&target, &installed);

    assert!(!report.is_resolved());
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].detail, ConflictDetail::SelfDependency);
}

#[test]
fn check_dependencies_excludes_self_and_installed() {
    let target = manifest("widgets", &["widgets", "base", "extras"]);
    let mut installed = InstalledSet::new();
    installed.insert("base".to_string(), manifest("base", &[]));

    let missing = check_dependencies(&target, &installed);
    assert_eq!(missing, vec!["extras".to_string()]);
}

#[test]
fn installation_order_of_empty_batch_is_empty() {
    let order = installation_order(&[]).expect("no cycle");
    assert!(order.is_empty());
}

#[test]
fn installation_order_places_dependencies_before_dependents() {
    let a = manifest("a", &[]);
    let b = manifest("b", &["a"]);
    let c = manifest("c", &["b"]);

    let order = installation_order(&[c, a, b]).expect("no cycle");
    let pos_a = order.iter().position(|n| n == "a").unwrap();
    let pos_b = order.iter().position(|n| n == "b").unwrap();
    let pos_c = order.iter().position(|n| n == "c").unwrap();
    assert!(pos_a < pos_b);
    assert!(pos_b < pos_c);
}

#[test]
fn installation_order_ignores_dependencies_outside_the_batch() {
    let a = manifest("a", &["outside-the-batch"]);
    let order = installation_order(&[a]).expect("no cycle");
    assert_eq!(order, vec!["a".to_string()]);
}

#[test]
fn installation_order_detects_a_two_node_cycle() {
    let x = manifest("x", &["y"]);
    let y = manifest("y", &["x"]);
    let err = installation_order(&[x, y]).unwrap_err();
    assert!(err.cycle_names.contains(&"x".to_string()));
    assert!(err.cycle_names.contains(&"y".to_string()));
}

#[test]
fn installation_order_detects_a_self_referencing_cycle() {
    let a = manifest("a", &["a"]);
    let err = installation_order(&[a]).unwrap_err();
    assert_eq!(err.cycle_names, vec!["a".to_string()]);
}
