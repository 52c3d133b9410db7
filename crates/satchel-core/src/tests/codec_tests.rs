#![cfg(test)]

use crate::codec::{parse, serialize};
use crate::manifest::{DependencySpec, ManifestBuilder, ManifestError, ProvideEntry, ProvideKind};

fn sample_toml() -> &'static str {
    r#"
        name = "example-plugin"
        version = "0.2.0"
        description = "an example"
        author = "ana"

        [source]
        git = "https://example.com/example-plugin.git"
        ref = "main"

        [[provides]]
        kind = "source-files"
        path = "src/"

        [[provides]]
        kind = "native-plugin-a"
        path = "native/lib.so"

        [provides.build_hint]
        target = "lib"

        [dependencies.base]
        git = "https://example.com/base.git"
        ref = "v1.0.0"
    "#
}

#[test]
fn parses_a_well_formed_manifest() {
    let manifest = parse(sample_toml()).expect("valid manifest parses");
    assert_eq!(manifest.name, "example-plugin");
    assert_eq!(manifest.version, "0.2.0");
    assert_eq!(manifest.provides.len(), 2);
    assert_eq!(manifest.provides[0].kind, ProvideKind::SourceFiles);
    assert_eq!(manifest.provides[1].kind, ProvideKind::NativePluginA);
    let source = manifest.source.expect("source present");
    assert_eq!(source.git, "https://example.com/example-plugin.git");
    assert_eq!(source.git_ref.as_deref(), Some("main"));
    let dep = manifest.dependencies.get("base").expect("dependency present");
    assert_eq!(dep.git_ref.as_deref(), Some("v1.0.0"));
}

#[test]
fn missing_name_is_a_missing_field_error() {
    let text = r#"
        version = "1.0.0"
        [[provides]]
        kind = "source-files"
        path = "src/"
    "#;
    let err = parse(text).unwrap_err();
    assert!(matches!(err, ManifestError::MissingField("name")));
}

#[test]
fn missing_version_is_a_missing_field_error() {
    let text = r#"
        name = "widgets"
        [[provides]]
        kind = "source-files"
        path = "src/"
    "#;
    let err = parse(text).unwrap_err();
    assert!(matches!(err, ManifestError::MissingField("version")));
}

#[test]
fn empty_provides_is_rejected() {
    let text = r#"
        name = "widgets"
        version = "1.0.0"
        provides = []
    "#;
    let err = parse(text).unwrap_err();
    assert!(matches!(err, ManifestError::MissingOrEmptyProvides));
}

#[test]
fn invalid_name_is_rejected() {
    let text = r#"
        name = "Test_Plugin"
        version = "1.0.0"
        [[provides]]
        kind = "source-files"
        path = "src/"
    "#;
    let err = parse(text).unwrap_err();
    assert!(matches!(err, ManifestError::InvalidPackageName(name) if name == "Test_Plugin"));
}

#[test]
fn unknown_provide_kind_is_rejected() {
    let text = r#"
        name = "widgets"
        version = "1.0.0"
        [[provides]]
        kind = "definitely-not-a-real-kind"
        path = "src/"
    "#;
    let err = parse(text).unwrap_err();
    assert!(matches!(
        err,
        ManifestError::InvalidProvideKind { index: 0, kind } if kind == "definitely-not-a-real-kind"
    ));
}

#[test]
fn unknown_top_level_field_is_rejected() {
    let text = r#"
        name = "widgets"
        version = "1.0.0"
        totally_unknown_field = true
        [[provides]]
        kind = "source-files"
        path = "src/"
    "#;
    let err = parse(text).unwrap_err();
    assert!(matches!(err, ManifestError::MalformedDocument(_)));
}

#[test]
fn malformed_document_is_reported() {
    let err = parse("not valid = = toml").unwrap_err();
    assert!(matches!(err, ManifestError::MalformedDocument(_)));
}

#[test]
fn serialize_then_parse_round_trips() {
    let manifest = ManifestBuilder::new("round-trip", "3.1.4")
        .description("round trips cleanly")
        .provide(ProvideEntry {
            kind: ProvideKind::InterpretedPlugin,
            path: "script.lua".to_string(),
            build_hint: None,
            runtime_hint: None,
        })
        .dependency(
            "base",
            DependencySpec {
                git: "https://example.com/base.git".to_string(),
                git_ref: None,
            },
        )
        .finish()
        .expect("valid manifest");

    let text = serialize(&manifest).expect("serializes");
    let round_tripped = parse(&text).expect("round-tripped text parses");

    assert_eq!(round_tripped.name, manifest.name);
    assert_eq!(round_tripped.version, manifest.version);
    assert_eq!(round_tripped.description, manifest.description);
    assert_eq!(round_tripped.provides, manifest.provides);
    assert_eq!(round_tripped.dependencies, manifest.dependencies);
}
