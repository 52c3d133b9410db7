//! Parsing and serializing [`PluginManifest`] to/from the TOML manifest
//! document (conventionally `plugin.toml` at a plugin directory's root).
//!
//! Deserialization goes through a `Raw*` staging layer (serde structs with
//! `deny_unknown_fields`) and is then lowered into the public model,
//! validating along the way. This mirrors the raw/final split used for
//! manifests elsewhere in this crate's lineage, except here the raw layer
//! exists purely to get `deny_unknown_fields` and snake_case TOML tables;
//! none of the fields need string-to-typed parsing beyond `ProvideKind`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::manifest::{
    BuildHints, DependencySpec, ManifestError, PluginManifest, ProvideEntry, ProvideKind,
    RuntimeHint, SourceSpec,
};

pub fn parse(text: &str) -> Result<PluginManifest, ManifestError> {
    let raw: RawManifest =
        toml::from_str(text).map_err(|e| ManifestError::MalformedDocument(e.to_string()))?;
    raw.into_manifest()
}

pub fn serialize(manifest: &PluginManifest) -> Result<String, ManifestError> {
    let raw = RawManifest::from_manifest(manifest);
    toml::to_string_pretty(&raw).map_err(|e| ManifestError::MalformedDocument(e.to_string()))
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    runtime_version_spec: Option<String>,
    #[serde(default)]
    checksum: Option<String>,
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    provides: Vec<RawProvideEntry>,
    #[serde(default)]
    dependencies: HashMap<String, RawDependencySpec>,
    #[serde(default)]
    build: Option<RawBuildHints>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawSource {
    git: String,
    #[serde(rename = "ref", default)]
    git_ref: Option<String>,
    #[serde(default)]
    commit: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawProvideEntry {
    kind: String,
    path: String,
    #[serde(default)]
    build_hint: Option<RawBuildHints>,
    #[serde(default)]
    runtime_hint: Option<RawRuntimeHint>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
struct RawBuildHints {
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    output_filename: Option<String>,
    #[serde(default)]
    extra: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
struct RawRuntimeHint {
    #[serde(default)]
    interpreter_min_version: Option<String>,
    #[serde(default)]
    dependency_manifest_file: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct RawDependencySpec {
    git: String,
    #[serde(rename = "ref", default)]
    git_ref: Option<String>,
}

impl RawManifest {
    fn into_manifest(self) -> Result<PluginManifest, ManifestError> {
        let name = self.name.ok_or(ManifestError::MissingField("name"))?;
        let version = self.version.ok_or(ManifestError::MissingField("version"))?;

        let mut provides = Vec::with_capacity(self.provides.len());
        for (index, raw_entry) in self.provides.into_iter().enumerate() {
            let kind = ProvideKind::from_str_opt(&raw_entry.kind).ok_or_else(|| {
                ManifestError::InvalidProvideKind {
                    index,
                    kind: raw_entry.kind.clone(),
                }
            })?;
            provides.push(ProvideEntry {
                kind,
                path: raw_entry.path,
                build_hint: raw_entry.build_hint.map(RawBuildHints::into_hints),
                runtime_hint: raw_entry.runtime_hint.map(RawRuntimeHint::into_hint),
            });
        }

        let dependencies = self
            .dependencies
            .into_iter()
            .map(|(name, raw)| {
                (
                    name,
                    DependencySpec {
                        git: raw.git,
                        git_ref: raw.git_ref,
                    },
                )
            })
            .collect();

        let manifest = PluginManifest {
            name,
            version,
            description: self.description,
            author: self.author,
            license: self.license,
            runtime_version_spec: self.runtime_version_spec,
            source: self.source.map(|s| SourceSpec {
                git: s.git,
                git_ref: s.git_ref,
                commit: s.commit,
            }),
            provides,
            dependencies,
            build: self.build.map(RawBuildHints::into_hints),
            checksum: self.checksum,
            plugin_root: None,
        };

        manifest.validate()?;
        Ok(manifest)
    }

    fn from_manifest(manifest: &PluginManifest) -> Self {
        Self {
            name: Some(manifest.name.clone()),
            version: Some(manifest.version.clone()),
            description: manifest.description.clone(),
            author: manifest.author.clone(),
            license: manifest.license.clone(),
            runtime_version_spec: manifest.runtime_version_spec.clone(),
            checksum: manifest.checksum.clone(),
            source: manifest.source.as_ref().map(|s| RawSource {
                git: s.git.clone(),
                git_ref: s.git_ref.clone(),
                commit: s.commit.clone(),
            }),
            provides: manifest
                .provides
                .iter()
                .map(|p| RawProvideEntry {
                    kind: p.kind.as_str().to_string(),
                    path: p.path.clone(),
                    build_hint: p.build_hint.clone().map(RawBuildHints::from_hints),
                    runtime_hint: p.runtime_hint.clone().map(RawRuntimeHint::from_hint),
                })
                .collect(),
            dependencies: manifest
                .dependencies
                .iter()
                .map(|(name, spec)| {
                    (
                        name.clone(),
                        RawDependencySpec {
                            git: spec.git.clone(),
                            git_ref: spec.git_ref.clone(),
                        },
                    )
                })
                .collect(),
            build: manifest.build.clone().map(RawBuildHints::from_hints),
        }
    }
}

impl RawBuildHints {
    fn into_hints(self) -> BuildHints {
        BuildHints {
            target: self.target,
            output_filename: self.output_filename,
            extra: self.extra,
        }
    }

    fn from_hints(hints: BuildHints) -> Self {
        Self {
            target: hints.target,
            output_filename: hints.output_filename,
            extra: hints.extra,
        }
    }
}

impl RawRuntimeHint {
    fn into_hint(self) -> RuntimeHint {
        RuntimeHint {
            interpreter_min_version: self.interpreter_min_version,
            dependency_manifest_file: self.dependency_manifest_file,
        }
    }

    fn from_hint(hint: RuntimeHint) -> Self {
        Self {
            interpreter_min_version: hint.interpreter_min_version,
            dependency_manifest_file: hint.dependency_manifest_file,
        }
    }
}
