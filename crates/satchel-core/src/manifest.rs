//! The in-memory representation of a plugin descriptor.
//!
//! [`PluginManifest`] is pure data: field access, equality, and conversion
//! to/from the serialized form. Construction through [`ManifestBuilder`] or
//! [`crate::codec::parse`] is the only place validation happens; once built,
//! a manifest is immutable and carries no behavior beyond the helpers below.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// A plugin descriptor: name, version, provided artifacts, dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginManifest {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub runtime_version_spec: Option<String>,
    pub source: Option<SourceSpec>,
    pub provides: Vec<ProvideEntry>,
    pub dependencies: HashMap<String, DependencySpec>,
    pub build: Option<BuildHints>,
    /// Content digest of the fetched tree. Echoed, never verified by this
    /// crate; verification is a fetch-time concern for the install driver.
    pub checksum: Option<String>,
    /// Populated by [`crate::discovery`], never by the codec: the absolute
    /// directory a manifest was discovered in, used to resolve the relative
    /// `provides[i].path` entries.
    pub plugin_root: Option<PathBuf>,
}

/// Where a plugin's source tree comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub git: String,
    pub git_ref: Option<String>,
    pub commit: Option<String>,
}

/// One artifact a plugin contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvideEntry {
    pub kind: ProvideKind,
    pub path: String,
    pub build_hint: Option<BuildHints>,
    pub runtime_hint: Option<RuntimeHint>,
}

/// The closed set of artifact kinds a plugin may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvideKind {
    SourceFiles,
    NativePluginA,
    NativePluginB,
    InterpretedPlugin,
}

impl ProvideKind {
    pub const ALL: [ProvideKind; 4] = [
        ProvideKind::SourceFiles,
        ProvideKind::NativePluginA,
        ProvideKind::NativePluginB,
        ProvideKind::InterpretedPlugin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProvideKind::SourceFiles => "source-files",
            ProvideKind::NativePluginA => "native-plugin-a",
            ProvideKind::NativePluginB => "native-plugin-b",
            ProvideKind::InterpretedPlugin => "interpreted-plugin",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for ProvideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-artifact build parameters. Opaque to the core; consumed by the
/// install driver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildHints {
    pub target: Option<String>,
    pub output_filename: Option<String>,
    pub extra: HashMap<String, String>,
}

/// Per-artifact runtime parameters. Opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeHint {
    pub interpreter_min_version: Option<String>,
    pub dependency_manifest_file: Option<String>,
}

/// Source pointer for a declared dependency. Always carries a fetchable URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub git: String,
    pub git_ref: Option<String>,
}

impl PluginManifest {
    /// Create a manifest with the minimum required fields; everything else
    /// defaults empty.
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            description: None,
            author: None,
            license: None,
            runtime_version_spec: None,
            source: None,
            provides: Vec::new(),
            dependencies: HashMap::new(),
            build: None,
            checksum: None,
            plugin_root: None,
        }
    }

    /// Check the two invariants the model itself is responsible for:
    /// the name matches `[a-z][a-z0-9-]*` and `provides` is non-empty.
    /// Called by [`ManifestBuilder::finish`] and by [`crate::codec::parse`]
    /// so both construction paths enforce the same rule.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if !is_valid_package_name(&self.name) {
            return Err(ManifestError::InvalidPackageName(self.name.clone()));
        }
        if self.provides.is_empty() {
            return Err(ManifestError::MissingOrEmptyProvides);
        }
        Ok(())
    }
}

/// `[a-z][a-z0-9-]*`
pub fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Schema/validation failures for a [`PluginManifest`].
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("'provides' is missing or empty")]
    MissingOrEmptyProvides,

    #[error("invalid package name: {0:?}")]
    InvalidPackageName(String),

    #[error("provides[{index}] has invalid kind: {kind:?}")]
    InvalidProvideKind { index: usize, kind: String },

    #[error("malformed manifest document: {0}")]
    MalformedDocument(String),
}

/// Builder for creating a [`PluginManifest`] field by field.
pub struct ManifestBuilder {
    manifest: PluginManifest,
}

impl ManifestBuilder {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            manifest: PluginManifest::new(name, version),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.manifest.description = Some(description.to_string());
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.manifest.author = Some(author.to_string());
        self
    }

    pub fn license(mut self, license: &str) -> Self {
        self.manifest.license = Some(license.to_string());
        self
    }

    pub fn runtime_version_spec(mut self, spec: &str) -> Self {
        self.manifest.runtime_version_spec = Some(spec.to_string());
        self
    }

    pub fn source(mut self, source: SourceSpec) -> Self {
        self.manifest.source = Some(source);
        self
    }

    pub fn provide(mut self, entry: ProvideEntry) -> Self {
        self.manifest.provides.push(entry);
        self
    }

    pub fn dependency(mut self, name: &str, spec: DependencySpec) -> Self {
        self.manifest.dependencies.insert(name.to_string(), spec);
        self
    }

    pub fn build(mut self, hints: BuildHints) -> Self {
        self.manifest.build = Some(hints);
        self
    }

    pub fn checksum(mut self, checksum: &str) -> Self {
        self.manifest.checksum = Some(checksum.to_string());
        self
    }

    /// Build the manifest, checking the name and `provides` invariants.
    pub fn finish(self) -> Result<PluginManifest, ManifestError> {
        self.manifest.validate()?;
        Ok(self.manifest)
    }
}
