//! # satchel-core
//!
//! Content-addressed discovery and dependency resolution for plugin
//! packages: a manifest model and parser, recursive installation-root
//! discovery, a dependency resolver with topological install ordering and
//! cycle detection, and the abstract contract a revision-control fetcher
//! must satisfy.
//!
//! ## Modules
//!
//! - [`manifest`]: the [`manifest::PluginManifest`] model and its builder.
//! - [`codec`]: parse/serialize a manifest to/from its TOML document.
//! - [`fetcher`]: the [`fetcher::Fetcher`] contract an install driver
//!   implements, plus the reference-classification helpers it needs.
//! - [`discovery`]: recursive scan of an installation root into
//!   [`discovery::DiscoveredPlugin`]s.
//! - [`resolver`]: dependency satisfaction, conflicts, and topological
//!   install ordering.
//! - [`validation`]: cross-plugin duplicate-name and dangling-dependency
//!   checks over one discovery batch.
//! - [`error`]: the crate-wide [`error::PluginManagerError`] aggregator.
//!
//! What this crate does not do, by design: execute plugins, dynamically
//! load native code, solve version-range constraints, or perform network
//! transport. Those remain the consuming install driver's job.

pub mod codec;
pub mod discovery;
pub mod error;
pub mod fetcher;
pub mod manifest;
pub mod resolver;
pub mod validation;

pub use discovery::{discover, discover_sorted, DiscoveredPlugin, DiscoveryError, DiscoveryReport};
pub use error::PluginManagerError;
pub use fetcher::{FetchError, Fetcher};
pub use manifest::{
    BuildHints, DependencySpec, ManifestBuilder, ManifestError, PluginManifest, ProvideEntry,
    ProvideKind, RuntimeHint, SourceSpec,
};
pub use resolver::{
    check_dependencies, installation_order, resolve, Conflict, ConflictDetail, CycleError,
    InstalledSet, ResolutionReport,
};
pub use validation::{validate, ValidationError, ValidationReport, ValidationWarning};

#[cfg(test)]
mod tests;
