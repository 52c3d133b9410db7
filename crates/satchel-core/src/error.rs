//! A crate-wide error aggregator for callers that can fail for more than
//! one reason (for example, a "discover a root, then validate it" helper).
//! Narrowly-scoped functions keep returning their own specific error type
//! directly. [`crate::resolver::installation_order`] returns
//! [`crate::resolver::CycleError`], not this type.

use thiserror::Error;

use crate::discovery::DiscoveryError;
use crate::manifest::ManifestError;
use crate::resolver::CycleError;

#[derive(Debug, Error)]
pub enum PluginManagerError {
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("dependency resolution error: {0}")]
    Cycle(#[from] CycleError),
}
