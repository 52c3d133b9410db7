//! Recursive scan of an installation root, producing a validated set of
//! installed plugins.
//!
//! A subdirectory without a manifest file is silently ignored. A manifest
//! that fails to parse is reported via a per-entry error but does not abort
//! the scan. The scan yields a partial result plus an accumulated error
//! list, exactly as a single bad plugin directory should never take down
//! discovery of every other plugin.

use std::path::{Path, PathBuf};

use crate::codec;
use crate::manifest::{ManifestError, PluginManifest};
use crate::resolver;

/// The conventional manifest filename at the root of each plugin directory.
pub const MANIFEST_FILE_NAME: &str = "plugin.toml";

/// A manifest plus the absolute filesystem path where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredPlugin {
    pub manifest: PluginManifest,
    pub path: PathBuf,
}

/// A single plugin directory's manifest failed to load; carried alongside
/// the successful discoveries rather than aborting the scan.
#[derive(Debug, thiserror::Error)]
#[error("failed to load manifest at {}: {source}", path.display())]
pub struct DiscoveryError {
    pub path: PathBuf,
    #[source]
    pub source: DiscoveryErrorKind,
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryErrorKind {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("{0}")]
    Cycle(#[from] resolver::CycleError),
}

/// The outcome of one discovery pass: the plugins that loaded successfully
/// plus the per-entry failures encountered along the way.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub plugins: Vec<DiscoveredPlugin>,
    pub errors: Vec<DiscoveryError>,
}

/// Scan `root`'s immediate subdirectories for a `plugin.toml` each.
///
/// A non-existent root is not an error; the result is an empty report.
/// Ordering is stable by directory-entry name.
pub async fn discover(root: &Path) -> DiscoveryReport {
    let mut report = DiscoveryReport::default();

    let mut entry_names = match tokio::fs::read_dir(root).await {
        Ok(mut read_dir) => {
            let mut names = Vec::new();
            loop {
                match read_dir.next_entry().await {
                    Ok(Some(entry)) => names.push(entry.path()),
                    Ok(None) => break,
                    Err(e) => {
                        log::warn!("error reading entry under {}: {e}", root.display());
                        break;
                    }
                }
            }
            names
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                log::debug!("discovery root {} does not exist; empty result", root.display());
            } else {
                log::warn!("could not read discovery root {}: {e}", root.display());
            }
            return report;
        }
    };

    entry_names.sort();

    for entry_path in entry_names {
        let is_dir = match tokio::fs::metadata(&entry_path).await {
            Ok(meta) => meta.is_dir(),
            Err(e) => {
                log::warn!("could not stat {}: {e}", entry_path.display());
                continue;
            }
        };
        if !is_dir {
            continue;
        }

        let manifest_path = entry_path.join(MANIFEST_FILE_NAME);
        match tokio::fs::read_to_string(&manifest_path).await {
            Ok(text) => match codec::parse(&text) {
                Ok(mut manifest) => {
                    manifest.plugin_root = Some(entry_path.clone());
                    log::debug!("discovered plugin '{}' at {}", manifest.name, entry_path.display());
                    report.plugins.push(DiscoveredPlugin {
                        manifest,
                        path: entry_path,
                    });
                }
                Err(e) => report.errors.push(DiscoveryError {
                    path: manifest_path,
                    source: DiscoveryErrorKind::Manifest(e),
                }),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // No manifest in this subdirectory: not a plugin, not an error.
            }
            Err(e) => report.errors.push(DiscoveryError {
                path: manifest_path,
                source: DiscoveryErrorKind::Io(e),
            }),
        }
    }

    report
}

/// Like [`discover`], but the successful plugins are reordered into
/// topological dependency position (dependencies before dependents), so a
/// caller installing in order observes every dependency first.
///
/// If the discovered set contains a dependency cycle the unsorted plugins
/// are returned unchanged and the cycle is reported as an additional error;
/// discovery itself never fails outright.
pub async fn discover_sorted(root: &Path) -> DiscoveryReport {
    let mut report = discover(root).await;

    let manifests: Vec<PluginManifest> = report.plugins.iter().map(|p| p.manifest.clone()).collect();
    match resolver::installation_order(&manifests) {
        Ok(ordered_names) => {
            let mut by_name: std::collections::HashMap<String, DiscoveredPlugin> = report
                .plugins
                .drain(..)
                .map(|p| (p.manifest.name.clone(), p))
                .collect();
            report.plugins = ordered_names
                .into_iter()
                .filter_map(|name| by_name.remove(&name))
                .collect();
        }
        Err(cycle) => {
            log::error!("dependency cycle in discovered plugins: {:?}", cycle.cycle_names);
            report.errors.push(DiscoveryError {
                path: root.to_path_buf(),
                source: DiscoveryErrorKind::Cycle(cycle),
            });
        }
    }

    report
}
