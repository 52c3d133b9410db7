//! Cross-plugin checks over a single discovery batch: duplicate names
//! (error) and dangling dependencies (warning).
//!
//! Validation is strictly scoped to one [`crate::discovery::discover`]
//! call's output; cross-batch or cross-root validation is not defined.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::discovery::DiscoveredPlugin;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate plugin name '{name}': found at {} and {}", path_a.display(), path_b.display())]
pub struct ValidationError {
    pub name: String,
    pub path_a: PathBuf,
    pub path_b: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("plugin '{plugin}' depends on undiscovered plugin '{dependency}'")]
pub struct ValidationWarning {
    pub plugin: String,
    pub dependency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a discovery batch for duplicate names (error) and dependencies on
/// names absent from the same batch (warning). Warnings never invalidate.
pub fn validate(plugins: &[DiscoveredPlugin]) -> ValidationReport {
    let mut report = ValidationReport::default();

    let mut first_seen: HashMap<&str, &PathBuf> = HashMap::new();
    for plugin in plugins {
        let name = plugin.manifest.name.as_str();
        match first_seen.get(name) {
            Some(&earlier_path) => report.errors.push(ValidationError {
                name: name.to_string(),
                path_a: earlier_path.clone(),
                path_b: plugin.path.clone(),
            }),
            None => {
                first_seen.insert(name, &plugin.path);
            }
        }
    }

    let discovered_names: HashSet<&str> = plugins.iter().map(|p| p.manifest.name.as_str()).collect();
    for plugin in plugins {
        for dep_name in plugin.manifest.dependencies.keys() {
            if !discovered_names.contains(dep_name.as_str()) {
                report.warnings.push(ValidationWarning {
                    plugin: plugin.manifest.name.clone(),
                    dependency: dep_name.clone(),
                });
            }
        }
    }

    report
}
