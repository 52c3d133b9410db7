//! Dependency satisfaction checking, conflict detection, and topological
//! install ordering.
//!
//! The resolver is stateless: both operations are pure functions of their
//! inputs. The only state machine in this module is the DFS tri-state
//! marker local to [`installation_order`]'s one invocation.

use std::collections::{HashMap, HashSet};

use crate::manifest::{DependencySpec, PluginManifest};

/// The mapping from plugin-name to manifest representing the current
/// installation state. Read-only for the duration of a resolve call;
/// concurrent resolves against the same installed set are safe.
pub type InstalledSet = HashMap<String, PluginManifest>;

/// A genuine incompatibility requiring user action, as opposed to a merely
/// missing dependency (which is just something to fetch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub name: String,
    pub detail: ConflictDetail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictDetail {
    /// A plugin declared a dependency on itself.
    SelfDependency,
}

/// The resolver's output for one target manifest.
///
/// Version strings are not compared anywhere in this report: a dependency
/// is either satisfied by the presence of its name in the installed set or
/// it isn't. A later revision that wants to elevate a mismatched pinned
/// version to a conflict would need to carry the required version alongside
/// each `to_install` entry and compare it against the installed manifest's
/// `version` field here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionReport {
    pub conflicts: Vec<Conflict>,
    pub to_install: Vec<DependencySpec>,
    pub satisfied: HashSet<String>,
}

impl ResolutionReport {
    pub fn is_resolved(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Compare `target`'s declared dependencies against `installed`.
///
/// For each declared dependency: a self-dependency is a conflict; a name
/// already present in `installed` is satisfied; anything else is appended
/// to `to_install` in declaration order (duplicates are preserved; the
/// installer may dedupe). No conflict is raised for a merely-missing
/// dependency: presence is resolvable by fetching, incompatibility is not.
pub fn resolve(target: &PluginManifest, installed: &InstalledSet) -> ResolutionReport {
    let mut report = ResolutionReport::default();

    for (name, spec) in ordered_dependencies(target) {
        if name == target.name {
            report.conflicts.push(Conflict {
                name: name.clone(),
                detail: ConflictDetail::SelfDependency,
            });
        } else if installed.contains_key(&name) {
            report.satisfied.insert(name.clone());
        } else {
            report.to_install.push(spec.clone());
        }
    }

    report
}

/// `target.dependencies.keys - installed.keys - {target.name}`, in
/// declaration order, duplicates preserved.
pub fn check_dependencies(target: &PluginManifest, installed: &InstalledSet) -> Vec<String> {
    ordered_dependencies(target)
        .into_iter()
        .filter(|(name, _)| *name != target.name && !installed.contains_key(name))
        .map(|(name, _)| name)
        .collect()
}

/// `HashMap` iteration order is unspecified, but spec.md's declaration-order
/// guarantees are about the *manifest source*, not this in-memory
/// representation; keys are sorted here purely to make resolver output
/// deterministic across runs for a given manifest, since `dependencies` is
/// a map (keys unique) rather than a sequence.
fn ordered_dependencies(target: &PluginManifest) -> Vec<(String, DependencySpec)> {
    let mut deps: Vec<(String, DependencySpec)> = target
        .dependencies
        .iter()
        .map(|(name, spec)| (name.clone(), spec.clone()))
        .collect();
    deps.sort_by(|a, b| a.0.cmp(&b.0));
    deps
}

/// Topological-sort failure: the graph restricted to the input batch
/// contains a cycle. No partial ordering is returned.
#[derive(Debug, Clone, thiserror::Error)]
#[error("dependency cycle: {}", cycle_names.join(" -> "))]
pub struct CycleError {
    pub cycle_names: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Topological sort over `plugins` (nodes) with edges `a -> b` iff `b` is a
/// dependency of `a` and `b` is also present in `plugins`. Dependencies
/// pointing outside the batch are ignored, since they are assumed already
/// installed or installed separately.
///
/// DFS with three-state marking: unvisited, in-progress, done. Encountering
/// an in-progress node during descent is a cycle, reported with the stack
/// slice from the re-encountered node to the top. Ties between otherwise
/// unordered nodes are broken by input order.
pub fn installation_order(plugins: &[PluginManifest]) -> Result<Vec<String>, CycleError> {
    let by_name: HashMap<&str, &PluginManifest> =
        plugins.iter().map(|p| (p.name.as_str(), p)).collect();

    let mut marks: HashMap<&str, Mark> = plugins.iter().map(|p| (p.name.as_str(), Mark::Unvisited)).collect();
    let mut order: Vec<String> = Vec::with_capacity(plugins.len());
    let mut stack: Vec<&str> = Vec::new();

    for plugin in plugins {
        visit(plugin.name.as_str(), &by_name, &mut marks, &mut stack, &mut order)?;
    }

    Ok(order)
}

fn visit<'a>(
    name: &'a str,
    by_name: &HashMap<&'a str, &'a PluginManifest>,
    marks: &mut HashMap<&'a str, Mark>,
    stack: &mut Vec<&'a str>,
    order: &mut Vec<String>,
) -> Result<(), CycleError> {
    match marks.get(name) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::InProgress) => {
            let start = stack.iter().position(|&n| n == name).unwrap_or(0);
            let cycle_names = stack[start..].iter().map(|s| s.to_string()).collect();
            return Err(CycleError { cycle_names });
        }
        _ => {}
    }

    marks.insert(name, Mark::InProgress);
    stack.push(name);

    if let Some(plugin) = by_name.get(name) {
        let mut dep_names: Vec<&str> = plugin
            .dependencies
            .keys()
            .map(|s| s.as_str())
            .filter(|dep_name| by_name.contains_key(dep_name))
            .collect();
        dep_names.sort();
        for dep_name in dep_names {
            visit(dep_name, by_name, marks, stack, order)?;
        }
    }

    stack.pop();
    marks.insert(name, Mark::Done);
    order.push(name.to_string());
    Ok(())
}
