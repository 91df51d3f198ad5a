//! Weight assignment by iterative layering
//!
//! A service without dependencies weighs 0; any other service weighs one more
//! than its heaviest dependency. Weights are propagated in passes over the
//! unresolved services until a pass makes no progress. Anything still
//! unresolved at that point sits on a cycle, depends on a missing service, or
//! depends on something that does.

use crate::graph::DependencyGraph;
use crate::{DanglingReference, ResolveError, Result};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

/// Readiness layer of every service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightTable {
    weights: IndexMap<String, usize>,
}

impl WeightTable {
    /// Weight of a service, if it has one
    pub fn get(&self, service: &str) -> Option<usize> {
        self.weights.get(service).copied()
    }

    /// Whether the service has been weighted
    pub fn contains(&self, service: &str) -> bool {
        self.weights.contains_key(service)
    }

    /// Iterate services and weights in the order they were resolved
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.weights.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    /// Highest weight in the table
    pub fn max_weight(&self) -> Option<usize> {
        self.weights.values().copied().max()
    }

    /// Number of weighted services
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Compute the weight of every service in the graph.
///
/// Fails with [`ResolveError::UnresolvableDependency`] naming every service
/// left without a weight when propagation stalls.
pub fn assign_weights(graph: &DependencyGraph) -> Result<WeightTable> {
    let mut weights: IndexMap<String, usize> = IndexMap::with_capacity(graph.len());
    let mut unresolved: IndexSet<&str> = graph.iter().map(|(name, _)| name).collect();

    let mut pass = 0;
    let mut productive = true;
    while !unresolved.is_empty() && productive {
        pass += 1;
        productive = false;

        for (service, dependencies) in graph.iter() {
            if !unresolved.contains(service) {
                continue;
            }

            let weight = if dependencies.is_empty() {
                Some(0)
            } else {
                dependencies
                    .iter()
                    .map(|dep| weights.get(dep.as_str()).copied())
                    .collect::<Option<Vec<usize>>>()
                    .and_then(|resolved| resolved.into_iter().max())
                    .map(|max| max + 1)
            };

            if let Some(weight) = weight {
                weights.insert(service.to_string(), weight);
                unresolved.shift_remove(service);
                productive = true;
            }
        }

        debug!(
            pass,
            resolved = weights.len(),
            remaining = unresolved.len(),
            "Weight propagation pass finished"
        );
    }

    if !unresolved.is_empty() {
        let missing: Vec<DanglingReference> = unresolved
            .iter()
            .flat_map(|service| {
                graph
                    .dependencies(service)
                    .into_iter()
                    .flatten()
                    .filter(|dep| !graph.contains(dep))
                    .map(move |dep| DanglingReference {
                        service: (*service).to_string(),
                        dependency: dep.clone(),
                    })
            })
            .collect();
        let services: Vec<String> = unresolved.iter().map(|s| s.to_string()).collect();

        warn!(
            services = ?services,
            dangling = missing.len(),
            "Weight propagation stalled"
        );
        return Err(ResolveError::UnresolvableDependency { services, missing });
    }

    Ok(WeightTable { weights })
}
