//! Start and stop order resolution for whole service sets or selections

use crate::emitter::{StartOrder, order_with_preference};
use crate::graph::DependencyGraph;
use crate::service::ServiceSet;
use crate::weights::assign_weights;
use crate::{ResolveError, Result};
use indexmap::IndexSet;
use tracing::debug;

/// Compute the start order of every service in the set
pub fn resolve(services: &ServiceSet) -> Result<StartOrder> {
    Resolver::new().resolve(services)
}

/// Services that transitively depend on any of the given services.
///
/// The given services themselves are excluded; the result is in start order.
pub fn dependents_of(services: &ServiceSet, targets: &[String]) -> Result<Vec<String>> {
    let (graph, order) = Resolver::new().plan(services)?;
    let mut affected = collect_dependents(&graph, targets)?;

    for target in targets {
        affected.shift_remove(target.as_str());
    }

    Ok(order
        .into_names()
        .into_iter()
        .filter(|name| affected.contains(name.as_str()))
        .collect())
}

/// Configurable start order resolver
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    preferred: IndexSet<String>,
}

impl Resolver {
    /// Create a resolver with no preferred services
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the service ahead of the others in its layer.
    ///
    /// Preference never moves a service before one of its dependencies.
    /// Names that are not part of the resolved set are ignored.
    pub fn prefer(mut self, service: impl Into<String>) -> Self {
        self.preferred.insert(service.into());
        self
    }

    /// Preferred services, in the order they were added
    pub fn preferred(&self) -> impl Iterator<Item = &str> {
        self.preferred.iter().map(String::as_str)
    }

    /// Compute the start order of every service in the set
    pub fn resolve(&self, services: &ServiceSet) -> Result<StartOrder> {
        self.plan(services).map(|(_, order)| order)
    }

    /// Start order of the selected services and everything they depend on.
    ///
    /// An empty selection means every service. The whole set is resolved
    /// first, so a broken service anywhere fails the call.
    pub fn resolve_for(&self, services: &ServiceSet, targets: &[String]) -> Result<StartOrder> {
        let (graph, mut order) = self.plan(services)?;
        if targets.is_empty() {
            return Ok(order);
        }

        let selected = collect_dependencies(&graph, targets)?;
        order.retain(|name| selected.contains(name));
        debug!(
            targets = targets.len(),
            selected = order.len(),
            "Resolved start order for selection"
        );
        Ok(order)
    }

    /// Stop order of the selected services and everything depending on them.
    ///
    /// Dependents come before their dependencies. An empty selection means
    /// every service.
    pub fn stop_order_for(&self, services: &ServiceSet, targets: &[String]) -> Result<Vec<String>> {
        let (graph, mut order) = self.plan(services)?;
        if !targets.is_empty() {
            let selected = collect_dependents(&graph, targets)?;
            order.retain(|name| selected.contains(name));
        }

        let mut names = order.into_names();
        names.reverse();
        Ok(names)
    }

    fn plan(&self, services: &ServiceSet) -> Result<(DependencyGraph, StartOrder)> {
        let graph = DependencyGraph::build(services)?;
        debug!(
            services = graph.len(),
            edges = graph.edge_count(),
            "Built dependency graph"
        );

        let weights = assign_weights(&graph)?;
        let order = order_with_preference(services, &weights, &self.preferred)?;
        debug!(
            services = order.len(),
            layers = weights.max_weight().map_or(0, |max| max + 1),
            "Resolved start order"
        );

        Ok((graph, order))
    }
}

/// Collect the targets and all services they depend on, transitively
fn collect_dependencies<'a>(
    graph: &'a DependencyGraph,
    targets: &'a [String],
) -> Result<IndexSet<&'a str>> {
    let mut collected = IndexSet::new();
    let mut pending: Vec<&str> = Vec::new();

    for target in targets {
        if !graph.contains(target) {
            return Err(ResolveError::unknown_service(target.as_str()));
        }
        pending.push(target);
    }

    while let Some(service) = pending.pop() {
        if !collected.insert(service) {
            continue;
        }
        if let Some(dependencies) = graph.dependencies(service) {
            pending.extend(dependencies.iter().map(String::as_str));
        }
    }

    Ok(collected)
}

/// Collect the targets and all services that depend on them, transitively
fn collect_dependents<'a>(
    graph: &'a DependencyGraph,
    targets: &'a [String],
) -> Result<IndexSet<&'a str>> {
    let mut collected = IndexSet::new();
    let mut pending: Vec<&str> = Vec::new();

    for target in targets {
        if !graph.contains(target) {
            return Err(ResolveError::unknown_service(target.as_str()));
        }
        pending.push(target);
    }

    while let Some(service) = pending.pop() {
        if !collected.insert(service) {
            continue;
        }
        pending.extend(graph.dependents(service));
    }

    Ok(collected)
}
