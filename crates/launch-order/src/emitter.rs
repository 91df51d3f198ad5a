//! Start order emission
//!
//! Sorts services by weight. Equal weights are ordered by definition order,
//! so the sort key is `(weight, position)` and never the weight alone: two
//! services sharing a layer are distinct entries, not duplicates.

use crate::service::ServiceSet;
use crate::weights::WeightTable;
use crate::{ResolveError, Result};
use indexmap::IndexSet;
use serde::Serialize;

/// A service placed in the start order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledService {
    /// Service name
    pub name: String,
    /// Readiness layer of the service
    pub weight: usize,
}

/// Services in an order that starts every dependency before its dependents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StartOrder {
    services: Vec<ScheduledService>,
}

impl StartOrder {
    /// Iterate service names in start order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.services.iter().map(|s| s.name.as_str())
    }

    /// Consume the order, keeping only the names
    pub fn into_names(self) -> Vec<String> {
        self.services.into_iter().map(|s| s.name).collect()
    }

    /// Iterate scheduled services in start order
    pub fn iter(&self) -> impl Iterator<Item = &ScheduledService> {
        self.services.iter()
    }

    /// Weight of a service in this order
    pub fn weight(&self, service: &str) -> Option<usize> {
        self.services
            .iter()
            .find(|s| s.name == service)
            .map(|s| s.weight)
    }

    /// Position of a service in this order
    pub fn position(&self, service: &str) -> Option<usize> {
        self.services.iter().position(|s| s.name == service)
    }

    /// Whether the service is part of this order
    pub fn contains(&self, service: &str) -> bool {
        self.position(service).is_some()
    }

    /// Service names grouped by weight, lightest layer first.
    ///
    /// Services in one layer do not depend on each other and may be started
    /// together once the previous layers are up.
    pub fn layers(&self) -> Vec<Vec<&str>> {
        let mut layers: Vec<Vec<&str>> = Vec::new();
        let mut current = None;
        for service in &self.services {
            if current != Some(service.weight) {
                layers.push(Vec::new());
                current = Some(service.weight);
            }
            if let Some(layer) = layers.last_mut() {
                layer.push(service.name.as_str());
            }
        }
        layers
    }

    /// The reverse of the start order: dependents stop before their dependencies
    pub fn stop_order(&self) -> Vec<&str> {
        self.services.iter().rev().map(|s| s.name.as_str()).collect()
    }

    /// Number of services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the order is empty
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.services.retain(|s| keep(&s.name));
    }
}

impl IntoIterator for StartOrder {
    type Item = ScheduledService;
    type IntoIter = std::vec::IntoIter<ScheduledService>;

    fn into_iter(self) -> Self::IntoIter {
        self.services.into_iter()
    }
}

/// Order services by ascending weight, ties broken by definition order
pub fn order(services: &ServiceSet, weights: &WeightTable) -> Result<StartOrder> {
    order_with_preference(services, weights, &IndexSet::new())
}

/// Order services by ascending weight.
///
/// Within a layer, preferred services come first; remaining ties are broken by
/// definition order. Every service of the set must have a weight.
pub fn order_with_preference(
    services: &ServiceSet,
    weights: &WeightTable,
    preferred: &IndexSet<String>,
) -> Result<StartOrder> {
    let mut unweighted = Vec::new();
    let mut keyed: Vec<(usize, bool, usize, &str)> = Vec::with_capacity(services.len());

    for (position, name) in services.keys().enumerate() {
        match weights.get(name) {
            Some(weight) => {
                keyed.push((weight, !preferred.contains(name), position, name.as_str()));
            }
            None => unweighted.push(name.clone()),
        }
    }

    if !unweighted.is_empty() {
        return Err(ResolveError::UnresolvableDependency {
            services: unweighted,
            missing: Vec::new(),
        });
    }

    keyed.sort_unstable_by_key(|&(weight, not_preferred, position, _)| {
        (weight, not_preferred, position)
    });

    Ok(StartOrder {
        services: keyed
            .into_iter()
            .map(|(weight, _, _, name)| ScheduledService {
                name: name.to_string(),
                weight,
            })
            .collect(),
    })
}
