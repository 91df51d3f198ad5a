//! Dependency graph extraction
//!
//! Turns service definitions into an adjacency relation from each service to
//! the services it depends on. This stage is purely syntactic: it neither
//! checks that dependencies exist nor looks for cycles.

use crate::service::{Link, ServiceSet};
use crate::Result;
use indexmap::{IndexMap, IndexSet};

/// Mapping from each service to the set of services it depends on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
    /// Build the graph from a service set.
    ///
    /// A service's dependencies are its `depends_on` entries together with the
    /// target of each link. Fails on the first malformed link.
    pub fn build(services: &ServiceSet) -> Result<Self> {
        let mut edges = IndexMap::with_capacity(services.len());

        for (name, service) in services {
            let mut dependencies =
                IndexSet::with_capacity(service.depends_on.len() + service.links.len());
            dependencies.extend(service.depends_on.iter().cloned());

            // links also count as dependencies
            for link in &service.links {
                dependencies.insert(Link::parse(link)?.target);
            }

            edges.insert(name.clone(), dependencies);
        }

        Ok(Self { edges })
    }

    /// Dependencies of a service, or `None` if the service is not in the graph
    pub fn dependencies(&self, service: &str) -> Option<&IndexSet<String>> {
        self.edges.get(service)
    }

    /// Whether the service is part of the graph
    pub fn contains(&self, service: &str) -> bool {
        self.edges.contains_key(service)
    }

    /// Services that directly depend on the given one
    pub fn dependents<'a>(&'a self, service: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |(_, deps)| deps.contains(service))
            .map(|(name, _)| name.as_str())
    }

    /// Iterate services and their dependencies in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.edges.iter().map(|(name, deps)| (name.as_str(), deps))
    }

    /// Number of services in the graph
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no services
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total number of dependency edges
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }
}
