//! # Launch Order
//!
//! Dependency-aware startup ordering for named services.
//!
//! Services reference each other through explicit `depends_on` declarations
//! and through `links` (`target[:alias]`). Resolution runs in three stages:
//!
//! 1. [`DependencyGraph::build`] extracts the dependency set of each service.
//! 2. [`assign_weights`] gives every service a readiness layer by iterative
//!    propagation, failing when a cycle or a missing service stalls it.
//! 3. [`order`] sorts services by layer, breaking ties by definition order.
//!
//! Resolution is a pure function of its input: no I/O, no shared state.
//!
//! # Example
//!
//! ```
//! use launch_order::{ServiceDefinition, ServiceSet, resolve};
//!
//! let mut services = ServiceSet::new();
//! services.insert("web".to_string(), ServiceDefinition::new().link("api:backend"));
//! services.insert("api".to_string(), ServiceDefinition::new().depends_on("db"));
//! services.insert("db".to_string(), ServiceDefinition::new());
//!
//! let order = resolve(&services)?;
//! assert_eq!(order.into_names(), ["db", "api", "web"]);
//! # Ok::<(), launch_order::ResolveError>(())
//! ```

#![warn(missing_docs)]

pub mod emitter;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod service;
pub mod weights;

pub use emitter::{ScheduledService, StartOrder, order, order_with_preference};
pub use error::{DanglingReference, ResolveError, Result};
pub use graph::DependencyGraph;
pub use resolver::{Resolver, dependents_of, resolve};
pub use service::{LINK_DELIMITER, Link, ServiceDefinition, ServiceSet};
pub use weights::{WeightTable, assign_weights};
