//! Error types for launch-order

use std::fmt;
use thiserror::Error;

/// Result type alias for launch-order operations
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors raised while computing a launch order
///
/// Every error is fatal to the call that produced it; no partial order is
/// ever returned alongside one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A link reference did not split into `target` or `target:alias`
    #[error("Service link '{link}' is invalid")]
    MalformedLink {
        /// The offending link string, as written
        link: String,
    },

    /// Weight propagation stalled before every service obtained a weight
    #[error("{}", unresolvable_message(.services, .missing))]
    UnresolvableDependency {
        /// Services whose weight could not be computed, in definition order
        services: Vec<String>,
        /// Dependencies among the stuck services that name no known service
        missing: Vec<DanglingReference>,
    },

    /// A selected service is not part of the service set
    #[error("Service '{service}' not found")]
    UnknownService {
        /// The requested service name
        service: String,
    },
}

impl ResolveError {
    /// Create a malformed link error
    pub fn malformed_link(link: impl Into<String>) -> Self {
        Self::MalformedLink { link: link.into() }
    }

    /// Create an unknown service error
    pub fn unknown_service(service: impl Into<String>) -> Self {
        Self::UnknownService {
            service: service.into(),
        }
    }

    /// Whether this error was caused, at least in part, by a reference to a
    /// service that does not exist
    pub fn is_dangling_reference(&self) -> bool {
        matches!(self, Self::UnresolvableDependency { missing, .. } if !missing.is_empty())
    }

    /// Services implicated in an unresolvable dependency error
    pub fn unresolved_services(&self) -> &[String] {
        match self {
            Self::UnresolvableDependency { services, .. } => services,
            _ => &[],
        }
    }
}

/// A dependency pointing at a service that is not defined
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DanglingReference {
    /// The service declaring the dependency
    pub service: String,
    /// The dependency name that matched no service
    pub dependency: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' depends on unknown service '{}'",
            self.service, self.dependency
        )
    }
}

fn unresolvable_message(services: &[String], missing: &[DanglingReference]) -> String {
    let mut message = format!(
        "Launch order of services [{}] can't be evaluated",
        services.join(", ")
    );
    if missing.is_empty() {
        message.push_str(": circular dependency");
    } else {
        let references: Vec<String> = missing.iter().map(ToString::to_string).collect();
        message.push_str(": ");
        message.push_str(&references.join(", "));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message() {
        let err = ResolveError::UnresolvableDependency {
            services: vec!["x".to_string(), "y".to_string()],
            missing: vec![],
        };
        assert_eq!(
            err.to_string(),
            "Launch order of services [x, y] can't be evaluated: circular dependency"
        );
        assert!(!err.is_dangling_reference());
        assert_eq!(err.unresolved_services(), ["x", "y"]);
    }

    #[test]
    fn test_dangling_message() {
        let err = ResolveError::UnresolvableDependency {
            services: vec!["api".to_string()],
            missing: vec![DanglingReference {
                service: "api".to_string(),
                dependency: "db".to_string(),
            }],
        };
        assert!(err.is_dangling_reference());
        assert!(err.to_string().contains("'api' depends on unknown service 'db'"));
    }

    #[test]
    fn test_malformed_link_message() {
        let err = ResolveError::malformed_link("a:b:c");
        assert_eq!(err.to_string(), "Service link 'a:b:c' is invalid");
        assert!(err.unresolved_services().is_empty());
    }
}
