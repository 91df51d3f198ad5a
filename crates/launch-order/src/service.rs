//! Service definitions and link references

use crate::{ResolveError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between a link's target service and its alias
pub const LINK_DELIMITER: char = ':';

/// Services keyed by name
///
/// Insertion order is significant: it breaks ties between services that
/// become ready in the same layer.
pub type ServiceSet = IndexMap<String, ServiceDefinition>;

/// The dependency-bearing part of a service definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Services that must be started before this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Link references in `target[:alias]` form, each implying a dependency
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl ServiceDefinition {
    /// Create a definition without dependencies
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an explicit dependency
    pub fn depends_on(mut self, service: impl Into<String>) -> Self {
        self.depends_on.push(service.into());
        self
    }

    /// Add a link reference
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.links.push(link.into());
        self
    }

    /// Whether the definition declares no dependency of either kind
    pub fn is_standalone(&self) -> bool {
        self.depends_on.is_empty() && self.links.is_empty()
    }
}

/// A parsed link reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    /// Name of the linked service
    pub target: String,
    /// Name the target is reachable under from the linking service
    pub alias: Option<String>,
}

impl Link {
    /// Parse a `target` or `target:alias` link.
    ///
    /// When the delimiter is present, trailing empty segments are dropped
    /// before counting, so `"db:"` is just `db` and `":"` has no segment at all.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut segments: Vec<&str> = raw.split(LINK_DELIMITER).collect();
        if segments.len() > 1 {
            while segments.last() == Some(&"") {
                segments.pop();
            }
        }

        match segments.as_slice() {
            [target] => Ok(Self {
                target: (*target).to_string(),
                alias: None,
            }),
            [target, alias] => Ok(Self {
                target: (*target).to_string(),
                alias: Some((*alias).to_string()),
            }),
            _ => Err(ResolveError::malformed_link(raw)),
        }
    }
}

impl FromStr for Link {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}{}{}", self.target, LINK_DELIMITER, alias),
            None => write!(f, "{}", self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_target() {
        let link = Link::parse("db").unwrap();
        assert_eq!(link.target, "db");
        assert_eq!(link.alias, None);
    }

    #[test]
    fn test_parse_target_with_alias() {
        let link: Link = "db:database".parse().unwrap();
        assert_eq!(link.target, "db");
        assert_eq!(link.alias.as_deref(), Some("database"));
        assert_eq!(link.to_string(), "db:database");
    }

    #[test]
    fn test_parse_trailing_delimiter() {
        assert_eq!(Link::parse("db:").unwrap().alias, None);
        assert_eq!(Link::parse("db:alias:").unwrap().alias.as_deref(), Some("alias"));
    }

    #[test]
    fn test_parse_empty_target() {
        let link = Link::parse(":alias").unwrap();
        assert_eq!(link.target, "");
        assert_eq!(link.alias.as_deref(), Some("alias"));
    }

    #[test]
    fn test_parse_malformed() {
        for raw in ["a:b:c", ":", "::", "a::c"] {
            assert_eq!(
                Link::parse(raw),
                Err(ResolveError::malformed_link(raw)),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_definition_builder() {
        let def = ServiceDefinition::new().depends_on("db").link("cache:redis");
        assert_eq!(def.depends_on, ["db"]);
        assert_eq!(def.links, ["cache:redis"]);
        assert!(!def.is_standalone());
        assert!(ServiceDefinition::new().is_standalone());
    }
}
