//! # Launch Configuration
//!
//! YAML services file loader for launch-order.
//!
//! This crate reads a compose-style `services.yaml` and turns it into the
//! [`ServiceSet`] the resolver works on. Keys other than `depends_on` and
//! `links` are ignored, so existing compose files load as they are.

#![warn(missing_docs)]

use indexmap::IndexMap;
use launch_order::{Resolver, ServiceDefinition, ServiceSet};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

pub mod parser;

/// Supported configuration version
pub const CONFIG_VERSION: &str = "1.0";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Optional deployment name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Global settings
    #[serde(default, skip_serializing_if = "Settings::is_default")]
    pub settings: Settings,

    /// Service definitions in file order; an empty entry (`db:`) is a
    /// service without dependencies. A name may appear only once.
    #[serde(deserialize_with = "unique_services")]
    pub services: IndexMap<String, Option<ServiceDefinition>>,
}

impl Config {
    /// Service definitions keyed by name, in file order
    pub fn service_set(&self) -> ServiceSet {
        self.services
            .iter()
            .map(|(name, service)| (name.clone(), service.clone().unwrap_or_default()))
            .collect()
    }

    /// Resolver honoring the configured preferences
    pub fn resolver(&self) -> Resolver {
        self.settings
            .prefer
            .iter()
            .fold(Resolver::new(), |resolver, service| resolver.prefer(service.as_str()))
    }
}

type ServiceEntries = IndexMap<String, Option<ServiceDefinition>>;

/// Deserialize the services map, rejecting a name that is defined twice
fn unique_services<'de, D>(deserializer: D) -> std::result::Result<ServiceEntries, D::Error>
where
    D: Deserializer<'de>,
{
    struct ServicesVisitor;

    impl<'de> Visitor<'de> for ServicesVisitor {
        type Value = ServiceEntries;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of service definitions")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut services = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, service)) =
                map.next_entry::<String, Option<ServiceDefinition>>()?
            {
                if services.contains_key(&name) {
                    return Err(de::Error::custom(format!("Duplicate service '{name}'")));
                }
                services.insert(name, service);
            }
            Ok(services)
        }
    }

    deserializer.deserialize_map(ServicesVisitor)
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Default log level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Services started ahead of others ready at the same time
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefer: Vec<String>,
}

impl Settings {
    /// Check if settings are default
    fn is_default(&self) -> bool {
        self == &Settings::default()
    }
}
