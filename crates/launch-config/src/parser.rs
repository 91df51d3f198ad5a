//! Configuration parser

use crate::{CONFIG_VERSION, Config, ConfigError, Result};
use std::path::Path;
use tracing::debug;

/// Parse a YAML configuration file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let config = parse_str(&content)?;
    debug!(
        path = %path.display(),
        services = config.services.len(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Parse YAML configuration from a string
pub fn parse_str(content: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
///
/// Dependency targets are not checked here; the resolver reports missing
/// services together with everything they hold up.
fn validate_config(config: &Config) -> Result<()> {
    // Check version
    if config.version != CONFIG_VERSION {
        return Err(ConfigError::ValidationError(format!(
            "Unsupported version: {}, expected {}",
            config.version, CONFIG_VERSION
        )));
    }

    if config.services.is_empty() {
        return Err(ConfigError::ValidationError(
            "No services defined".to_string(),
        ));
    }

    for name in config.services.keys() {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Service names must not be empty".to_string(),
            ));
        }
    }

    for preferred in &config.settings.prefer {
        if !config.services.contains_key(preferred) {
            debug!(service = %preferred, "Preferred service is not defined, ignoring");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let yaml = r#"
version: "1.0"
services:
  test: {}
"#;

        let config = parse_str(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.services.len(), 1);
        assert!(config.services.contains_key("test"));
    }

    #[test]
    fn test_empty_service_entry() {
        let yaml = r#"
version: "1.0"
services:
  db:
  api:
    depends_on: [db]
"#;

        let config = parse_str(yaml).unwrap();
        let services = config.service_set();
        assert!(services["db"].is_standalone());
        assert_eq!(services["api"].depends_on, ["db"]);
    }

    #[test]
    fn test_unsupported_version() {
        let yaml = r#"
version: "2.0"
services:
  test: {}
"#;

        let err = parse_str(yaml).unwrap_err();
        assert!(err.to_string().contains("Unsupported version"));
    }

    #[test]
    fn test_no_services() {
        let yaml = r#"
version: "1.0"
services: {}
"#;

        let err = parse_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_duplicate_service_name() {
        let yaml = r#"
version: "1.0"
services:
  db: {}
  db:
    depends_on: [x]
"#;

        let err = parse_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::YamlError(_)));
        assert!(err.to_string().contains("Duplicate service 'db'"));
    }

    #[test]
    fn test_blank_service_name() {
        let yaml = r#"
version: "1.0"
services:
  "": {}
"#;

        assert!(parse_str(yaml).is_err());
    }
}
