//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_document_uses_catalog() {
        let config = parse_config("").unwrap();
        assert_eq!(config, RouterConfig::default());
        assert_eq!(config.routes.len(), 7);
    }

    #[test]
    fn test_routes_replace_catalog() {
        let config = parse_config(
            r#"
            [history]
            base = "/catalog"

            [[routes]]
            path = "/"
            name = "Home"
            view = "Home"

            [[routes]]
            path = "/characters/:id"
            name = "CharacterDetails"
            view = "CharacterDetails"
            props = true
            "#,
        )
        .unwrap();

        assert_eq!(config.history.base, "/catalog");
        assert_eq!(config.routes.len(), 2);
        assert!(!config.routes[0].props);
        assert!(config.routes[1].props);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[[routes]]\npath = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error() {
        let err = parse_config("[timeouts]\nrequest_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_load_shipped_config() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/catalog.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(config.routes, crate::config::schema::catalog_routes());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
