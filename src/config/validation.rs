//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route integrity (pattern syntax, unique names, non-overlapping paths)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::error::PatternError;
use crate::routing::pattern::PathPattern;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no routes defined")]
    NoRoutes,

    #[error("route #{0} has an empty name")]
    EmptyName(usize),

    #[error("route `{0}` has an empty view")]
    EmptyView(String),

    #[error("route `{route}`: {source}")]
    InvalidPattern {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error("duplicate route name `{0}`")]
    DuplicateName(String),

    #[error("route `{second}` repeats the path of route `{first}`")]
    DuplicatePath { first: String, second: String },

    #[error("not-found name `{0}` collides with a declared route")]
    NotFoundCollision(String),

    #[error("history base `{0}` must be an absolute path without query or hash")]
    InvalidBase(String),

    #[error("invalid bind address `{0}`")]
    InvalidBindAddress(String),

    #[error("invalid metrics address `{0}`")]
    InvalidMetricsAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_routes(config, &mut errors);

    let base = &config.history.base;
    if !base.starts_with('/') || base.contains(['?', '#']) {
        errors.push(ValidationError::InvalidBase(base.clone()));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(config: &RouterConfig, errors: &mut Vec<ValidationError>) {
    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
        return;
    }

    let case_sensitive = config.history.case_sensitive;
    let mut names: HashMap<&str, usize> = HashMap::new();
    let mut shapes: HashMap<String, &str> = HashMap::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyName(index));
        } else if names.insert(&route.name, index).is_some() {
            errors.push(ValidationError::DuplicateName(route.name.clone()));
        }

        if route.view.is_empty() {
            errors.push(ValidationError::EmptyView(route.name.clone()));
        }

        match PathPattern::parse(&route.path) {
            Ok(pattern) => {
                if let Some(first) = shapes.insert(pattern.structural_key(case_sensitive), &route.name) {
                    errors.push(ValidationError::DuplicatePath {
                        first: first.to_string(),
                        second: route.name.clone(),
                    });
                }
            }
            Err(source) => errors.push(ValidationError::InvalidPattern {
                route: route.name.clone(),
                source,
            }),
        }
    }

    if config.not_found.enabled && names.contains_key(config.not_found.name.as_str()) {
        errors.push(ValidationError::NotFoundCollision(
            config.not_found.name.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.routes.push(RouteConfig::new("/Characters/:cid", "CharacterDetails", "", true));
        config.routes.push(RouteConfig::new("planets", "NotFound", "Planets", false));
        config.timeouts.request_secs = 0;
        config.history.base = "catalog".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateName("CharacterDetails".into())));
        assert!(errors.contains(&ValidationError::EmptyView("CharacterDetails".into())));
        assert!(errors.contains(&ValidationError::DuplicatePath {
            first: "CharacterDetails".into(),
            second: "CharacterDetails".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidPattern {
            route: "NotFound".into(),
            source: PatternError::MissingLeadingSlash("planets".into()),
        }));
        assert!(errors.contains(&ValidationError::NotFoundCollision("NotFound".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::InvalidBase("catalog".into())));
    }

    #[test]
    fn test_case_sensitive_paths_do_not_collide() {
        let mut config = RouterConfig::default();
        config.history.case_sensitive = true;
        config.routes.push(RouteConfig::new("/episodes", "episodeLower", "Episode", false));
        assert_eq!(validate_config(&config), Ok(()));

        config.history.case_sensitive = false;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::DuplicatePath {
                first: "episode".into(),
                second: "episodeLower".into(),
            }])
        );
    }

    #[test]
    fn test_empty_routes() {
        let mut config = RouterConfig::default();
        config.routes.clear();
        assert_eq!(validate_config(&config), Err(vec![ValidationError::NoRoutes]));
    }

    #[test]
    fn test_addresses_and_log_level() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nope".into();
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
