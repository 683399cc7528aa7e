//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the catalog router.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// History and matching settings.
    pub history: HistoryConfig,

    /// Route definitions, in match order.
    pub routes: Vec<RouteConfig>,

    /// Fallback for unmatched paths.
    pub not_found: NotFoundConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            history: HistoryConfig::default(),
            routes: catalog_routes(),
            not_found: NotFoundConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// History mode and matching behaviour.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Path prefix the application is served under.
    pub base: String,

    /// Compare static path segments case-sensitively.
    pub case_sensitive: bool,

    /// Treat trailing slashes as significant.
    pub strict: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            case_sensitive: false,
            strict: false,
        }
    }
}

/// One route of the table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteConfig {
    /// Path pattern (e.g., "/characters/:id").
    pub path: String,

    /// Unique route name used for programmatic navigation.
    pub name: String,

    /// View rendered for this route.
    pub view: String,

    /// Pass matched path parameters to the view.
    #[serde(default)]
    pub props: bool,
}

impl RouteConfig {
    pub fn new(path: &str, name: &str, view: &str, props: bool) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            view: view.to_string(),
            props,
        }
    }
}

/// The catalog browser's routes.
pub fn catalog_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("/", "Home", "Home", false),
        RouteConfig::new("/characters", "character", "Character", false),
        RouteConfig::new("/Episodes", "episode", "Episode", false),
        RouteConfig::new("/Locations", "location", "Location", false),
        RouteConfig::new("/characters/:id", "CharacterDetails", "CharacterDetails", true),
        RouteConfig::new("/locations/:id", "LocationDetails", "LocationDetails", true),
        RouteConfig::new("/episodes/:id", "EpisodeDetails", "EpisodeDetails", true),
    ]
}

/// Not-found fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct NotFoundConfig {
    /// Render a fallback view for unmatched paths.
    pub enabled: bool,

    /// Name reported for the fallback; must not collide with a route name.
    pub name: String,

    /// View rendered for unmatched paths.
    pub view: String,
}

impl Default for NotFoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "NotFound".to_string(),
            view: "NotFound".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
