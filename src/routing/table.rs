//! Route table: forward and reverse lookup.
//!
//! # Responsibilities
//! - Store route definitions in declaration order
//! - Resolve a navigation target to a route and its parameters
//! - Build a concrete path from a route name and parameters
//! - Apply the not-found policy for unmatched targets
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc` without locks)
//! - O(1) name lookup via HashMap
//! - O(n) path scan, first declared match wins
//! - Unmatched targets are a `Navigation::NotFound`, not an error

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::routing::error::{ResolveError, ResolveResult, RouteTableError};
use crate::routing::location::{join_base, normalize_base, Location};
use crate::routing::pattern::{MatchOptions, Params, PathPattern};

/// Opaque reference to a view owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub String);

impl From<&str> for ViewId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ViewId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// One entry in the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub path: PathPattern,
    pub name: String,
    pub view: ViewId,
    /// Forward matched path parameters to the view as inputs.
    pub props: bool,
}

impl RouteDefinition {
    pub fn new(
        path: &str,
        name: impl Into<String>,
        view: impl Into<ViewId>,
        props: bool,
    ) -> Result<Self, RouteTableError> {
        let name = name.into();
        let path = PathPattern::parse(path).map_err(|source| RouteTableError::InvalidPattern {
            route: name.clone(),
            source,
        })?;
        Ok(Self {
            path,
            name,
            view: view.into(),
            props,
        })
    }
}

impl TryFrom<&RouteConfig> for RouteDefinition {
    type Error = RouteTableError;

    fn try_from(cfg: &RouteConfig) -> Result<Self, Self::Error> {
        Self::new(&cfg.path, cfg.name.clone(), cfg.view.clone(), cfg.props)
    }
}

/// View rendered when no route matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundView {
    pub name: String,
    pub view: ViewId,
}

/// Table-wide resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub matching: MatchOptions,
    /// Prefix under which the application is mounted.
    pub base: String,
    pub not_found: Option<NotFoundView>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            matching: MatchOptions::default(),
            base: "/".to_string(),
            not_found: Some(NotFoundView {
                name: "NotFound".to_string(),
                view: ViewId::from("NotFound"),
            }),
        }
    }
}

/// A successful forward lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    route: &'a RouteDefinition,
    params: Params,
    location: Location,
}

impl<'a> ResolvedRoute<'a> {
    pub fn route(&self) -> &'a RouteDefinition {
        self.route
    }

    pub fn name(&self) -> &'a str {
        &self.route.name
    }

    pub fn view(&self) -> &'a ViewId {
        &self.route.view
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Inputs handed to the view: the path parameters when the route
    /// forwards them, otherwise nothing.
    pub fn props(&self) -> Params {
        if self.route.props {
            self.params.clone()
        } else {
            Params::new()
        }
    }
}

/// Outcome of a forward lookup with the not-found policy applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a> {
    Matched(ResolvedRoute<'a>),
    NotFound {
        location: Location,
        fallback: Option<&'a NotFoundView>,
    },
}

impl<'a> Navigation<'a> {
    pub fn is_matched(&self) -> bool {
        matches!(self, Navigation::Matched(_))
    }

    pub fn location(&self) -> &Location {
        match self {
            Navigation::Matched(resolved) => resolved.location(),
            Navigation::NotFound { location, .. } => location,
        }
    }

    /// The view to render, if any.
    pub fn view(&self) -> Option<&'a ViewId> {
        match self {
            Navigation::Matched(resolved) => Some(resolved.view()),
            Navigation::NotFound { fallback, .. } => fallback.map(|f| &f.view),
        }
    }
}

/// Immutable, ordered route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
    by_name: HashMap<String, usize>,
    options: TableOptions,
}

impl RouteTable {
    /// Build a table, enforcing unique names and non-overlapping paths.
    pub fn new(
        routes: Vec<RouteDefinition>,
        mut options: TableOptions,
    ) -> Result<Self, RouteTableError> {
        options.base = normalize_base(&options.base);

        let mut by_name = HashMap::with_capacity(routes.len());
        let mut by_shape: HashMap<String, &str> = HashMap::with_capacity(routes.len());

        for (index, route) in routes.iter().enumerate() {
            if by_name.insert(route.name.clone(), index).is_some() {
                return Err(RouteTableError::DuplicateName(route.name.clone()));
            }
            let shape = route.path.structural_key(options.matching.case_sensitive);
            if let Some(first) = by_shape.insert(shape, &route.name) {
                return Err(RouteTableError::DuplicatePath {
                    first: first.to_string(),
                    second: route.name.clone(),
                });
            }
        }

        if let Some(fallback) = &options.not_found {
            if by_name.contains_key(&fallback.name) {
                return Err(RouteTableError::FallbackCollision(fallback.name.clone()));
            }
        }

        tracing::info!(
            routes = routes.len(),
            base = %options.base,
            case_sensitive = options.matching.case_sensitive,
            strict = options.matching.strict,
            "Route table built"
        );

        Ok(Self {
            routes,
            by_name,
            options,
        })
    }

    /// Build the table described by a validated configuration.
    pub fn from_config(config: &RouterConfig) -> Result<Self, RouteTableError> {
        let routes = config
            .routes
            .iter()
            .map(RouteDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let not_found = config.not_found.enabled.then(|| NotFoundView {
            name: config.not_found.name.clone(),
            view: ViewId::from(config.not_found.view.clone()),
        });

        let options = TableOptions {
            matching: MatchOptions {
                case_sensitive: config.history.case_sensitive,
                strict: config.history.strict,
            },
            base: config.history.base.clone(),
            not_found,
        };

        Self::new(routes, options)
    }

    /// The catalog browser's route table with default settings.
    pub fn catalog() -> Result<Self, RouteTableError> {
        Self::from_config(&RouterConfig::default())
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn base(&self) -> &str {
        &self.options.base
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&RouteDefinition> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    /// Match a target against the table in declaration order.
    ///
    /// `target` is a browser path, normally including the base. A path that
    /// lacks the base prefix is matched as already base-relative.
    ///
    /// Returns `None` when nothing matches or the target is not a local path.
    pub fn resolve_by_path(&self, target: &str) -> Option<ResolvedRoute<'_>> {
        match Location::parse(target, &self.options.base) {
            Ok(location) => self.match_location(location).ok(),
            Err(e) => {
                tracing::debug!(target = %target, error = %e, "Unresolvable navigation target");
                None
            }
        }
    }

    /// Forward lookup with the not-found policy applied.
    pub fn navigate(&self, target: &str) -> Navigation<'_> {
        let location = Location::parse(target, &self.options.base).unwrap_or_else(|e| {
            tracing::debug!(target = %target, error = %e, "Unresolvable navigation target");
            Location::from_path(target)
        });

        match self.match_location(location) {
            Ok(resolved) => Navigation::Matched(resolved),
            Err(location) => {
                tracing::debug!(path = %location.path, "No route matched");
                Navigation::NotFound {
                    location,
                    fallback: self.options.not_found.as_ref(),
                }
            }
        }
    }

    /// Reverse lookup: substitute `params` into the named route's pattern.
    ///
    /// The returned path does not include the base.
    pub fn resolve_by_name(&self, name: &str, params: &Params) -> ResolveResult<String> {
        let route = self
            .get(name)
            .ok_or_else(|| ResolveError::UnknownRouteName(name.to_string()))?;

        let extra: Vec<&str> = params
            .keys()
            .map(String::as_str)
            .filter(|key| !route.path.param_names().any(|p| p == *key))
            .collect();
        if !extra.is_empty() {
            tracing::debug!(route = %name, discarded = ?extra, "Ignoring unknown parameters");
        }

        route
            .path
            .render(params)
            .map_err(|param| ResolveError::MissingParameter {
                route: name.to_string(),
                param,
            })
    }

    /// Reverse lookup including the base prefix.
    pub fn href(&self, name: &str, params: &Params) -> ResolveResult<String> {
        let path = self.resolve_by_name(name, params)?;
        Ok(self.with_base(&path))
    }

    /// Prefix a base-relative path with this table's base.
    pub fn with_base(&self, path: &str) -> String {
        join_base(&self.options.base, path)
    }

    fn match_location(&self, location: Location) -> Result<ResolvedRoute<'_>, Location> {
        for route in &self.routes {
            if let Some(params) = route.path.matches(&location.path, self.options.matching) {
                tracing::debug!(path = %location.path, route = %route.name, "Route matched");
                return Ok(ResolvedRoute {
                    route,
                    params,
                    location,
                });
            }
        }
        Err(location)
    }
}
