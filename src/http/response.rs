//! JSON response bodies.
//!
//! # Design Decisions
//! - Bodies are flat, owned snapshots; nothing borrows the live table
//! - Reverse lookup errors map to 404 (unknown name) and 400 (missing parameter)

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::routing::{Navigation, Params, ResolveError, RouteDefinition, ViewId};

/// A route as listed by `/api/routes`.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub view: ViewId,
    pub props: bool,
    pub params: Vec<String>,
}

impl From<&RouteDefinition> for RouteSummary {
    fn from(route: &RouteDefinition) -> Self {
        Self {
            name: route.name.clone(),
            path: route.path.to_string(),
            view: route.view.clone(),
            props: route.props,
            params: route.path.param_names().map(str::to_string).collect(),
        }
    }
}

/// Result of a forward lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionBody {
    pub matched: bool,
    pub name: Option<String>,
    pub view: Option<ViewId>,
    pub params: Params,
    pub props: Params,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub hash: Option<String>,
}

impl From<&Navigation<'_>> for ResolutionBody {
    fn from(nav: &Navigation<'_>) -> Self {
        let location = nav.location();
        let (name, params, props) = match nav {
            Navigation::Matched(resolved) => (
                Some(resolved.name().to_string()),
                resolved.params().clone(),
                resolved.props(),
            ),
            Navigation::NotFound { fallback, .. } => {
                (fallback.map(|f| f.name.clone()), Params::new(), Params::new())
            }
        };

        Self {
            matched: nav.is_matched(),
            name,
            view: nav.view().cloned(),
            params,
            props,
            path: location.path.clone(),
            query: location.query.clone(),
            hash: location.hash.clone(),
        }
    }
}

/// Result of a reverse lookup.
#[derive(Debug, Clone, Serialize)]
pub struct HrefBody {
    pub name: String,
    /// Path without the base.
    pub path: String,
    /// Path including the base.
    pub href: String,
}

/// Reverse lookup failure returned to HTTP clients.
#[derive(Debug)]
pub struct ApiError(pub ResolveError);

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        Self(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self.0 {
            ResolveError::UnknownRouteName(_) => (StatusCode::NOT_FOUND, "unknown_route_name"),
            ResolveError::MissingParameter { .. } => (StatusCode::BAD_REQUEST, "missing_parameter"),
        };
        let body = ErrorBody {
            kind,
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
