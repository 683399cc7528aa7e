//! Route resolution handlers.

use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::http::response::{ApiError, HrefBody, ResolutionBody, RouteSummary};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{Navigation, Params, ResolveError};

pub async fn health() -> &'static str {
    "ok"
}

/// List the live table in declaration order.
pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let table = state.table.load_full();
    Json(table.routes().iter().map(RouteSummary::from).collect())
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

/// Forward lookup: `GET /api/resolve?path=/characters/42`.
pub async fn resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    let start = Instant::now();
    let table = state.table.load_full();
    let nav = table.navigate(&query.path);

    let route = match &nav {
        Navigation::Matched(resolved) => resolved.name(),
        Navigation::NotFound { .. } => "none",
    };
    metrics::record_resolution(nav.is_matched(), route, start);

    let status = if nav.is_matched() {
        StatusCode::OK
    } else {
        tracing::debug!(path = %query.path, "No route matched");
        StatusCode::NOT_FOUND
    };
    (status, Json(ResolutionBody::from(&nav))).into_response()
}

/// Reverse lookup: `GET /api/href/CharacterDetails?id=7`.
pub async fn href(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<HrefBody>, ApiError> {
    let table = state.table.load_full();

    let result = table.resolve_by_name(&name, &params).map(|path| {
        let href = table.with_base(&path);
        (path, href)
    });

    let outcome = match &result {
        Ok(_) => "ok",
        Err(ResolveError::UnknownRouteName(_)) => "unknown_route",
        Err(ResolveError::MissingParameter { .. }) => "missing_parameter",
    };
    metrics::record_reverse_lookup(outcome);

    let (path, href) = result.map_err(|e| {
        tracing::debug!(route = %name, error = %e, "Reverse lookup failed");
        ApiError(e)
    })?;
    Ok(Json(HrefBody { name, path, href }))
}
