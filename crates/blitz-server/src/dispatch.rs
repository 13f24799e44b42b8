// File: src/dispatch.rs
// Purpose: Fallback handler that answers every request with its resolved route

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Router,
};
use blitz_router::{parse_query, MatchResult, Params, RouteKind, RouteTable};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Body returned for a matched request
#[derive(Debug, Serialize)]
struct Resolved<'a> {
    route: String,
    kind: RouteKind,
    file: &'a str,
    params: &'a Params,
}

impl<'a> From<&'a MatchResult<'a>> for Resolved<'a> {
    fn from(m: &'a MatchResult<'a>) -> Self {
        Self {
            route: m.route.to_string(),
            kind: m.route.kind(),
            file: m.route.source(),
            params: &m.params,
        }
    }
}

#[derive(Debug, Serialize)]
struct NotFound<'a> {
    error: &'static str,
    path: &'a str,
}

/// Builds the router: every method and path goes through the route table
pub fn app(table: Arc<RouteTable>) -> Router {
    Router::new().fallback(resolve_handler).with_state(table)
}

async fn resolve_handler(State(table): State<Arc<RouteTable>>, uri: Uri) -> Response {
    let query = uri.query().map(parse_query).unwrap_or_default();

    match table.resolve_with_query(uri.path(), query) {
        Some(m) => {
            debug!(path = %uri.path(), route = %m.route, "dispatching");
            Json(Resolved::from(&m)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(NotFound {
                error: "not found",
                path: uri.path(),
            }),
        )
            .into_response(),
    }
}
