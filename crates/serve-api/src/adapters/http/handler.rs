use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{core::connection::Store, error::AppResult};

use super::params::parse_request;

/// Everything `/api` needs per request. Immutable once the router is built.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub store: Store,
    pub timeout: Option<Duration>,
}

/// `GET /api?table=..&columns=..&offset=..&limit=..`
pub async fn handle_query(
    State(state): State<ApiState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let req = parse_request(&pairs)?;
    tracing::debug!(
        table = %req.table,
        columns = %req.columns,
        offset = req.offset,
        limit = req.limit,
        "api query"
    );

    let rows = state.store.read(req, state.timeout).await?;
    let body = serde_json::to_vec(&rows)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
