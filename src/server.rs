//! Example paginated items endpoint
//!
//! Serves `GET /items?total=&page=&per_page=` over a synthetic source holding
//! the items `1..=total`. Used by the CLI `serve` command and the integration
//! tests.

use crate::error::{Error, Result};
use crate::http::ItemsPage;
use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Largest page the endpoint will build
pub const MAX_PER_PAGE: u64 = 1000;

/// Build the items router
pub fn items_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/items", get(list_items))
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve the items router until the process exits
pub async fn serve(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;

    serve_on(listener).await
}

/// Serve the items router on an already bound listener
pub async fn serve_on(listener: TcpListener) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Starting items server on http://{}", addr);

    axum::serve(listener, items_router())
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// One page of the synthetic source
async fn list_items(Query(params): Query<HashMap<String, String>>) -> Response {
    let (total, page, per_page) = match parse_query(&params) {
        Ok(values) => values,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    match build_page(total, page, per_page) {
        Ok(items_page) => (StatusCode::OK, Json(items_page)).into_response(),
        Err(message) => (StatusCode::BAD_REQUEST, message).into_response(),
    }
}

fn parse_query(params: &HashMap<String, String>) -> std::result::Result<(u64, u64, u64), String> {
    Ok((
        required_param(params, "total")?,
        required_param(params, "page")?,
        required_param(params, "per_page")?,
    ))
}

fn required_param(params: &HashMap<String, String>, name: &str) -> std::result::Result<u64, String> {
    let raw = params
        .get(name)
        .ok_or_else(|| format!("missing query parameter '{name}'"))?;
    raw.parse()
        .map_err(|_| format!("query parameter '{name}' must be a non-negative integer, got '{raw}'"))
}

/// Items `per_page * (page - 1) + 1 ..= min(per_page * page, total)`
fn build_page(total: u64, page: u64, per_page: u64) -> std::result::Result<ItemsPage, String> {
    if page == 0 {
        return Err("page must be positive".to_string());
    }
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(format!("per_page must be between 1 and {MAX_PER_PAGE}"));
    }

    let start = per_page.saturating_mul(page - 1);
    let end = start.saturating_add(per_page).min(total);

    Ok(ItemsPage {
        items: (start.saturating_add(1)..=end).collect(),
        count: total,
    })
}
