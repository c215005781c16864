//! Mock fleet operations backend.
//!
//! Serves the dashboard, execution, market, news and portfolio endpoints
//! under `/api` from a seeded in-memory store. Missing resources answer 404
//! with `{"error":"not found"}`.

pub mod model;
mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tokio::{net::TcpListener, sync::RwLock};

pub use model::*;
pub use store::{Db, Store};

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded(Utc::now())));
    app_with(db)
}

/// Router over an existing store, for tests that need to inspect state.
pub fn app_with(db: Db) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .merge(routes::dashboard::router())
        .merge(routes::execution::router())
        .merge(routes::market::router())
        .merge(routes::news::router())
        .merge(routes::portfolio::router())
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock backend listening");
    }
    axum::serve(listener, app()).await
}

async fn health() -> &'static str {
    "ok"
}

/// Error responses. The body is always `{"error": <message>}`.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    BadRequest(String),
    Conflict(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
