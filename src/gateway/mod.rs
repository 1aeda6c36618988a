//! HTTP gateway (Axum): the similarity form, a JSON scoring endpoint and probes.
//!
//! This module is primarily used by the `qascore` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod page;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{index_handler, score_api_handler, score_form_handler};
pub use state::HandlerState;

use error::status_headers;

pub const QASCORE_STATUS_HEADER: &str = "x-qascore-status";
pub const QASCORE_STATUS_HEALTHY: &str = "healthy";
pub const QASCORE_STATUS_READY: &str = "ready";
pub const QASCORE_STATUS_NOT_READY: &str = "not_ready";
pub const QASCORE_STATUS_SCORED: &str = "scored";

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(score_form_handler))
        .route("/api/score", post(score_api_handler))
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub language: String,
    pub encoder_mode: &'static str,
    pub models: Vec<ModelStatus>,
}

#[derive(serde::Serialize)]
pub struct ModelStatus {
    pub name: String,
    pub status: &'static str,
    pub embedding_dim: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(QASCORE_STATUS_HEALTHY),
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let models: Vec<ModelStatus> = state
        .scorer
        .encoders()
        .iter()
        .map(|encoder| ModelStatus {
            name: encoder.name().to_string(),
            status: if encoder.is_ready() {
                QASCORE_STATUS_READY
            } else {
                QASCORE_STATUS_NOT_READY
            },
            embedding_dim: encoder.embedding_dim(),
        })
        .collect();

    let is_ready = state.scorer.is_ready();
    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, QASCORE_STATUS_READY)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, QASCORE_STATUS_NOT_READY)
    };

    let encoder_mode = if state.scorer.uses_stub() {
        "stub"
    } else {
        "real"
    };

    (
        status_code,
        status_headers(status_msg),
        Json(ReadyResponse {
            status: status_msg,
            language: state.scorer.language().to_string(),
            encoder_mode,
            models,
        }),
    )
        .into_response()
}
