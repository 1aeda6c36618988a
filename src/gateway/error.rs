use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::QASCORE_STATUS_HEADER;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    /// HTTP status and `X-Qascore-Status` value for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Scoring(err) => match err {
                ScoringError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
                ScoringError::ModelUnavailable { .. } => {
                    (StatusCode::SERVICE_UNAVAILABLE, "model_unavailable")
                }
                ScoringError::DegenerateEmbedding { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "degenerate_embedding")
                }
                ScoringError::DimensionMismatch { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "dimension_mismatch")
                }
                ScoringError::Encoding { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "encoding_error")
                }
                ScoringError::InferenceTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
                ScoringError::TaskFailed { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
        }
    }

    /// Message safe to show to the person who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::InvalidRequest(_) => self.to_string(),
            GatewayError::Scoring(err) if err.is_client_error() => err.to_string(),
            GatewayError::Scoring(ScoringError::InferenceTimeout(_)) => {
                "Scoring took too long. Please try again.".to_string()
            }
            GatewayError::Scoring(ScoringError::ModelUnavailable { .. }) => {
                "The similarity models are not available right now.".to_string()
            }
            GatewayError::Scoring(_) => "Could not compute a similarity score.".to_string(),
        }
    }
}

pub(crate) fn status_headers(status: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(QASCORE_STATUS_HEADER, HeaderValue::from_static(status));
    headers
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, qascore_status) = self.status();

        let body = Json(ErrorResponse {
            error: self.user_message(),
            code: status.as_u16(),
        });

        (status, status_headers(qascore_status), body).into_response()
    }
}
