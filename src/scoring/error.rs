use std::time::Duration;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::normalize::NormalizeError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] NormalizeError),

    #[error("model '{model}' is unavailable")]
    ModelUnavailable { model: String },

    #[error("model '{model}' produced a zero-norm embedding")]
    DegenerateEmbedding { model: String },

    #[error("embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("model '{model}' failed to encode: {source}")]
    Encoding {
        model: String,
        #[source]
        source: EmbeddingError,
    },

    #[error("scoring did not finish within {0:?}")]
    InferenceTimeout(Duration),

    #[error("scoring task failed: {reason}")]
    TaskFailed { reason: String },
}

impl ScoringError {
    /// `true` for errors caused by the submitted text rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScoringError::InvalidInput(_))
    }
}
