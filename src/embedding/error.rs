use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading a sentence encoder or running it on one sentence.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// A required model file or directory is missing.
    #[error("encoder model file not found: {path}")]
    ModelNotFound { path: PathBuf },

    /// Files exist but could not be read as a BERT checkpoint.
    #[error("failed to load encoder model: {reason}")]
    ModelLoadFailed { reason: String },

    /// The model emitted vectors of a different length than configured.
    #[error("encoder '{model}' produced {actual}-d vectors, expected {expected}")]
    OutputDimension {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("encoder forward pass failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid encoder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
