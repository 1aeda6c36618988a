//! Qascore library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`TextPair`], [`SimilarityScores`] - Scoring input and output
//! - [`SimilarityScorer`], [`ScoringError`] - Normalize, encode, compare
//!
//! ## Normalization
//! - [`TextNormalizer`], [`IndicNormalizer`] - Script-aware canonicalization
//!
//! ## Embedding
//! - [`Encoder`], [`SentenceEncoder`], [`EncoderConfig`] - Sentence embedding models
//!
//! ## Vector Math
//! - [`l2_normalize`], [`dot`], [`cosine_similarity`]
//!
//! ## HTTP
//! - [`gateway::create_router_with_state`], [`gateway::HandlerState`]

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod normalize;
pub mod scoring;

pub use config::{Config, ConfigError};
pub use constants::{
    DEFAULT_INFERENCE_TIMEOUT, DEFAULT_LANGUAGE, LABSE_EMBEDDING_DIM, LABSE_MODEL_NAME,
    PML_EMBEDDING_DIM, PML_MODEL_NAME,
};
pub use embedding::{EmbeddingError, Encoder, EncoderConfig, PoolingStrategy, SentenceEncoder};
pub use normalize::{IndicNormalizer, NormalizeError, NormalizerOptions, Script, TextNormalizer};
pub use scoring::{
    ScoringError, SimilarityScorer, SimilarityScores, TextPair, VectorError, cosine_similarity,
    dot, l2_normalize,
};
