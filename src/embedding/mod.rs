//! Embedding + model utilities.
//!
//! - [`encoder`] provides the [`Encoder`] seam and the candle-backed [`SentenceEncoder`].
//! - [`pooling`] collapses token states into sentence vectors.

/// BERT sentence model (encoder + pooling + dense head).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoders (LaBSE, paraphrase MiniLM).
pub mod encoder;
mod error;
/// Pooling strategies read from sentence-transformers configs.
pub mod pooling;
/// Tokenizer loading helpers.
pub mod utils;

pub use encoder::{Encoder, EncoderConfig, SentenceEncoder};
pub use error::EmbeddingError;
pub use pooling::PoolingStrategy;
