//! Sentence-pair similarity.
//!
//! The whole pipeline is: normalize text → encode with each model → L2-normalize →
//! dot product. [`SimilarityScorer`] runs it for two encoders (LaBSE and paraphrase
//! MiniLM) and returns one score per model.
//!
//! Zero-norm embeddings are reported as [`ScoringError::DegenerateEmbedding`]; a
//! score is never NaN.

pub mod error;
pub mod scorer;
pub mod similarity;
pub mod types;


pub use error::ScoringError;
pub use scorer::SimilarityScorer;
pub use similarity::{VectorError, cosine_similarity, dot, l2_normalize};
pub use types::{SimilarityScores, TextPair};
