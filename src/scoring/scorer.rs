use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::embedding::Encoder;
use crate::normalize::TextNormalizer;

use super::error::ScoringError;
use super::similarity::{VectorError, dot, l2_normalize};
use super::types::{SimilarityScores, TextPair};

/// Normalizes a sentence pair, encodes it with both models and returns one cosine score per model.
///
/// Holds only read-only shared resources, so one instance serves every request.
pub struct SimilarityScorer {
    normalizer: Arc<dyn TextNormalizer>,
    labse: Arc<dyn Encoder>,
    pml: Arc<dyn Encoder>,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("language", &self.normalizer.language())
            .field("labse", &self.labse.name())
            .field("pml", &self.pml.name())
            .finish()
    }
}

impl SimilarityScorer {
    pub fn new(
        normalizer: Arc<dyn TextNormalizer>,
        labse: Arc<dyn Encoder>,
        pml: Arc<dyn Encoder>,
    ) -> Self {
        Self {
            normalizer,
            labse,
            pml,
        }
    }

    /// Scores `pair` with both encoders.
    pub fn score(&self, pair: &TextPair) -> Result<SimilarityScores, ScoringError> {
        let source = self.normalizer.normalize(&pair.sentence)?;
        let target = self.normalizer.normalize(&pair.target_sentence)?;

        debug!(
            source_len = source.len(),
            target_len = target.len(),
            "Normalized sentence pair"
        );

        let labse = Self::score_with(self.labse.as_ref(), &source, &target)?;
        let pml = Self::score_with(self.pml.as_ref(), &source, &target)?;

        debug!(labse, pml, "Scored sentence pair");

        Ok(SimilarityScores { labse, pml })
    }

    /// Runs [`score`](Self::score) on the blocking pool, giving up after `timeout`.
    ///
    /// A timed-out forward pass keeps running to completion; only the caller stops waiting.
    pub async fn score_with_timeout(
        self: Arc<Self>,
        pair: TextPair,
        timeout: Duration,
    ) -> Result<SimilarityScores, ScoringError> {
        let task = tokio::task::spawn_blocking(move || self.score(&pair));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ScoringError::TaskFailed {
                reason: join_error.to_string(),
            }),
            Err(_) => {
                warn!(?timeout, "Scoring timed out");
                Err(ScoringError::InferenceTimeout(timeout))
            }
        }
    }

    fn score_with(encoder: &dyn Encoder, source: &str, target: &str) -> Result<f32, ScoringError> {
        let model = encoder.name();
        if !encoder.is_ready() {
            return Err(ScoringError::ModelUnavailable {
                model: model.to_string(),
            });
        }

        let source = Self::encode(encoder, source)?;
        let target = Self::encode(encoder, target)?;

        let source = l2_normalize(&source).map_err(|e| vector_error(model, e))?;
        let target = l2_normalize(&target).map_err(|e| vector_error(model, e))?;

        let score = dot(&source, &target).map_err(|e| vector_error(model, e))?;
        Ok(score.clamp(-1.0, 1.0))
    }

    fn encode(encoder: &dyn Encoder, text: &str) -> Result<Vec<f32>, ScoringError> {
        encoder.encode(text).map_err(|source| ScoringError::Encoding {
            model: encoder.name().to_string(),
            source,
        })
    }

    /// Both encoders, LaBSE first.
    pub fn encoders(&self) -> [&dyn Encoder; 2] {
        [self.labse.as_ref(), self.pml.as_ref()]
    }

    /// `true` when both encoders can serve requests.
    pub fn is_ready(&self) -> bool {
        self.encoders().iter().all(|e| e.is_ready())
    }

    /// `true` if any encoder is a stub.
    pub fn uses_stub(&self) -> bool {
        self.encoders().iter().any(|e| e.is_stub())
    }

    pub fn language(&self) -> &str {
        self.normalizer.language()
    }
}

fn vector_error(model: &str, err: VectorError) -> ScoringError {
    match err {
        VectorError::Degenerate => ScoringError::DegenerateEmbedding {
            model: model.to_string(),
        },
        VectorError::DimensionMismatch { left, right } => {
            ScoringError::DimensionMismatch { left, right }
        }
    }
}
