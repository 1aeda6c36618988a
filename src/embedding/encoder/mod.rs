//! Sentence encoders (sentence-transformers checkpoints on candle).
//!
//! Use [`EncoderConfig::labse_stub`] / [`EncoderConfig::pml_stub`] for tests and
//! for running without model files.

/// Encoder configuration.
pub mod config;


pub use config::{EncoderConfig, REQUIRED_MODEL_FILES};

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertSentenceModel;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::pooling::PoolingStrategy;
use crate::embedding::utils::load_tokenizer_with_truncation;

/// Turns one sentence into a fixed-length vector.
///
/// Implementations are loaded once and shared read-only across requests.
/// Output is the raw pooled vector; callers L2-normalize it.
pub trait Encoder: Send + Sync {
    /// Name used in logs, errors and response fields.
    fn name(&self) -> &str;

    /// Length of every vector [`encode`](Self::encode) returns.
    fn embedding_dim(&self) -> usize;

    /// `false` if the encoder cannot serve requests.
    fn is_ready(&self) -> bool {
        true
    }

    /// `true` if vectors are synthetic (no model weights behind them).
    fn is_stub(&self) -> bool {
        false
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

enum EncoderBackend {
    Model {
        model: BertSentenceModel,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// BERT-family sentence encoder (supports stub mode).
pub struct SentenceEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field("name", &self.config.name)
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, model, .. } => {
                        format!("Model({:?}, {:?})", device, model.pooling())
                    }
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!(encoder = %config.name, "Encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        let device = select_device();
        debug!(encoder = %config.name, ?device, "Selected compute device");

        let pooling = PoolingStrategy::from_model_dir(&config.model_dir, config.default_pooling)?;

        let model = BertSentenceModel::load(&config.model_dir, pooling, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model '{}': {}", config.name, e),
            }
        })?;

        ensure_output_dim(&config.name, config.embedding_dim, model.output_dim())?;

        let tokenizer = load_tokenizer_with_truncation(&config.tokenizer_path(), config.max_seq_len)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            })?;

        info!(
            encoder = %config.name,
            model_dir = %config.model_dir.display(),
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            ?pooling,
            dense = model.has_dense(),
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
        })
    }

    fn encode_with_model(
        &self,
        text: &str,
        model: &BertSentenceModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        debug!(
            encoder = %self.config.name,
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Encoding sentence"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let embedding = model
            .forward(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("BERT forward pass failed: {}", e),
            })?;

        let vector = embedding.squeeze(0)?.to_vec1::<f32>()?;
        ensure_output_dim(&self.config.name, self.config.embedding_dim, vector.len())?;
        Ok(vector)
    }

    fn encode_stub(&self, text: &str) -> Vec<f32> {
        debug!(encoder = %self.config.name, text_len = text.len(), "Generating stub embedding");

        // Seed from name + text so the two stub encoders disagree on the same sentence.
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.config.name.as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();

        let mut seed = [0u8; 8];
        seed.copy_from_slice(&digest.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed);

        (0..self.config.embedding_dim)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

fn ensure_output_dim(model: &str, expected: usize, actual: usize) -> Result<(), EmbeddingError> {
    if actual != expected {
        return Err(EmbeddingError::OutputDimension {
            model: model.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

impl Encoder for SentenceEncoder {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => self.encode_with_model(text, model, tokenizer, device),
            EncoderBackend::Stub => Ok(self.encode_stub(text)),
        }
    }
}
