use std::path::{Path, PathBuf};

use crate::constants::{
    LABSE_EMBEDDING_DIM, LABSE_MAX_SEQ_LEN, LABSE_MODEL_NAME, PML_EMBEDDING_DIM, PML_MAX_SEQ_LEN,
    PML_MODEL_NAME,
};
use crate::embedding::error::EmbeddingError;
use crate::embedding::pooling::PoolingStrategy;

/// Files every sentence-transformers model directory must contain.
pub const REQUIRED_MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEncoder`](super::SentenceEncoder).
pub struct EncoderConfig {
    /// Name the encoder reports in logs, errors and responses.
    pub name: String,
    /// sentence-transformers checkpoint directory.
    pub model_dir: PathBuf,
    /// Max tokens per sentence; longer input is truncated.
    pub max_seq_len: usize,
    /// Expected output dimension; checked against the loaded model.
    pub embedding_dim: usize,
    /// Pooling used when the checkpoint has no `1_Pooling/config.json`.
    pub default_pooling: PoolingStrategy,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl EncoderConfig {
    /// LaBSE checkpoint at `model_dir`.
    pub fn labse<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            name: LABSE_MODEL_NAME.to_string(),
            model_dir: model_dir.into(),
            max_seq_len: LABSE_MAX_SEQ_LEN,
            embedding_dim: LABSE_EMBEDDING_DIM,
            default_pooling: PoolingStrategy::Cls,
            testing_stub: false,
        }
    }

    /// `paraphrase-multilingual-MiniLM-L12-v2` checkpoint at `model_dir`.
    pub fn pml<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            name: PML_MODEL_NAME.to_string(),
            model_dir: model_dir.into(),
            max_seq_len: PML_MAX_SEQ_LEN,
            embedding_dim: PML_EMBEDDING_DIM,
            default_pooling: PoolingStrategy::Mean,
            testing_stub: false,
        }
    }

    /// Turns this config into a stub config (keeps name and dimension).
    pub fn into_stub(mut self) -> Self {
        self.testing_stub = true;
        self.model_dir = PathBuf::new();
        self
    }

    /// Stub LaBSE (768-d deterministic vectors).
    pub fn labse_stub() -> Self {
        Self::labse(PathBuf::new()).into_stub()
    }

    /// Stub paraphrase MiniLM (384-d deterministic vectors).
    pub fn pml_stub() -> Self {
        Self::pml(PathBuf::new()).into_stub()
    }

    /// Validates required fields and, outside stub mode, the model directory layout.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.name.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "encoder name cannot be empty".to_string(),
            });
        }
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }
        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }
        if let Some(missing) = self.missing_files().into_iter().next() {
            return Err(EmbeddingError::ModelNotFound { path: missing });
        }

        Ok(())
    }

    /// Required files absent from `model_dir`.
    pub fn missing_files(&self) -> Vec<PathBuf> {
        REQUIRED_MODEL_FILES
            .iter()
            .map(|file| self.model_dir.join(file))
            .filter(|path| !path.exists())
            .collect()
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }
}
