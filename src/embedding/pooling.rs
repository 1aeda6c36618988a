//! Token pooling for sentence-transformers checkpoints.
//!
//! The strategy comes from the checkpoint's `1_Pooling/config.json`.

use std::path::Path;

use candle_core::{DType, IndexOp, Tensor};
use serde::Deserialize;

use super::error::EmbeddingError;

/// How token states collapse into one sentence vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolingStrategy {
    /// Hidden state of the first (`[CLS]`) token. LaBSE uses this.
    Cls,
    /// Attention-masked mean over all tokens. The paraphrase MiniLM models use this.
    Mean,
}

#[derive(Debug, Default, Deserialize)]
struct PoolingConfigFile {
    #[serde(default)]
    pooling_mode_cls_token: bool,
    #[serde(default)]
    pooling_mode_mean_tokens: bool,
    #[serde(default)]
    pooling_mode_max_tokens: bool,
    #[serde(default)]
    pooling_mode_mean_sqrt_len_tokens: bool,
}

impl PoolingStrategy {
    /// Reads the strategy from a `1_Pooling/config.json`.
    pub fn from_config_json(json: &str) -> Result<Self, EmbeddingError> {
        let file: PoolingConfigFile =
            serde_json::from_str(json).map_err(|e| EmbeddingError::InvalidConfig {
                reason: format!("invalid pooling config: {e}"),
            })?;

        if file.pooling_mode_max_tokens || file.pooling_mode_mean_sqrt_len_tokens {
            return Err(EmbeddingError::InvalidConfig {
                reason: "only cls and mean pooling are supported".to_string(),
            });
        }

        match (file.pooling_mode_cls_token, file.pooling_mode_mean_tokens) {
            (true, false) => Ok(PoolingStrategy::Cls),
            (false, true) => Ok(PoolingStrategy::Mean),
            (true, true) => Err(EmbeddingError::InvalidConfig {
                reason: "concatenated pooling modes are not supported".to_string(),
            }),
            (false, false) => Err(EmbeddingError::InvalidConfig {
                reason: "pooling config enables no pooling mode".to_string(),
            }),
        }
    }

    /// Reads `<model_dir>/1_Pooling/config.json`, or returns `fallback` if the file is absent.
    pub fn from_model_dir(model_dir: &Path, fallback: Self) -> Result<Self, EmbeddingError> {
        let path = model_dir.join("1_Pooling").join("config.json");
        if !path.exists() {
            return Ok(fallback);
        }
        let json = std::fs::read_to_string(&path)?;
        Self::from_config_json(&json)
    }

    /// Pools `hidden` (`[batch, seq, hidden]`) into `[batch, hidden]`.
    ///
    /// `attention_mask` is `[batch, seq]` of 0/1 integers.
    pub fn pool(self, hidden: &Tensor, attention_mask: &Tensor) -> candle_core::Result<Tensor> {
        match self {
            PoolingStrategy::Cls => hidden.i((.., 0, ..)),
            PoolingStrategy::Mean => {
                let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
                let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
                let counts = mask.sum(1)?.clamp(1e-9f32, f32::MAX)?;
                summed.broadcast_div(&counts)
            }
        }
    }
}
