use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use serde::Deserialize;
use std::path::Path;

use super::pooling::PoolingStrategy;

/// Activation applied after the optional dense projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DenseActivation {
    Tanh,
    Identity,
}

#[derive(Debug, Deserialize)]
struct DenseConfigFile {
    in_features: usize,
    out_features: usize,
    #[serde(default = "default_true")]
    bias: bool,
    #[serde(default)]
    activation_function: String,
}

#[derive(Debug, Deserialize)]
struct HiddenSize {
    hidden_size: usize,
}

fn default_true() -> bool {
    true
}

/// `2_Dense` module of a sentence-transformers checkpoint (LaBSE ships one).
struct DenseLayer {
    linear: Linear,
    activation: DenseActivation,
    out_features: usize,
}

impl DenseLayer {
    fn load(dense_dir: &Path, device: &Device) -> Result<Self> {
        let config_content = std::fs::read_to_string(dense_dir.join("config.json"))?;
        let config: DenseConfigFile = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse dense config: {}", e)))?;

        let activation = match config.activation_function.rsplit('.').next() {
            Some("Tanh") => DenseActivation::Tanh,
            Some("Identity") | Some("") | None => DenseActivation::Identity,
            Some(other) => {
                return Err(candle::Error::Msg(format!(
                    "unsupported dense activation: {other}"
                )));
            }
        };

        let weights_path = dense_dir.join("model.safetensors");
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };
        let linear = if config.bias {
            candle_nn::linear(config.in_features, config.out_features, vb.pp("linear"))?
        } else {
            candle_nn::linear_no_bias(config.in_features, config.out_features, vb.pp("linear"))?
        };

        Ok(Self {
            linear,
            activation,
            out_features: config.out_features,
        })
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let x = self.linear.forward(x)?;
        match self.activation {
            DenseActivation::Tanh => x.tanh(),
            DenseActivation::Identity => Ok(x),
        }
    }
}

/// BERT encoder + pooling + optional dense head, i.e. a sentence-transformers pipeline
/// minus the final normalize step.
pub struct BertSentenceModel {
    bert: BertModel,
    pooling: PoolingStrategy,
    dense: Option<DenseLayer>,
    hidden_size: usize,
}

impl BertSentenceModel {
    /// Loads `config.json` + `model.safetensors` from `model_dir`, and `2_Dense/` if present.
    pub fn load<P: AsRef<Path>>(
        model_dir: P,
        pooling: PoolingStrategy,
        device: &Device,
    ) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
        let HiddenSize { hidden_size } = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let bert = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb, &config)?
        };

        let dense_dir = model_dir.join("2_Dense");
        let dense = if dense_dir.join("config.json").exists() {
            Some(DenseLayer::load(&dense_dir, device)?)
        } else {
            None
        };

        Ok(Self {
            bert,
            pooling,
            dense,
            hidden_size,
        })
    }

    /// Length of the vectors [`forward`](Self::forward) returns.
    pub fn output_dim(&self) -> usize {
        self.dense
            .as_ref()
            .map_or(self.hidden_size, |dense| dense.out_features)
    }

    pub fn pooling(&self) -> PoolingStrategy {
        self.pooling
    }

    pub fn has_dense(&self) -> bool {
        self.dense.is_some()
    }

    /// Returns `[batch, output_dim]` sentence vectors.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .bert
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        let pooled = self.pooling.pool(&hidden, attention_mask)?;
        match &self.dense {
            Some(dense) => dense.forward(&pooled),
            None => Ok(pooled),
        }
    }
}
