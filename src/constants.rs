//! Cross-cutting, shared constants.
//!
//! Model dimensions are fixed by the pretrained checkpoints. They are used to size
//! stub encoders and to sanity-check loaded models, never to reshape real output.

use std::time::Duration;

/// Output dimension of LaBSE (`sentence-transformers/LaBSE`).
pub const LABSE_EMBEDDING_DIM: usize = 768;

/// Max tokens LaBSE attends to.
pub const LABSE_MAX_SEQ_LEN: usize = 512;

/// Output dimension of `paraphrase-multilingual-MiniLM-L12-v2`.
pub const PML_EMBEDDING_DIM: usize = 384;

/// Max tokens the paraphrase MiniLM model attends to.
pub const PML_MAX_SEQ_LEN: usize = 128;

/// Display name of the LaBSE encoder (also the JSON/form output key).
pub const LABSE_MODEL_NAME: &str = "labse";

/// Display name of the paraphrase MiniLM encoder (also the JSON/form output key).
pub const PML_MODEL_NAME: &str = "pml";

/// Normalizer language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "hi";

/// Upper bound on a single scoring call (two sentences through two encoders).
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(30);

/// Norms at or below this are treated as zero when L2-normalizing.
pub const MIN_EMBEDDING_NORM: f32 = 1e-12;
