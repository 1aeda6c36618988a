use serde::{Deserialize, Serialize};

/// The two sentences to compare.
///
/// Field names match the form fields (`sentence`, `target_sentence`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPair {
    pub sentence: String,
    pub target_sentence: String,
}

impl TextPair {
    pub fn new(sentence: impl Into<String>, target_sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            target_sentence: target_sentence.into(),
        }
    }

    /// Same pair with the sides swapped.
    pub fn swapped(&self) -> Self {
        Self {
            sentence: self.target_sentence.clone(),
            target_sentence: self.sentence.clone(),
        }
    }
}

/// Cosine similarity per encoder, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScores {
    /// LaBSE score.
    pub labse: f32,
    /// paraphrase-multilingual-MiniLM-L12-v2 score.
    pub pml: f32,
}
