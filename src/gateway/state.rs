use std::sync::Arc;
use std::time::Duration;

use crate::constants::DEFAULT_INFERENCE_TIMEOUT;
use crate::scoring::SimilarityScorer;

#[derive(Clone)]
pub struct HandlerState {
    pub scorer: Arc<SimilarityScorer>,

    pub inference_timeout: Duration,
}

impl HandlerState {
    pub fn new(scorer: Arc<SimilarityScorer>) -> Self {
        Self {
            scorer,
            inference_timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }

    pub fn with_inference_timeout(mut self, timeout: Duration) -> Self {
        self.inference_timeout = timeout;
        self
    }
}
