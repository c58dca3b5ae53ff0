use async_trait::async_trait;

use crate::error::RetrievalResult;
use crate::models::{EmbeddingModel, EmbeddingResult};

/// Trait for embedding generation providers
///
/// Implementations map arbitrary text to a fixed-length vector through an
/// external embedding API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, model: EmbeddingModel, text: &str) -> RetrievalResult<EmbeddingResult>;
}
