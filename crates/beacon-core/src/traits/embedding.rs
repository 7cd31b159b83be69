use std::future::Future;

use crate::errors::EmbeddingError;

/// Query embedding provider.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
