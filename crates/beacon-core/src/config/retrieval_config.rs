use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Hybrid retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Candidates fetched from the vector index.
    pub vector_k: usize,
    /// Candidates fetched from the lexical (BM25) index.
    pub bm25_k: usize,
    /// Chunks kept after fusion. Must not exceed `vector_k + bm25_k`.
    pub final_top_k: usize,
    /// Chunks kept after re-ranking.
    pub reranked_top_k: usize,
    /// Enable the secondary re-ranking pass.
    pub enable_reranking: bool,
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// Shared deadline for both index searches.
    pub deadline_ms: u64,
    /// Deadline for the query embedding call.
    pub embed_timeout_ms: u64,
}

impl RetrievalConfig {
    /// Check the fusion and deadline bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.final_top_k == 0 {
            return Err(invalid("retrieval.final_top_k", "must be positive".to_string()));
        }
        if self.final_top_k > self.vector_k + self.bm25_k {
            return Err(invalid(
                "retrieval.final_top_k",
                format!(
                    "{} exceeds vector_k + bm25_k ({})",
                    self.final_top_k,
                    self.vector_k + self.bm25_k
                ),
            ));
        }
        if self.deadline_ms == 0 {
            return Err(invalid("retrieval.deadline_ms", "must be positive".to_string()));
        }
        if self.embed_timeout_ms == 0 {
            return Err(invalid("retrieval.embed_timeout_ms", "must be positive".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason,
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            vector_k: defaults::DEFAULT_VECTOR_K,
            bm25_k: defaults::DEFAULT_BM25_K,
            final_top_k: defaults::DEFAULT_FINAL_TOP_K,
            reranked_top_k: defaults::DEFAULT_RERANKED_TOP_K,
            enable_reranking: defaults::DEFAULT_ENABLE_RERANKING,
            rrf_k: defaults::DEFAULT_RRF_K,
            deadline_ms: defaults::DEFAULT_RETRIEVAL_DEADLINE_MS,
            embed_timeout_ms: defaults::DEFAULT_EMBED_TIMEOUT_MS,
        }
    }
}
