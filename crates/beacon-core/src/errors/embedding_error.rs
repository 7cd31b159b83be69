/// Embedding subsystem errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding failed: {reason}")]
    Failed { reason: String },

    #[error("embedding timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
