use super::{
    CacheError, ConfigError, EmbeddingError, GenerationError, RetrievalError, ValidationError,
};

/// Top-level error for the Beacon answer engine.
///
/// Subsystem errors convert into this via `From`. Of these, only
/// `PipelineExhausted` ever escapes `AnswerEngine::answer`; everything else is
/// turned into a well-formed fallback response inside the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum BeaconError {
    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("generation error: {0}")]
    GenerationError(#[from] GenerationError),

    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("cache error: {0}")]
    CacheError(#[from] CacheError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Every tier failed. The message is shown to end users and must not
    /// carry provider detail.
    #[error("we could not answer your question right now, please try again later")]
    PipelineExhausted { attempts: usize },
}

/// Convenience alias used across all Beacon crates.
pub type BeaconResult<T> = Result<T, BeaconError>;
