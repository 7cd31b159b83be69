use crate::models::Tier;

/// Errors from the external generation (LLM) service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("generation at tier {tier} timed out after {elapsed_ms}ms")]
    Timeout { tier: Tier, elapsed_ms: u64 },

    #[error("generation at tier {tier} was rate limited")]
    RateLimited {
        tier: Tier,
        retry_after_ms: Option<u64>,
    },

    #[error("generation at tier {tier} failed: {reason}")]
    Failed { tier: Tier, reason: String },
}

impl GenerationError {
    /// Transient failures are worth a cheaper retry; hard failures are not.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::RateLimited { .. })
    }

    /// The tier the failed call was made at.
    pub fn tier(&self) -> Tier {
        match self {
            Self::Timeout { tier, .. } | Self::RateLimited { tier, .. } | Self::Failed { tier, .. } => {
                *tier
            }
        }
    }
}
