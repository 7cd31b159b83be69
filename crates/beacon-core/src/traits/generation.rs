use std::future::Future;

use crate::errors::GenerationError;
use crate::models::{Generation, Tier};

/// LLM inference service, one model per tier.
pub trait GenerationProvider: Send + Sync {
    fn generate(
        &self,
        system_prompt: &str,
        user_query: &str,
        tier: Tier,
    ) -> impl Future<Output = Result<Generation, GenerationError>> + Send;
}
