use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Tier;

/// Orchestration limits and deadlines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extra generation attempts after the first (escalations + downgrades).
    pub max_retries: usize,
    /// Whole-request deadline. On expiry a fallback answer is returned.
    pub request_deadline_ms: u64,
    pub generation_timeout_l1_ms: u64,
    pub generation_timeout_l2_ms: u64,
    pub generation_timeout_l3_ms: u64,
}

impl PipelineConfig {
    /// Deadline for a single generation call at `tier`.
    pub fn generation_timeout_ms(&self, tier: Tier) -> u64 {
        match tier {
            Tier::L1 => self.generation_timeout_l1_ms,
            Tier::L2 => self.generation_timeout_l2_ms,
            Tier::L3 => self.generation_timeout_l3_ms,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            request_deadline_ms: defaults::DEFAULT_REQUEST_DEADLINE_MS,
            generation_timeout_l1_ms: defaults::DEFAULT_GENERATION_TIMEOUT_L1_MS,
            generation_timeout_l2_ms: defaults::DEFAULT_GENERATION_TIMEOUT_L2_MS,
            generation_timeout_l3_ms: defaults::DEFAULT_GENERATION_TIMEOUT_L3_MS,
        }
    }
}
