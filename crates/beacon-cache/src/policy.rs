//! Write gating and TTL policy.

use std::time::Duration;

use beacon_core::config::CacheConfig;
use beacon_core::models::Tier;

/// Whether an answer is trustworthy enough to cache: enough evidence behind
/// it and grounded at or above the write floor.
pub fn should_cache(retrieved_chunk_count: usize, grounding_score: f64, config: &CacheConfig) -> bool {
    retrieved_chunk_count >= config.min_chunks_for_write
        && grounding_score >= config.min_grounding_for_write
}

/// TTL for an answer produced at `tier`.
pub fn ttl_for(tier: Tier, config: &CacheConfig) -> Duration {
    Duration::from_secs(config.ttl_secs_for(tier))
}

/// TTL for a "no information found" answer.
pub fn negative_ttl(config: &CacheConfig) -> Duration {
    Duration::from_secs(config.negative_ttl_secs)
}
