use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Tier;

/// Answer cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Master switch for both cache layers.
    pub enabled: bool,
    /// Enable the L1 semantic (embedding similarity) layer.
    pub semantic_enabled: bool,
    /// Cosine similarity below this is an L1 miss.
    pub semantic_threshold: f64,
    /// Recent queries remembered per tenant for L1 lookups.
    pub semantic_index_capacity: usize,
    /// Answers backed by fewer chunks are never cached.
    pub min_chunks_for_write: usize,
    /// Answers grounded below this are never cached.
    pub min_grounding_for_write: f64,
    pub ttl_l1_secs: u64,
    pub ttl_l2_secs: u64,
    pub ttl_l3_secs: u64,
    /// TTL for "no information found" answers.
    pub negative_ttl_secs: u64,
    /// Capacity of the in-process backend.
    pub max_entries: u64,
}

impl CacheConfig {
    /// TTL for an answer produced at `tier`. Cheaper tiers expire sooner.
    pub fn ttl_secs_for(&self, tier: Tier) -> u64 {
        match tier {
            Tier::L1 => self.ttl_l1_secs,
            Tier::L2 => self.ttl_l2_secs,
            Tier::L3 => self.ttl_l3_secs,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_CACHE_ENABLED,
            semantic_enabled: defaults::DEFAULT_SEMANTIC_ENABLED,
            semantic_threshold: defaults::DEFAULT_SEMANTIC_THRESHOLD,
            semantic_index_capacity: defaults::DEFAULT_SEMANTIC_INDEX_CAPACITY,
            min_chunks_for_write: defaults::DEFAULT_MIN_CHUNKS_FOR_WRITE,
            min_grounding_for_write: defaults::DEFAULT_MIN_GROUNDING_FOR_WRITE,
            ttl_l1_secs: defaults::DEFAULT_TTL_L1_SECS,
            ttl_l2_secs: defaults::DEFAULT_TTL_L2_SECS,
            ttl_l3_secs: defaults::DEFAULT_TTL_L3_SECS,
            negative_ttl_secs: defaults::DEFAULT_NEGATIVE_TTL_SECS,
            max_entries: defaults::DEFAULT_MEMORY_CACHE_ENTRIES,
        }
    }
}
