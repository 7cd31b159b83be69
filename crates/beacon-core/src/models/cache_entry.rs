use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Citation, Tier};

/// The serialized payload stored in the cache backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAnswer {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub tier: Tier,
    pub grounding_score: f64,
    /// A "no information found" answer with a short TTL.
    pub negative: bool,
    pub cached_at: DateTime<Utc>,
}

/// A write to the cache: key, payload, TTL, and producing tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: CachedAnswer,
    pub ttl_secs: u64,
    pub tier: Tier,
}
