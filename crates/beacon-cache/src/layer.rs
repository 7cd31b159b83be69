//! AnswerCache: L0/L1 lookup and gated writes over any [`CacheBackend`].

use std::time::Duration;

use beacon_core::config::CacheConfig;
use beacon_core::errors::CacheError;
use beacon_core::models::{CacheLayer, CachedAnswer};
use beacon_core::traits::CacheBackend;
use beacon_observability::events;
use tracing::{debug, warn};

use crate::keys::semantic_index_key;
use crate::policy::{negative_ttl, should_cache, ttl_for};
use crate::semantic::SemanticIndex;

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit {
        answer: CachedAnswer,
        layer: CacheLayer,
        key: String,
    },
    Miss,
    /// The backend could not be used; treated as a miss.
    Unavailable,
}

/// Result of a cache write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    Written { ttl_secs: u64 },
    /// Rejected by the write gate.
    Gated,
    /// Caching is switched off.
    Disabled,
    /// The backend could not be used; nothing was written.
    Unavailable,
}

/// Answer cache over a borrowed backend.
pub struct AnswerCache<'a, B> {
    backend: &'a B,
    config: &'a CacheConfig,
}

impl<'a, B: CacheBackend> AnswerCache<'a, B> {
    pub fn new(backend: &'a B, config: &'a CacheConfig) -> Self {
        Self { backend, config }
    }

    /// L0: exact normalized-query lookup.
    pub async fn lookup_exact(&self, key: &str) -> CacheLookup {
        if !self.config.enabled {
            return CacheLookup::Miss;
        }
        if !self.backend.is_available().await {
            degraded("lookup", "backend reported unavailable");
            return CacheLookup::Unavailable;
        }
        match self.read_answer(key).await {
            Ok(Some(answer)) => {
                events::cache_hit(CacheLayer::L0Exact, key);
                CacheLookup::Hit {
                    answer,
                    layer: CacheLayer::L0Exact,
                    key: key.to_string(),
                }
            }
            Ok(None) => CacheLookup::Miss,
            Err(e) => {
                degraded("lookup", &e.to_string());
                CacheLookup::Unavailable
            }
        }
    }

    /// L1: nearest recent query of the same tenant by embedding similarity.
    pub async fn lookup_semantic(&self, company_id: &str, embedding: &[f32]) -> CacheLookup {
        if !self.config.enabled || !self.config.semantic_enabled {
            return CacheLookup::Miss;
        }
        if !self.backend.is_available().await {
            degraded("semantic lookup", "backend reported unavailable");
            return CacheLookup::Unavailable;
        }

        let index = match self.read_index(company_id).await {
            Ok(index) => index,
            Err(e) => {
                degraded("semantic lookup", &e.to_string());
                return CacheLookup::Unavailable;
            }
        };
        let Some((key, similarity)) = index.best_match(embedding, self.config.semantic_threshold)
        else {
            return CacheLookup::Miss;
        };
        debug!(key = %key, similarity, "semantic index match");

        match self.read_answer(key).await {
            Ok(Some(answer)) => {
                events::cache_hit(CacheLayer::L1Semantic, key);
                CacheLookup::Hit {
                    answer,
                    layer: CacheLayer::L1Semantic,
                    key: key.to_string(),
                }
            }
            // The index outlives entries it points at.
            Ok(None) => CacheLookup::Miss,
            Err(e) => {
                degraded("semantic lookup", &e.to_string());
                CacheLookup::Unavailable
            }
        }
    }

    /// Store a generated answer if it passes the write gate, then record its
    /// embedding in the tenant's semantic index.
    pub async fn store(
        &self,
        key: &str,
        company_id: &str,
        embedding: Option<&[f32]>,
        answer: &CachedAnswer,
        retrieved_chunk_count: usize,
    ) -> CacheWrite {
        if !self.config.enabled {
            return CacheWrite::Disabled;
        }
        if !should_cache(retrieved_chunk_count, answer.grounding_score, self.config) {
            debug!(
                key = %key,
                retrieved_chunk_count,
                grounding = answer.grounding_score,
                "cache write gated"
            );
            return CacheWrite::Gated;
        }

        let ttl = ttl_for(answer.tier, self.config);
        let written = self.write(key, answer, ttl).await;
        if let (CacheWrite::Written { .. }, Some(embedding)) = (written, embedding) {
            if self.config.semantic_enabled {
                if let Err(e) = self.index_query(company_id, embedding, key).await {
                    degraded("semantic index update", &e.to_string());
                }
            }
        }
        written
    }

    /// Store a "no information found" answer with the short negative TTL.
    /// Not gated and not added to the semantic index.
    pub async fn store_negative(&self, key: &str, answer: &CachedAnswer) -> CacheWrite {
        if !self.config.enabled {
            return CacheWrite::Disabled;
        }
        self.write(key, answer, negative_ttl(self.config)).await
    }

    async fn write(&self, key: &str, answer: &CachedAnswer, ttl: Duration) -> CacheWrite {
        if !self.backend.is_available().await {
            degraded("write", "backend reported unavailable");
            return CacheWrite::Unavailable;
        }
        let payload = match serde_json::to_string(answer) {
            Ok(p) => p,
            Err(e) => {
                degraded("write", &e.to_string());
                return CacheWrite::Unavailable;
            }
        };
        match self.backend.set(key, payload, ttl).await {
            Ok(()) => {
                events::cache_written(key, answer.tier, ttl.as_secs(), answer.negative);
                CacheWrite::Written {
                    ttl_secs: ttl.as_secs(),
                }
            }
            Err(e) => {
                degraded("write", &e.to_string());
                CacheWrite::Unavailable
            }
        }
    }

    async fn read_answer(&self, key: &str) -> Result<Option<CachedAnswer>, CacheError> {
        let Some(raw) = self.backend.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(answer) => Ok(Some(answer)),
            Err(e) => {
                warn!(key = %key, error = %e, "unreadable cache entry ignored");
                Ok(None)
            }
        }
    }

    async fn read_index(&self, company_id: &str) -> Result<SemanticIndex, CacheError> {
        let key = semantic_index_key(company_id);
        let Some(raw) = self.backend.get(&key).await? else {
            return Ok(SemanticIndex::default());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "unreadable semantic index reset");
            SemanticIndex::default()
        }))
    }

    // Read-modify-write without a lock: concurrent writers may drop each
    // other's entries, which only costs a future L1 hit.
    async fn index_query(&self, company_id: &str, embedding: &[f32], key: &str) -> Result<(), CacheError> {
        let mut index = self.read_index(company_id).await?;
        index.push(
            embedding.to_vec(),
            key.to_string(),
            self.config.semantic_index_capacity,
        );
        let payload = serde_json::to_string(&index).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        let ttl = Duration::from_secs(self.config.ttl_l3_secs);
        self.backend
            .set(&semantic_index_key(company_id), payload, ttl)
            .await
    }
}

fn degraded(operation: &str, reason: &str) {
    warn!(operation = %operation, reason = %reason, "cache degraded");
    events::degradation_triggered("cache", reason, "bypass");
}
