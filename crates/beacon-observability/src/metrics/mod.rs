//! Pipeline counters.
//!
//! Counters are append-only `AtomicU64`s shared through an `Arc`. A snapshot
//! reads each counter independently; it is not a transaction.

use std::sync::atomic::{AtomicU64, Ordering};

use beacon_core::models::{CacheLayer, Tier};
use serde::{Deserialize, Serialize};

/// Live counters shared by every request of one engine.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    requests: AtomicU64,
    l0_hits: AtomicU64,
    l1_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_unavailable: AtomicU64,
    cache_writes: AtomicU64,
    cache_writes_gated: AtomicU64,
    negative_writes: AtomicU64,
    escalations: AtomicU64,
    downgrades: AtomicU64,
    retrieval_empty: AtomicU64,
    retrieval_unavailable: AtomicU64,
    retrieval_degraded: AtomicU64,
    pii_redactions: AtomicU64,
    deadline_fallbacks: AtomicU64,
    generation_failures: AtomicU64,
    validation_internal_errors: AtomicU64,
    exhausted: AtomicU64,
    answers_l1: AtomicU64,
    answers_l2: AtomicU64,
    answers_l3: AtomicU64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

fn read(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        bump(&self.requests);
    }

    pub fn record_cache_hit(&self, layer: CacheLayer) {
        match layer {
            CacheLayer::L0Exact => bump(&self.l0_hits),
            CacheLayer::L1Semantic => bump(&self.l1_hits),
        }
    }

    pub fn record_cache_miss(&self) {
        bump(&self.cache_misses);
    }

    pub fn record_cache_unavailable(&self) {
        bump(&self.cache_unavailable);
    }

    pub fn record_cache_write(&self, negative: bool) {
        bump(&self.cache_writes);
        if negative {
            bump(&self.negative_writes);
        }
    }

    /// An answer that failed the write gate.
    pub fn record_cache_gated(&self) {
        bump(&self.cache_writes_gated);
    }

    pub fn record_escalation(&self) {
        bump(&self.escalations);
    }

    pub fn record_downgrade(&self) {
        bump(&self.downgrades);
    }

    pub fn record_retrieval_empty(&self) {
        bump(&self.retrieval_empty);
    }

    pub fn record_retrieval_unavailable(&self) {
        bump(&self.retrieval_unavailable);
    }

    /// One index or the embedder fell back.
    pub fn record_retrieval_degraded(&self) {
        bump(&self.retrieval_degraded);
    }

    pub fn record_pii_redaction(&self) {
        bump(&self.pii_redactions);
    }

    pub fn record_deadline_fallback(&self) {
        bump(&self.deadline_fallbacks);
    }

    pub fn record_generation_failure(&self) {
        bump(&self.generation_failures);
    }

    pub fn record_validation_internal(&self) {
        bump(&self.validation_internal_errors);
    }

    pub fn record_exhausted(&self) {
        bump(&self.exhausted);
    }

    /// A generated answer returned at `tier`.
    pub fn record_answer(&self, tier: Tier) {
        match tier {
            Tier::L1 => bump(&self.answers_l1),
            Tier::L2 => bump(&self.answers_l2),
            Tier::L3 => bump(&self.answers_l3),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: read(&self.requests),
            l0_hits: read(&self.l0_hits),
            l1_hits: read(&self.l1_hits),
            cache_misses: read(&self.cache_misses),
            cache_unavailable: read(&self.cache_unavailable),
            cache_writes: read(&self.cache_writes),
            cache_writes_gated: read(&self.cache_writes_gated),
            negative_writes: read(&self.negative_writes),
            escalations: read(&self.escalations),
            downgrades: read(&self.downgrades),
            retrieval_empty: read(&self.retrieval_empty),
            retrieval_unavailable: read(&self.retrieval_unavailable),
            retrieval_degraded: read(&self.retrieval_degraded),
            pii_redactions: read(&self.pii_redactions),
            deadline_fallbacks: read(&self.deadline_fallbacks),
            generation_failures: read(&self.generation_failures),
            validation_internal_errors: read(&self.validation_internal_errors),
            exhausted: read(&self.exhausted),
            answers_l1: read(&self.answers_l1),
            answers_l2: read(&self.answers_l2),
            answers_l3: read(&self.answers_l3),
        }
    }
}

/// Point-in-time copy of [`PipelineMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub l0_hits: u64,
    pub l1_hits: u64,
    pub cache_misses: u64,
    pub cache_unavailable: u64,
    pub cache_writes: u64,
    pub cache_writes_gated: u64,
    pub negative_writes: u64,
    pub escalations: u64,
    pub downgrades: u64,
    pub retrieval_empty: u64,
    pub retrieval_unavailable: u64,
    pub retrieval_degraded: u64,
    pub pii_redactions: u64,
    pub deadline_fallbacks: u64,
    pub generation_failures: u64,
    pub validation_internal_errors: u64,
    pub exhausted: u64,
    pub answers_l1: u64,
    pub answers_l2: u64,
    pub answers_l3: u64,
}

impl MetricsSnapshot {
    /// Cache hits (either layer) over lookups.
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.l0_hits + self.l1_hits;
        let lookups = hits + self.cache_misses;
        if lookups == 0 {
            return 0.0;
        }
        hits as f64 / lookups as f64
    }

    /// Escalations per generated answer.
    pub fn escalation_rate(&self) -> f64 {
        let answers = self.answers_l1 + self.answers_l2 + self.answers_l3;
        if answers == 0 {
            return 0.0;
        }
        self.escalations as f64 / answers as f64
    }
}
