//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use beacon_core::constants::AUDIT_TARGET;
use beacon_core::models::{CacheLayer, Outcome, PiiCategory, Tier};

/// Log an answer served from cache.
pub fn cache_hit(layer: CacheLayer, key: &str) {
    tracing::info!(
        event = "cache_hit",
        layer = ?layer,
        key = %key,
        "cache hit"
    );
}

/// Log an answer written to the cache.
pub fn cache_written(key: &str, tier: Tier, ttl_secs: u64, negative: bool) {
    tracing::debug!(
        event = "cache_written",
        key = %key,
        tier = %tier,
        ttl_secs = ttl_secs,
        negative = negative,
        "answer cached"
    );
}

/// Log the initial routing decision.
pub fn tier_selected(tier: Tier, rule: &str) {
    tracing::info!(event = "tier_selected", tier = %tier, rule = %rule, "tier selected");
}

/// Log an escalation after a failed validation.
pub fn tier_escalated(from: Tier, to: Tier, grounding_score: f64, citations_valid: bool) {
    tracing::info!(
        event = "tier_escalated",
        from = %from,
        to = %to,
        grounding_score = grounding_score,
        citations_valid = citations_valid,
        "tier escalated"
    );
}

/// Log a downgrade after a transient generation failure.
pub fn tier_downgraded(from: Tier, to: Tier, reason: &str) {
    tracing::warn!(
        event = "tier_downgraded",
        from = %from,
        to = %to,
        reason = %reason,
        "tier downgraded"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a chunk dropped because it belongs to another tenant.
pub fn tenant_violation(expected_company: &str, chunk_id: &str, chunk_company: &str) {
    tracing::warn!(
        event = "tenant_violation",
        expected_company = %expected_company,
        chunk_id = %chunk_id,
        chunk_company = %chunk_company,
        "search index returned a chunk from another tenant"
    );
}

/// Log that PII was redacted. Never carries the raw text.
pub fn pii_redacted(categories: &[PiiCategory], findings: usize) {
    tracing::info!(
        event = "pii_redacted",
        categories = ?categories,
        findings = findings,
        "pii redacted"
    );
}

/// Emit the unredacted text on the audit target only.
pub fn pii_audit(categories: &[PiiCategory], raw_text: &str) {
    tracing::trace!(
        target: AUDIT_TARGET,
        event = "pii_audit",
        categories = ?categories,
        raw_text = %raw_text,
        "pii audit record"
    );
}

/// Log the end of a request.
pub fn answer_completed(
    request_id: &str,
    outcome: Outcome,
    tier: Tier,
    escalations: usize,
    total_ms: u64,
) {
    tracing::info!(
        event = "answer_completed",
        request_id = %request_id,
        outcome = ?outcome,
        tier = %tier,
        escalations = escalations,
        total_ms = total_ms,
        "answer completed"
    );
}
