//! Tests for beacon-observability: metrics counters, snapshots, span macros.

use std::sync::Arc;
use std::thread;

use beacon_core::models::{CacheLayer, Outcome, PiiCategory, Tier};
use beacon_observability::tracing_setup::{events, spans};
use beacon_observability::{MetricsSnapshot, PipelineMetrics};

#[test]
fn counters_start_at_zero() {
    let metrics = PipelineMetrics::new();
    assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
}

#[test]
fn cache_hits_are_split_by_layer() {
    let metrics = PipelineMetrics::new();
    metrics.record_cache_hit(CacheLayer::L0Exact);
    metrics.record_cache_hit(CacheLayer::L0Exact);
    metrics.record_cache_hit(CacheLayer::L1Semantic);
    metrics.record_cache_miss();

    let snap = metrics.snapshot();
    assert_eq!(snap.l0_hits, 2);
    assert_eq!(snap.l1_hits, 1);
    assert_eq!(snap.cache_misses, 1);
    assert!((snap.cache_hit_rate() - 0.75).abs() < 1e-9);
}

#[test]
fn negative_writes_also_count_as_writes() {
    let metrics = PipelineMetrics::new();
    metrics.record_cache_write(false);
    metrics.record_cache_write(true);
    let snap = metrics.snapshot();
    assert_eq!(snap.cache_writes, 2);
    assert_eq!(snap.negative_writes, 1);
}

#[test]
fn answers_are_counted_per_tier() {
    let metrics = PipelineMetrics::new();
    metrics.record_answer(Tier::L1);
    metrics.record_answer(Tier::L3);
    metrics.record_answer(Tier::L3);
    metrics.record_escalation();
    let snap = metrics.snapshot();
    assert_eq!((snap.answers_l1, snap.answers_l2, snap.answers_l3), (1, 0, 2));
    assert!((snap.escalation_rate() - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn rates_are_zero_without_traffic() {
    let snap = MetricsSnapshot::default();
    assert_eq!(snap.cache_hit_rate(), 0.0);
    assert_eq!(snap.escalation_rate(), 0.0);
}

#[test]
fn concurrent_recording_loses_no_updates() {
    let metrics = Arc::new(PipelineMetrics::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let m = Arc::clone(&metrics);
            thread::spawn(move || {
                for _ in 0..1000 {
                    m.record_request();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(metrics.snapshot().requests, 8000);
}

#[test]
fn snapshot_serializes_to_json() {
    let metrics = PipelineMetrics::new();
    metrics.record_request();
    let json = serde_json::to_value(metrics.snapshot()).unwrap();
    assert_eq!(json["requests"], 1);
    assert_eq!(json["exhausted"], 0);
}

#[test]
fn span_macros_and_events_are_usable_without_a_subscriber() {
    let span = beacon_observability::pipeline_span!("req-1", "acme");
    let _guard = span.enter();
    let _g = beacon_observability::generation_span!("req-1", Tier::L2, 1).entered();
    let _r = beacon_observability::retrieval_span!("req-1", "acme");
    let _v = beacon_observability::validation_span!("req-1", Tier::L2);
    let _c = beacon_observability::cache_span!("req-1", "lookup");
    events::tier_escalated(Tier::L1, Tier::L2, 0.4, true);
    events::pii_audit(&[PiiCategory::Ssn], "raw");
    events::answer_completed("req-1", Outcome::Answered, Tier::L2, 1, 12);
    assert_eq!(spans::names::PIPELINE, "beacon.pipeline");
}
