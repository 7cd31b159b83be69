use std::collections::BTreeMap;

use beacon_core::config::RoutingConfig;
use beacon_core::models::{Chunk, RetrievalLatency, RetrievalMethod, RetrievalResult, Tier};
use beacon_routing::{derive_signals, select_tier_with_reason, RouteRule};
use test_fixtures::{tenant_chunks, ACME};

fn result_from(ids: &[&str], coverage: f64) -> RetrievalResult {
    let chunks: Vec<Chunk> = tenant_chunks(ACME)
        .into_iter()
        .filter(|c| ids.contains(&c.id.as_str()))
        .collect();
    RetrievalResult {
        chunks,
        method: RetrievalMethod::Hybrid,
        total_candidates: ids.len(),
        latency: RetrievalLatency::default(),
        scores: BTreeMap::new(),
        coverage,
    }
}

#[test]
fn ppo_definition_routes_to_l1() {
    let profile = beacon_query::analyze("What is a PPO plan?");
    let retrieval = result_from(&["acme-med-001", "acme-med-003"], 1.0);

    let signals = derive_signals(&profile, &retrieval);
    assert_eq!(signals.evidence_score, 1.0);
    assert!(!signals.multi_doc_synthesis);

    let (rule, tier) = select_tier_with_reason(&signals, &RoutingConfig::default());
    assert_eq!((rule, tier), (RouteRule::Simple, Tier::L1));
}

#[test]
fn cost_calculation_routes_to_l3_despite_full_coverage() {
    let profile = beacon_query::analyze(
        "how much will I pay for a $5000 procedure with 80% coverage and $1000 deductible",
    );
    let retrieval = result_from(&["acme-med-002", "acme-med-003"], 1.0);

    let signals = derive_signals(&profile, &retrieval);
    assert!(signals.needs_tools);

    let (rule, tier) = select_tier_with_reason(&signals, &RoutingConfig::default());
    assert_eq!((rule, tier), (RouteRule::HighStakes, Tier::L3));
}

#[test]
fn thin_coverage_routes_to_l3() {
    let profile = beacon_query::analyze("what is a PPO plan?");
    let retrieval = result_from(&["acme-vis-001"], 0.2);

    let (rule, tier) =
        select_tier_with_reason(&derive_signals(&profile, &retrieval), &RoutingConfig::default());
    assert_eq!((rule, tier), (RouteRule::InsufficientEvidence, Tier::L3));
}

#[test]
fn comparison_across_documents_is_multi_doc_synthesis() {
    let profile = beacon_query::analyze("compare the PPO versus the HDHP");
    let retrieval = result_from(&["acme-med-002", "acme-den-001"], 1.0);

    let signals = derive_signals(&profile, &retrieval);
    assert!(profile.signals.has_comparison);
    assert!(signals.multi_doc_synthesis);
    assert_eq!(select_tier_with_reason(&signals, &RoutingConfig::default()).1, Tier::L3);
}

#[test]
fn comparison_within_one_document_is_not_synthesis() {
    let profile = beacon_query::analyze("compare the PPO versus the HDHP");
    let retrieval = result_from(&["acme-med-002"], 1.0);
    assert!(!derive_signals(&profile, &retrieval).multi_doc_synthesis);
}
