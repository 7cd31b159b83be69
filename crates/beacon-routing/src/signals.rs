use beacon_core::models::{QueryProfile, RetrievalResult, RoutingSignals};
use beacon_retrieval::coverage::{evidence_score, query_terms};

/// Derive routing signals from the query profile and retrieved evidence.
///
/// Coverage is taken from the retrieval result; evidence is the best single
/// chunk's term overlap. Multi-document synthesis means the question
/// compares or spans topics and the evidence comes from at least two
/// documents.
pub fn derive_signals(profile: &QueryProfile, retrieval: &RetrievalResult) -> RoutingSignals {
    let terms = query_terms(&profile.normalized);
    let spans_topics = profile.signals.has_comparison || profile.signals.multi_topic;

    RoutingSignals {
        coverage: retrieval.coverage,
        evidence_score: evidence_score(&terms, &retrieval.chunks),
        complexity_score: profile.complexity,
        risk_score: profile.risk,
        multi_doc_synthesis: spans_topics && retrieval.distinct_docs() >= 2,
        has_operators: profile.signals.has_operators,
        needs_tools: profile.needs_tool,
    }
}
