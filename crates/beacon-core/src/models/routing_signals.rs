use serde::{Deserialize, Serialize};

/// Inputs to the tier decision table.
///
/// Plain data with no hidden state: derived solely from a `QueryProfile` and
/// a `RetrievalResult`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingSignals {
    pub coverage: f64,
    pub evidence_score: f64,
    pub complexity_score: f64,
    pub risk_score: f64,
    pub multi_doc_synthesis: bool,
    pub has_operators: bool,
    pub needs_tools: bool,
}
