use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How much of a response is traceable to retrieved content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingMetrics {
    /// Weighted grounded n-gram share, always in [0.0, 1.0].
    pub score: f64,
    pub passed: bool,
    pub threshold: f64,
    pub grounded_weight: f64,
    pub total_weight: f64,
    /// Response tokens found in each chunk, keyed by chunk id.
    pub chunk_token_hits: BTreeMap<String, usize>,
    /// Runs of response tokens found in no chunk.
    pub ungrounded_spans: Vec<String>,
}
