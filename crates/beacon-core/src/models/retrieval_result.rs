use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Chunk;

/// Which indexes contributed to a retrieval result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMethod {
    Hybrid,
    VectorOnly,
    LexicalOnly,
}

/// Per-stage retrieval latency in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalLatency {
    pub embed_ms: u64,
    pub vector_ms: u64,
    pub lexical_ms: u64,
    pub fusion_ms: u64,
    pub rerank_ms: u64,
    pub total_ms: u64,
}

/// Raw scores a chunk received from each method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodScores {
    pub vector_rank: Option<usize>,
    pub vector_score: Option<f64>,
    pub lexical_rank: Option<usize>,
    pub lexical_score: Option<f64>,
    pub fused_score: f64,
}

impl MethodScores {
    /// Whether both indexes returned this chunk.
    pub fn in_both(&self) -> bool {
        self.vector_rank.is_some() && self.lexical_rank.is_some()
    }
}

/// Deduplicated, ordered evidence for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub chunks: Vec<Chunk>,
    pub method: RetrievalMethod,
    /// Distinct candidates seen across both indexes before truncation.
    pub total_candidates: usize,
    pub latency: RetrievalLatency,
    /// Keyed by chunk id.
    pub scores: BTreeMap<String, MethodScores>,
    /// Fraction of distinct query terms found verbatim in retrieved content.
    pub coverage: f64,
}

impl RetrievalResult {
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Number of distinct source documents.
    pub fn distinct_docs(&self) -> usize {
        let mut docs: Vec<&str> = self.chunks.iter().map(|c| c.doc_id.as_str()).collect();
        docs.sort_unstable();
        docs.dedup();
        docs.len()
    }
}
