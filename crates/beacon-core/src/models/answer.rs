use serde::{Deserialize, Serialize};

use super::{Citation, RetrievalLatency, RetrievalMethod, Tier, TokenUsage};

/// One benefits question from one employee of one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub query: String,
    pub company_id: String,
    /// Caller-supplied correlation id. Generated when absent.
    #[serde(default)]
    pub request_id: Option<String>,
}

impl AnswerRequest {
    pub fn new(query: impl Into<String>, company_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            company_id: company_id.into(),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// How a request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Generated and validated.
    Answered,
    /// Generated, but still failing validation after the retry budget.
    AnsweredUnvalidated,
    /// Served from the answer cache.
    Cached,
    /// Retrieval found nothing for this tenant.
    NoInformation,
    /// The search indexes could not be reached.
    RetrievalUnavailable,
    /// Generation failed permanently; an apology was returned.
    GenerationFailed,
    /// The request deadline elapsed mid-pipeline.
    DeadlineExceeded,
}

/// Which cache layer served the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheLayer {
    /// Exact normalized-query match.
    L0Exact,
    /// Embedding-similarity match.
    L1Semantic,
}

/// Per-stage latency breakdown in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageLatency {
    pub understanding_ms: u64,
    pub cache_lookup_ms: u64,
    pub retrieval: Option<RetrievalLatency>,
    pub routing_ms: u64,
    /// One entry per generation attempt.
    pub generation_ms: Vec<u64>,
    /// One entry per validation pass.
    pub validation_ms: Vec<u64>,
    pub cache_write_ms: u64,
    pub total_ms: u64,
}

/// Diagnostics returned alongside every answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerMetadata {
    pub request_id: String,
    pub outcome: Outcome,
    pub retrieved_chunks: usize,
    pub total_candidates: usize,
    pub retrieval_method: Option<RetrievalMethod>,
    pub coverage: Option<f64>,
    pub grounding_score: Option<f64>,
    pub escalations: usize,
    pub downgrades: usize,
    pub pii_detected: bool,
    pub cache_layer: Option<CacheLayer>,
    /// TTL applied when this answer was written to the cache.
    pub cache_ttl_secs: Option<u64>,
    pub latency: StageLatency,
}

impl AnswerMetadata {
    pub fn new(request_id: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            request_id: request_id.into(),
            outcome,
            retrieved_chunks: 0,
            total_candidates: 0,
            retrieval_method: None,
            coverage: None,
            grounding_score: None,
            escalations: 0,
            downgrades: 0,
            pii_detected: false,
            cache_layer: None,
            cache_ttl_secs: None,
            latency: StageLatency::default(),
        }
    }
}

/// The single response shape returned by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub tier: Tier,
    pub from_cache: bool,
    pub usage: TokenUsage,
    pub metadata: AnswerMetadata,
}
