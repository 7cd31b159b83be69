// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_VECTOR_K: usize = 20;
pub const DEFAULT_BM25_K: usize = 20;
pub const DEFAULT_FINAL_TOP_K: usize = 15;
pub const DEFAULT_RERANKED_TOP_K: usize = 10;
pub const DEFAULT_ENABLE_RERANKING: bool = true;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_RETRIEVAL_DEADLINE_MS: u64 = 800;
pub const DEFAULT_EMBED_TIMEOUT_MS: u64 = 300;

// --- Routing ---
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.6;
pub const DEFAULT_COMPLEXITY_HIGH: f64 = 0.7;
pub const DEFAULT_COMPLEXITY_MEDIUM: f64 = 0.4;
pub const DEFAULT_MIN_COVERAGE: f64 = 0.5;
pub const DEFAULT_MIN_EVIDENCE: f64 = 0.5;
pub const DEFAULT_DOWNGRADE_MIN_ELAPSED_MS: u64 = 2_000;

// --- Validation ---
pub const DEFAULT_GROUNDING_THRESHOLD: f64 = 0.70;
pub const DEFAULT_MIN_CITATION_CHARS: usize = 20;
pub const DEFAULT_MAX_INVALID_CITATION_RATIO: f64 = 0.30;
pub const DEFAULT_MAX_NGRAM: usize = 3;
pub const DEFAULT_CITATION_PREFIX_CHARS: usize = 50;

// --- Cache ---
pub const DEFAULT_CACHE_ENABLED: bool = true;
pub const DEFAULT_SEMANTIC_ENABLED: bool = true;
pub const DEFAULT_SEMANTIC_THRESHOLD: f64 = 0.92;
pub const DEFAULT_SEMANTIC_INDEX_CAPACITY: usize = 256;
pub const DEFAULT_MIN_CHUNKS_FOR_WRITE: usize = 8;
pub const DEFAULT_MIN_GROUNDING_FOR_WRITE: f64 = 0.60;
pub const DEFAULT_TTL_L1_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_TTL_L2_SECS: u64 = 21_600; // 6 hours
pub const DEFAULT_TTL_L3_SECS: u64 = 86_400; // 24 hours
pub const DEFAULT_NEGATIVE_TTL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_MEMORY_CACHE_ENTRIES: u64 = 100_000;

// --- Pipeline ---
pub const DEFAULT_MAX_RETRIES: usize = 2;
pub const DEFAULT_REQUEST_DEADLINE_MS: u64 = 20_000;
pub const DEFAULT_GENERATION_TIMEOUT_L1_MS: u64 = 4_000;
pub const DEFAULT_GENERATION_TIMEOUT_L2_MS: u64 = 6_000;
pub const DEFAULT_GENERATION_TIMEOUT_L3_MS: u64 = 9_000;

// --- Privacy ---
pub const DEFAULT_AUDIT_LOG: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
