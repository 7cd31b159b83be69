/// Beacon system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Share of invalid citations above which a response must be escalated.
pub const MAX_INVALID_CITATION_RATIO: f64 = 0.30;

/// Reciprocal Rank Fusion smoothing constant.
pub const RRF_K: u32 = 60;

/// Separator mixed into cache keys between the query and the tenant.
pub const CACHE_KEY_SEPARATOR: u8 = 0x1f;

/// Tracing target for the PII audit trail.
pub const AUDIT_TARGET: &str = "beacon::audit";
