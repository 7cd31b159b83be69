//! Span definitions per pipeline stage.
//!
//! Every span carries the request id so a single answer can be followed
//! through the JSON log.

/// Create the top-level span for one `answer` call.
#[macro_export]
macro_rules! pipeline_span {
    ($request_id:expr, $company_id:expr) => {
        tracing::info_span!(
            "beacon.pipeline",
            request_id = %$request_id,
            company_id = %$company_id
        )
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($request_id:expr, $company_id:expr) => {
        tracing::info_span!(
            "beacon.retrieval",
            request_id = %$request_id,
            company_id = %$company_id
        )
    };
}

/// Create a generation span for one attempt.
#[macro_export]
macro_rules! generation_span {
    ($request_id:expr, $tier:expr, $attempt:expr) => {
        tracing::info_span!(
            "beacon.generation",
            request_id = %$request_id,
            tier = %$tier,
            attempt = $attempt
        )
    };
}

/// Create a validation span.
#[macro_export]
macro_rules! validation_span {
    ($request_id:expr, $tier:expr) => {
        tracing::info_span!("beacon.validation", request_id = %$request_id, tier = %$tier)
    };
}

/// Create a cache span.
#[macro_export]
macro_rules! cache_span {
    ($request_id:expr, $op:expr) => {
        tracing::debug_span!("beacon.cache", request_id = %$request_id, op = %$op)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "beacon.pipeline";
    pub const RETRIEVAL: &str = "beacon.retrieval";
    pub const GENERATION: &str = "beacon.generation";
    pub const VALIDATION: &str = "beacon.validation";
    pub const CACHE: &str = "beacon.cache";
}
