//! Concurrent vector + lexical search under one shared deadline.

pub mod rrf_fusion;

use std::time::Duration;

use beacon_core::config::RetrievalConfig;
use beacon_core::errors::RetrievalError;
use beacon_core::models::{Chunk, TenantFilter};
use beacon_core::traits::SearchProvider;
use beacon_observability::events;
use tokio::time::{timeout_at, Instant};

/// Raw outcome of both searches, before any fallback decision.
#[derive(Debug)]
pub struct SearchLists {
    /// `None` when no query embedding was available.
    pub vector: Option<Result<Vec<Chunk>, RetrievalError>>,
    pub lexical: Result<Vec<Chunk>, RetrievalError>,
    pub vector_ms: u64,
    pub lexical_ms: u64,
}

/// Run both searches concurrently. Each is bounded by the same deadline,
/// `config.deadline_ms` from now; an expired search yields
/// `RetrievalError::Timeout` without affecting the other.
pub async fn search_both<S: SearchProvider>(
    search: &S,
    query: &str,
    embedding: Option<&[f32]>,
    tenant: &TenantFilter,
    config: &RetrievalConfig,
) -> SearchLists {
    let deadline = Instant::now() + Duration::from_millis(config.deadline_ms);

    let vector = async {
        let embedding = embedding?;
        let started = Instant::now();
        let result = match timeout_at(
            deadline,
            search.vector_search(query, embedding, config.vector_k, tenant),
        )
        .await
        {
            Ok(r) => r,
            Err(_) => Err(RetrievalError::Timeout {
                index: "vector".to_string(),
                elapsed_ms: elapsed_ms(started),
            }),
        };
        Some((result, elapsed_ms(started)))
    };

    let lexical = async {
        let started = Instant::now();
        let result = match timeout_at(deadline, search.lexical_search(query, config.bm25_k, tenant))
            .await
        {
            Ok(r) => r,
            Err(_) => Err(RetrievalError::Timeout {
                index: "lexical".to_string(),
                elapsed_ms: elapsed_ms(started),
            }),
        };
        (result, elapsed_ms(started))
    };

    let (vector, (lexical, lexical_ms)) = tokio::join!(vector, lexical);
    let (vector, vector_ms) = match vector {
        Some((r, ms)) => (Some(empty_as_ok(r)), ms),
        None => (None, 0),
    };

    SearchLists {
        vector,
        lexical: empty_as_ok(lexical),
        vector_ms,
        lexical_ms,
    }
}

/// An index answering "nothing found" is a successful empty list here;
/// emptiness is decided after fusion.
fn empty_as_ok(result: Result<Vec<Chunk>, RetrievalError>) -> Result<Vec<Chunk>, RetrievalError> {
    match result {
        Err(RetrievalError::Empty) => Ok(Vec::new()),
        other => other,
    }
}

/// Drop every chunk that belongs to another tenant, logging each one.
pub fn enforce_tenant(chunks: Vec<Chunk>, tenant: &TenantFilter) -> Vec<Chunk> {
    chunks
        .into_iter()
        .filter(|c| {
            let allowed = tenant.allows(c);
            if !allowed {
                events::tenant_violation(&tenant.company_id, &c.id, &c.company_id);
            }
            allowed
        })
        .collect()
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
