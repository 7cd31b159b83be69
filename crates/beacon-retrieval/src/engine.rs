//! HybridRetriever: orchestrates embed → search ∥ search → fuse → rerank →
//! dedup → coverage for one request.

use std::collections::BTreeMap;
use std::time::Duration;

use beacon_core::config::RetrievalConfig;
use beacon_core::errors::{EmbeddingError, RetrievalError};
use beacon_core::models::{
    Chunk, RetrievalContext, RetrievalLatency, RetrievalMethod, RetrievalResult,
};
use beacon_core::traits::{EmbeddingProvider, SearchProvider};
use beacon_observability::events;
use tokio::time::Instant;
use tracing::{debug, info, Instrument};

use crate::coverage::{coverage, query_terms};
use crate::ranking::{deduplication, reranker};
use crate::search::{self, elapsed_ms, enforce_tenant, rrf_fusion};

/// Hybrid retriever borrowing the request's collaborators.
pub struct HybridRetriever<'a, S, E> {
    search: &'a S,
    embedder: &'a E,
    config: &'a RetrievalConfig,
}

impl<'a, S: SearchProvider, E: EmbeddingProvider> HybridRetriever<'a, S, E> {
    pub fn new(search: &'a S, embedder: &'a E, config: &'a RetrievalConfig) -> Self {
        Self {
            search,
            embedder,
            config,
        }
    }

    /// Embed the query under `embed_timeout_ms`.
    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>, EmbeddingError> {
        let budget = Duration::from_millis(self.config.embed_timeout_ms);
        match tokio::time::timeout(budget, self.embedder.embed(query)).await {
            Ok(result) => result,
            Err(_) => Err(EmbeddingError::Timeout {
                elapsed_ms: self.config.embed_timeout_ms,
            }),
        }
    }

    /// Embed the query, then retrieve. An embedding failure degrades to
    /// lexical-only retrieval instead of failing.
    pub async fn retrieve(
        &self,
        query: &str,
        ctx: &RetrievalContext,
    ) -> Result<RetrievalResult, RetrievalError> {
        let started = Instant::now();
        let embedding = match self.embed_query(query).await {
            Ok(v) => Some(v),
            Err(e) => {
                events::degradation_triggered(self.embedder.name(), &e.to_string(), "lexical_only");
                None
            }
        };
        let embed_ms = elapsed_ms(started);

        let mut result = self
            .retrieve_with_embedding(query, embedding.as_deref(), ctx)
            .await?;
        result.latency.embed_ms = embed_ms;
        result.latency.total_ms = elapsed_ms(started);
        Ok(result)
    }

    /// Retrieve with a precomputed embedding. `None` runs lexical-only.
    pub async fn retrieve_with_embedding(
        &self,
        query: &str,
        embedding: Option<&[f32]>,
        ctx: &RetrievalContext,
    ) -> Result<RetrievalResult, RetrievalError> {
        let span = beacon_observability::retrieval_span!(ctx.request_id, ctx.company_id);
        self.run(query, embedding, ctx).instrument(span).await
    }

    async fn run(
        &self,
        query: &str,
        embedding: Option<&[f32]>,
        ctx: &RetrievalContext,
    ) -> Result<RetrievalResult, RetrievalError> {
        let started = Instant::now();
        let tenant = ctx.tenant();

        let lists = search::search_both(self.search, query, embedding, &tenant, self.config).await;
        let (vector, lexical, method) = choose_method(lists.vector, lists.lexical)?;
        let vector = enforce_tenant(vector, &tenant);
        let lexical = enforce_tenant(lexical, &tenant);

        let fusion_started = Instant::now();
        let mut fused = rrf_fusion::fuse(&vector, &lexical, self.config.rrf_k);
        let total_candidates = fused.len();
        fused.truncate(self.config.final_top_k);
        let fusion_ms = elapsed_ms(fusion_started);

        let terms = query_terms(query);
        let rerank_started = Instant::now();
        let ranked = if self.config.enable_reranking {
            reranker::rerank(&terms, fused, self.config.reranked_top_k)
        } else {
            fused
        };
        let ranked = deduplication::deduplicate(ranked);
        let rerank_ms = elapsed_ms(rerank_started);

        if ranked.is_empty() {
            debug!(company_id = %ctx.company_id, "no chunks survived retrieval");
            return Err(RetrievalError::Empty);
        }

        let mut scores = BTreeMap::new();
        let chunks: Vec<Chunk> = ranked
            .into_iter()
            .map(|c| {
                scores.insert(c.chunk.id.clone(), c.scores);
                c.chunk.rescored(c.score)
            })
            .collect();
        let coverage = coverage(&terms, &chunks);

        info!(
            chunks = chunks.len(),
            total_candidates,
            method = ?method,
            coverage,
            "retrieval complete"
        );

        Ok(RetrievalResult {
            chunks,
            method,
            total_candidates,
            latency: RetrievalLatency {
                embed_ms: 0,
                vector_ms: lists.vector_ms,
                lexical_ms: lists.lexical_ms,
                fusion_ms,
                rerank_ms,
                total_ms: elapsed_ms(started),
            },
            scores,
            coverage,
        })
    }
}

type Lists = (Vec<Chunk>, Vec<Chunk>, RetrievalMethod);

/// Decide which lists to fuse. One failing index degrades to the other;
/// both failing (or lexical failing without an embedding) is Unavailable.
fn choose_method(
    vector: Option<Result<Vec<Chunk>, RetrievalError>>,
    lexical: Result<Vec<Chunk>, RetrievalError>,
) -> Result<Lists, RetrievalError> {
    match (vector, lexical) {
        (Some(Ok(v)), Ok(l)) => Ok((v, l, RetrievalMethod::Hybrid)),
        (Some(Ok(v)), Err(e)) => {
            events::degradation_triggered("lexical_index", &e.to_string(), "vector_only");
            Ok((v, Vec::new(), RetrievalMethod::VectorOnly))
        }
        (Some(Err(e)), Ok(l)) => {
            events::degradation_triggered("vector_index", &e.to_string(), "lexical_only");
            Ok((Vec::new(), l, RetrievalMethod::LexicalOnly))
        }
        (None, Ok(l)) => Ok((Vec::new(), l, RetrievalMethod::LexicalOnly)),
        (Some(Err(ve)), Err(le)) => Err(RetrievalError::Unavailable {
            index: "vector+lexical".to_string(),
            reason: format!("{ve}; {le}"),
        }),
        (None, Err(le)) => Err(RetrievalError::Unavailable {
            index: "lexical".to_string(),
            reason: le.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::chunk;

    fn unavailable(index: &str) -> RetrievalError {
        RetrievalError::Unavailable {
            index: index.to_string(),
            reason: "down".to_string(),
        }
    }

    #[test]
    fn one_failing_index_degrades() {
        let c = vec![chunk("a", "d", "acme", 0, "x")];
        let (_, _, m) = choose_method(Some(Err(unavailable("vector"))), Ok(c.clone())).unwrap();
        assert_eq!(m, RetrievalMethod::LexicalOnly);
        let (_, _, m) = choose_method(Some(Ok(c)), Err(unavailable("lexical"))).unwrap();
        assert_eq!(m, RetrievalMethod::VectorOnly);
    }

    #[test]
    fn both_failing_is_unavailable_not_empty() {
        let err = choose_method(
            Some(Err(RetrievalError::Timeout {
                index: "vector".to_string(),
                elapsed_ms: 800,
            })),
            Err(unavailable("lexical")),
        )
        .unwrap_err();
        assert!(err.is_unavailable());
        assert_ne!(err, RetrievalError::Empty);
    }

    #[test]
    fn lexical_failure_without_embedding_is_unavailable() {
        let err = choose_method(None, Err(unavailable("lexical"))).unwrap_err();
        assert!(matches!(err, RetrievalError::Unavailable { .. }));
    }
}
