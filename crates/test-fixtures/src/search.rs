use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use beacon_core::errors::RetrievalError;
use beacon_core::models::{Chunk, TenantFilter};
use beacon_core::traits::SearchProvider;

use crate::embedder::HashEmbedder;

/// In-memory search over a fixed chunk list.
///
/// Vector search ranks by cosine of [`HashEmbedder`] vectors; lexical search
/// ranks by the number of distinct query tokens found in the chunk. Both
/// return chunks best first with ties kept in corpus order.
#[derive(Debug, Default)]
pub struct InMemorySearch {
    chunks: Vec<Chunk>,
    vector_unavailable: AtomicBool,
    lexical_unavailable: AtomicBool,
    ignore_tenant: AtomicBool,
    vector_delay: Option<Duration>,
    lexical_delay: Option<Duration>,
    vector_calls: AtomicUsize,
    lexical_calls: AtomicUsize,
}

impl InMemorySearch {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks,
            ..Self::default()
        }
    }

    /// Search over the whole golden corpus.
    pub fn golden() -> Self {
        Self::new(crate::benefits_corpus())
    }

    pub fn with_vector_delay(mut self, delay: Duration) -> Self {
        self.vector_delay = Some(delay);
        self
    }

    pub fn with_lexical_delay(mut self, delay: Duration) -> Self {
        self.lexical_delay = Some(delay);
        self
    }

    pub fn set_vector_unavailable(&self, down: bool) {
        self.vector_unavailable.store(down, Ordering::SeqCst);
    }

    pub fn set_lexical_unavailable(&self, down: bool) {
        self.lexical_unavailable.store(down, Ordering::SeqCst);
    }

    /// Simulate a misconfigured index that ignores the tenant filter.
    pub fn set_ignore_tenant(&self, leaky: bool) {
        self.ignore_tenant.store(leaky, Ordering::SeqCst);
    }

    pub fn vector_calls(&self) -> usize {
        self.vector_calls.load(Ordering::SeqCst)
    }

    pub fn lexical_calls(&self) -> usize {
        self.lexical_calls.load(Ordering::SeqCst)
    }

    fn visible<'a>(&'a self, tenant: &'a TenantFilter) -> impl Iterator<Item = &'a Chunk> + 'a {
        let leaky = self.ignore_tenant.load(Ordering::SeqCst);
        self.chunks.iter().filter(move |c| leaky || tenant.allows(c))
    }

    fn top_k(mut scored: Vec<(f64, &Chunk)>, k: usize) -> Vec<Chunk> {
        scored.retain(|(s, _)| *s > 0.0);
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(k)
            .map(|(score, c)| c.rescored(score))
            .collect()
    }
}

fn tokens(text: &str) -> Vec<String> {
    let mut out: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

impl SearchProvider for InMemorySearch {
    async fn vector_search(
        &self,
        _query: &str,
        embedding: &[f32],
        k: usize,
        tenant: &TenantFilter,
    ) -> Result<Vec<Chunk>, RetrievalError> {
        self.vector_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.vector_delay {
            tokio::time::sleep(delay).await;
        }
        if self.vector_unavailable.load(Ordering::SeqCst) {
            return Err(RetrievalError::Unavailable {
                index: "vector".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        let scored = self
            .visible(tenant)
            .map(|c| {
                let v = HashEmbedder::embed_text(&c.content);
                let sim: f32 = v.iter().zip(embedding).map(|(a, b)| a * b).sum();
                (f64::from(sim), c)
            })
            .collect();
        Ok(Self::top_k(scored, k))
    }

    async fn lexical_search(
        &self,
        query: &str,
        k: usize,
        tenant: &TenantFilter,
    ) -> Result<Vec<Chunk>, RetrievalError> {
        self.lexical_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.lexical_delay {
            tokio::time::sleep(delay).await;
        }
        if self.lexical_unavailable.load(Ordering::SeqCst) {
            return Err(RetrievalError::Unavailable {
                index: "lexical".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        let query_tokens = tokens(query);
        let scored = self
            .visible(tenant)
            .map(|c| {
                let content = tokens(&c.content);
                let hits = query_tokens
                    .iter()
                    .filter(|t| content.binary_search(t).is_ok())
                    .count();
                (hits as f64, c)
            })
            .collect();
        Ok(Self::top_k(scored, k))
    }
}
