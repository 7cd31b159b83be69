use std::future::Future;

use crate::errors::RetrievalError;
use crate::models::{Chunk, TenantFilter};

/// Vector + lexical search over tenant documents.
///
/// Both methods must enforce `tenant`. The retriever filters again
/// regardless, so a leaking index can never reach a response.
pub trait SearchProvider: Send + Sync {
    /// Top-`k` chunks by embedding similarity, best first.
    fn vector_search(
        &self,
        query: &str,
        embedding: &[f32],
        k: usize,
        tenant: &TenantFilter,
    ) -> impl Future<Output = Result<Vec<Chunk>, RetrievalError>> + Send;

    /// Top-`k` chunks by lexical (BM25) relevance, best first.
    fn lexical_search(
        &self,
        query: &str,
        k: usize,
        tenant: &TenantFilter,
    ) -> impl Future<Output = Result<Vec<Chunk>, RetrievalError>> + Send;
}
