//! # beacon-retrieval
//!
//! Hybrid retrieval over a tenant's corpus: query embedding, concurrent
//! vector + lexical search under one deadline, Reciprocal Rank Fusion,
//! optional re-ranking, (doc, position) deduplication, and the coverage and
//! evidence heuristics the router consumes.

pub mod coverage;
pub mod engine;
pub mod ranking;
pub mod search;

pub use engine::HybridRetriever;
