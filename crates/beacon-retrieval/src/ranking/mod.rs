//! Post-fusion ranking: optional rerank, then (doc, position) dedup.

pub mod deduplication;
pub mod reranker;
