//! # beacon-cache
//!
//! Answer cache in front of retrieval and generation.
//!
//! - **L0 exact**: keyed by the normalized query and tenant.
//! - **L1 semantic**: a bounded per-tenant list of recent query embeddings,
//!   matched by cosine similarity and resolved to an L0 key.
//!
//! The cache never fails a request. An unreachable backend degrades to a
//! miss or a skipped write and is reported through the returned status.

pub mod keys;
pub mod layer;
pub mod memory;
pub mod policy;
pub mod semantic;

pub use layer::{AnswerCache, CacheLookup, CacheWrite};
pub use memory::MemoryCacheBackend;
pub use policy::should_cache;
