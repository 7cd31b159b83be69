//! Interfaces to the external collaborators the core consumes.
//!
//! All calls are async and return `Send` futures so a request pipeline can be
//! spawned on a multi-threaded runtime. Implementors may use `async fn`.

mod cache;
mod embedding;
mod generation;
mod search;

pub use cache::CacheBackend;
pub use embedding::EmbeddingProvider;
pub use generation::GenerationProvider;
pub use search::SearchProvider;
