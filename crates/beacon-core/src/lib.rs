//! # beacon-core
//!
//! Foundation crate for the Beacon benefits answer engine.
//! Defines the request-scoped models, the traits for every external
//! collaborator (search, embeddings, generation, cache), errors, config,
//! and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::BeaconConfig;
pub use errors::{BeaconError, BeaconResult};
pub use models::{Chunk, Citation, Intent, QueryProfile, RetrievalResult, Tier};
