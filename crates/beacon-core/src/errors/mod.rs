mod beacon_error;
mod cache_error;
mod config_error;
mod embedding_error;
mod generation_error;
mod retrieval_error;
mod validation_error;

pub use beacon_error::{BeaconError, BeaconResult};
pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use retrieval_error::RetrievalError;
pub use validation_error::ValidationError;
