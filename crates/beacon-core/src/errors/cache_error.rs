/// Cache backend errors. Always non-fatal to a request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("cache entry could not be (de)serialized: {reason}")]
    Serialization { reason: String },
}
