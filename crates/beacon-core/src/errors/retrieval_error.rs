/// Retrieval subsystem errors.
///
/// `Unavailable` (the index could not be reached) and `Empty` (the index
/// answered with nothing for this tenant) are different outcomes and are
/// never collapsed into each other.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetrievalError {
    #[error("search index unavailable: {index}: {reason}")]
    Unavailable { index: String, reason: String },

    #[error("no chunks matched the query")]
    Empty,

    #[error("search index {index} timed out after {elapsed_ms}ms")]
    Timeout { index: String, elapsed_ms: u64 },
}

impl RetrievalError {
    /// Whether the index itself failed, as opposed to returning no matches.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}
