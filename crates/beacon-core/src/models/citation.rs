use serde::{Deserialize, Serialize};

/// A reference from an answer back to a retrieved chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub chunk_id: String,
    pub doc_id: String,
    pub title: String,
    pub section: String,
    pub relevance_score: f64,
    /// The quoted span the answer relies on.
    pub text: String,
}
