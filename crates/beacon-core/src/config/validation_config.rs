use serde::{Deserialize, Serialize};

use super::defaults;

/// Output validator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum grounding score to pass.
    pub grounding_threshold: f64,
    /// Cited text shorter than this is rejected.
    pub min_citation_chars: usize,
    /// Invalid citation share above which escalation is required.
    pub max_invalid_citation_ratio: f64,
    /// Longest n-gram used for grounding.
    pub max_ngram: usize,
    /// Prefix length used to detect duplicate citations.
    pub citation_prefix_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            grounding_threshold: defaults::DEFAULT_GROUNDING_THRESHOLD,
            min_citation_chars: defaults::DEFAULT_MIN_CITATION_CHARS,
            max_invalid_citation_ratio: defaults::DEFAULT_MAX_INVALID_CITATION_RATIO,
            max_ngram: defaults::DEFAULT_MAX_NGRAM,
            citation_prefix_chars: defaults::DEFAULT_CITATION_PREFIX_CHARS,
        }
    }
}
