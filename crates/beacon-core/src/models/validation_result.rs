use serde::{Deserialize, Serialize};

use super::{Citation, GroundingMetrics, PiiReport};

/// Why a citation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationRejection {
    /// The chunk id is not among the retrieved chunks.
    UnknownChunk,
    /// The citation has no quoted text.
    MissingText,
    /// The quoted text is shorter than the minimum.
    TextTooShort { chars: usize, min: usize },
    /// The quoted text does not occur in the referenced chunk.
    NotInChunk,
    /// Same chunk and text prefix as an earlier citation.
    Duplicate { first_index: usize },
}

/// Verdict for one citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationCheck {
    pub index: usize,
    pub chunk_id: String,
    pub valid: bool,
    pub rejection: Option<CitationRejection>,
}

/// Full output validation verdict for one generated response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub grounding: GroundingMetrics,
    pub citations: Vec<CitationCheck>,
    pub invalid_citation_ratio: f64,
    pub pii: PiiReport,
    /// Grounding failed or too many citations were invalid.
    pub requires_escalation: bool,
    /// Escalation was required but the response is already at the top tier.
    pub escalation_suppressed: bool,
    /// No grounding or citation errors. PII never affects this.
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// True when no citation was rejected.
    pub fn citations_valid(&self) -> bool {
        self.citations.iter().all(|c| c.valid)
    }

    /// Whether the pipeline should actually re-route this response.
    pub fn should_reroute(&self) -> bool {
        self.requires_escalation && !self.escalation_suppressed
    }
}
