//! Deterministic answers for paths that never reach a validated generation.

use beacon_core::models::{AnswerMetadata, AnswerResponse, Outcome, Tier, TokenUsage};

pub const NO_INFORMATION: &str = "I couldn't find any information about that in your \
company's benefits documents. Please contact your HR or benefits team for help.";

pub const RETRIEVAL_UNAVAILABLE: &str = "Benefits information is temporarily unavailable. \
Please try again in a few minutes.";

pub const GENERATION_FAILED: &str = "Sorry, I couldn't put together an answer to your \
question. Please try again, or contact your HR or benefits team.";

pub const DEADLINE_EXCEEDED: &str = "Sorry, this is taking longer than expected. \
Please try again shortly.";

/// Fixed text for a fallback outcome.
pub fn text_for(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::NoInformation => NO_INFORMATION,
        Outcome::RetrievalUnavailable => RETRIEVAL_UNAVAILABLE,
        Outcome::DeadlineExceeded => DEADLINE_EXCEEDED,
        _ => GENERATION_FAILED,
    }
}

/// A citation-free response reported at the top tier.
pub fn response(request_id: &str, outcome: Outcome) -> AnswerResponse {
    AnswerResponse {
        answer: text_for(outcome).to_string(),
        citations: Vec::new(),
        tier: Tier::L3,
        from_cache: false,
        usage: TokenUsage::default(),
        metadata: AnswerMetadata::new(request_id, outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_are_deterministic_and_uncited() {
        for outcome in [
            Outcome::NoInformation,
            Outcome::RetrievalUnavailable,
            Outcome::GenerationFailed,
            Outcome::DeadlineExceeded,
        ] {
            let a = response("r1", outcome);
            let b = response("r1", outcome);
            assert_eq!(a, b);
            assert!(a.citations.is_empty());
            assert_eq!(a.tier, Tier::L3);
            assert_eq!(a.metadata.outcome, outcome);
        }
    }

    #[test]
    fn outcomes_have_distinct_texts() {
        assert_ne!(text_for(Outcome::NoInformation), text_for(Outcome::RetrievalUnavailable));
        assert_ne!(text_for(Outcome::GenerationFailed), text_for(Outcome::DeadlineExceeded));
    }
}
