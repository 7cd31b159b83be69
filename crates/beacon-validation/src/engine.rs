//! OutputValidator: runs grounding, citation, and PII checks over one
//! generated response and folds them into a `ValidationResult`.

use beacon_core::config::ValidationConfig;
use beacon_core::errors::ValidationError;
use beacon_core::models::{Chunk, Citation, Tier, ValidationResult};
use beacon_privacy::PiiRedactor;
use tracing::{debug, error};

use crate::dimensions::{citation, grounding};

/// Validates generated answers against their evidence.
#[derive(Debug, Clone, Default)]
pub struct OutputValidator {
    config: ValidationConfig,
    redactor: PiiRedactor,
}

impl OutputValidator {
    pub fn new(config: ValidationConfig, redactor: PiiRedactor) -> Self {
        Self { config, redactor }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate `text` and its `citations` against `chunks`.
    ///
    /// Bad model output is never an error; it shows up in the result. An
    /// error means the chunks themselves are malformed.
    pub fn validate_response(
        &self,
        text: &str,
        citations: &[Citation],
        chunks: &[Chunk],
        current_tier: Tier,
    ) -> Result<ValidationResult, ValidationError> {
        check_chunks(chunks)?;

        let grounding = grounding::compute_grounding_score(text, chunks, &self.config);
        let report = citation::validate_citations(citations, chunks, &self.config);
        let pii = self.redactor.scan(text);

        let mut errors = Vec::new();
        if !grounding.passed {
            errors.push(format!(
                "grounding score {:.2} below threshold {:.2}",
                grounding.score, grounding.threshold
            ));
        }
        for check in &report.checks {
            if let Some(rejection) = &check.rejection {
                errors.push(format!(
                    "citation {} ({}) rejected: {rejection:?}",
                    check.index, check.chunk_id
                ));
            }
        }

        let requires_escalation = !grounding.passed
            || report.invalid_ratio > self.config.max_invalid_citation_ratio;
        let escalation_suppressed = requires_escalation && current_tier.is_max();

        debug!(
            tier = %current_tier,
            grounding = grounding.score,
            invalid_citation_ratio = report.invalid_ratio,
            pii_detected = pii.detected,
            requires_escalation,
            escalation_suppressed,
            "response validated"
        );

        Ok(ValidationResult {
            grounding,
            citations: report.checks,
            invalid_citation_ratio: report.invalid_ratio,
            pii,
            requires_escalation,
            escalation_suppressed,
            is_valid: errors.is_empty(),
            errors,
        })
    }
}

fn check_chunks(chunks: &[Chunk]) -> Result<(), ValidationError> {
    for (i, chunk) in chunks.iter().enumerate() {
        let reason = if chunk.id.is_empty() {
            format!("chunk {i} has an empty id")
        } else if !chunk.relevance_score.is_finite() {
            format!("chunk {} has a non-finite relevance score", chunk.id)
        } else {
            continue;
        };
        error!(reason = %reason, "malformed evidence passed to validator");
        return Err(ValidationError::Internal { reason });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::chunk;

    fn evidence() -> Vec<Chunk> {
        vec![chunk(
            "c1",
            "d1",
            "acme",
            0,
            "The PPO plan has a $1,500 individual deductible and 80% coinsurance.",
        )]
    }

    fn cite(chunk_id: &str, text: &str) -> Citation {
        Citation {
            chunk_id: chunk_id.into(),
            doc_id: "d1".into(),
            title: "d1".into(),
            section: "d1".into(),
            relevance_score: 0.5,
            text: text.into(),
        }
    }

    #[test]
    fn grounded_answer_with_good_citation_is_valid() {
        let v = OutputValidator::default();
        let result = v
            .validate_response(
                "The PPO plan has a $1,500 individual deductible.",
                &[cite("c1", "a $1,500 individual deductible")],
                &evidence(),
                Tier::L1,
            )
            .unwrap();
        assert!(result.is_valid);
        assert!(!result.requires_escalation);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn ungrounded_answer_requires_escalation() {
        let v = OutputValidator::default();
        let result = v
            .validate_response("Orthodontia is free for everyone forever.", &[], &evidence(), Tier::L1)
            .unwrap();
        assert!(!result.is_valid);
        assert!(result.requires_escalation);
        assert!(result.should_reroute());
    }

    #[test]
    fn escalation_is_suppressed_at_l3() {
        let v = OutputValidator::default();
        let result = v
            .validate_response("Orthodontia is free for everyone forever.", &[], &evidence(), Tier::L3)
            .unwrap();
        assert!(result.requires_escalation);
        assert!(result.escalation_suppressed);
        assert!(!result.should_reroute());
    }

    #[test]
    fn too_many_bad_citations_require_escalation() {
        let v = OutputValidator::default();
        let result = v
            .validate_response(
                "The PPO plan has a $1,500 individual deductible.",
                &[
                    cite("c1", "a $1,500 individual deductible"),
                    cite("c9", "a $1,500 individual deductible"),
                ],
                &evidence(),
                Tier::L2,
            )
            .unwrap();
        assert!(result.grounding.passed);
        assert_eq!(result.invalid_citation_ratio, 0.5);
        assert!(result.requires_escalation);
        assert!(!result.is_valid);
    }

    #[test]
    fn pii_is_reported_but_never_invalidates() {
        let v = OutputValidator::default();
        let result = v
            .validate_response(
                "The PPO plan has a $1,500 individual deductible. SSN 123-45-6789.",
                &[],
                &evidence(),
                Tier::L1,
            )
            .unwrap();
        assert!(result.pii.detected);
        assert!(result.pii.redacted_text.contains("[SSN REDACTED]"));
        assert!(!result.pii.redacted_text.contains("123-45-6789"));
        assert!(result.errors.iter().all(|e| !e.contains("SSN")));
    }

    #[test]
    fn malformed_chunks_are_internal_errors() {
        let v = OutputValidator::default();
        let mut bad = evidence();
        bad[0].id.clear();
        assert!(matches!(
            v.validate_response("x", &[], &bad, Tier::L1),
            Err(ValidationError::Internal { .. })
        ));

        let mut nan = evidence();
        nan[0].relevance_score = f64::NAN;
        assert!(matches!(
            v.validate_response("x", &[], &nan, Tier::L1),
            Err(ValidationError::Internal { .. })
        ));
    }
}
