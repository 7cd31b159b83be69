use beacon_core::config::PrivacyConfig;
use beacon_core::models::{PiiFinding, PiiReport};
use beacon_observability::events;

use crate::patterns;

/// Detects and masks PII in generated text.
///
/// Stateless apart from config; cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: PrivacyConfig,
}

impl PiiRedactor {
    pub fn new(config: PrivacyConfig) -> Self {
        for name in patterns::failed_patterns() {
            events::degradation_triggered("privacy", name, "pattern skipped");
        }
        Self { config }
    }

    /// Non-overlapping PII findings, sorted by start.
    pub fn detect(&self, text: &str) -> Vec<PiiFinding> {
        patterns::scan_all(text)
    }

    /// Text with every finding replaced by its category mask.
    pub fn redact(&self, text: &str) -> String {
        apply_replacements(text, &self.detect(text))
    }

    /// Detect and redact, emitting the redaction event and (when enabled)
    /// the audit record. The returned report never holds the raw text.
    pub fn scan(&self, text: &str) -> PiiReport {
        let findings = self.detect(text);
        if findings.is_empty() {
            return PiiReport {
                detected: false,
                findings,
                redacted_text: text.to_string(),
            };
        }

        let redacted_text = apply_replacements(text, &findings);
        let report = PiiReport {
            detected: true,
            findings,
            redacted_text,
        };

        let categories = report.categories();
        events::pii_redacted(&categories, report.findings.len());
        if self.config.audit_log {
            events::pii_audit(&categories, text);
        }
        report
    }
}

/// Replace findings with their masks. Findings must be disjoint; they are
/// applied from the end so earlier offsets stay valid.
fn apply_replacements(text: &str, findings: &[PiiFinding]) -> String {
    let mut sorted: Vec<&PiiFinding> = findings.iter().collect();
    sorted.sort_by(|a, b| b.start.cmp(&a.start));

    let mut result = text.to_string();
    for f in sorted {
        if f.end <= result.len() {
            result.replace_range(f.start..f.end, f.category.mask());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::models::PiiCategory;

    #[test]
    fn scenario_ssn_is_masked() {
        let redactor = PiiRedactor::default();
        let report = redactor.scan("Your SSN 123-45-6789 is on file.");
        assert!(report.detected);
        assert_eq!(report.categories(), vec![PiiCategory::Ssn]);
        assert_eq!(report.redacted_text, "Your SSN [SSN REDACTED] is on file.");
    }

    #[test]
    fn clean_text_is_untouched() {
        let report = PiiRedactor::default().scan("The PPO pays 80% after the deductible.");
        assert!(!report.detected);
        assert_eq!(report.redacted_text, "The PPO pays 80% after the deductible.");
    }

    #[test]
    fn audit_off_still_masks() {
        let redactor = PiiRedactor::new(PrivacyConfig { audit_log: false });
        let report = redactor.scan("email me at a@b.io");
        assert!(report.detected);
        assert_eq!(report.redacted_text, "email me at [EMAIL REDACTED]");
    }

    #[test]
    fn multibyte_text_around_matches_survives() {
        let out = PiiRedactor::default().redact("café — 123-45-6789 — naïve");
        assert_eq!(out, "café — [SSN REDACTED] — naïve");
    }
}
