use serde::{Deserialize, Serialize};

/// PII families the validator scans for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    Ssn,
    Email,
    Phone,
    CreditCard,
    DateOfBirth,
    MedicalRecordNumber,
    PersonName,
}

impl PiiCategory {
    /// Semantic mask substituted for a match. No mask matches any pattern.
    pub fn mask(self) -> &'static str {
        match self {
            PiiCategory::Ssn => "[SSN REDACTED]",
            PiiCategory::Email => "[EMAIL REDACTED]",
            PiiCategory::Phone => "[PHONE REDACTED]",
            PiiCategory::CreditCard => "[CARD REDACTED]",
            PiiCategory::DateOfBirth => "[DOB REDACTED]",
            PiiCategory::MedicalRecordNumber => "[MRN REDACTED]",
            PiiCategory::PersonName => "[NAME REDACTED]",
        }
    }
}

/// One PII match, as byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiFinding {
    pub category: PiiCategory,
    pub start: usize,
    pub end: usize,
}

/// Detection + redaction outcome. Never carries the unredacted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiReport {
    pub detected: bool,
    pub findings: Vec<PiiFinding>,
    pub redacted_text: String,
}

impl PiiReport {
    /// Distinct categories found, sorted.
    pub fn categories(&self) -> Vec<PiiCategory> {
        let mut cats: Vec<PiiCategory> = self.findings.iter().map(|f| f.category).collect();
        cats.sort_unstable();
        cats.dedup();
        cats
    }
}
