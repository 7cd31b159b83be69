//! The PII pattern table.

use std::sync::LazyLock;

use beacon_core::models::{PiiCategory, PiiFinding};
use regex::Regex;

/// A compiled PII detection pattern.
pub struct PiiPattern {
    pub name: &'static str,
    pub category: PiiCategory,
    pub regex: &'static LazyLock<Option<Regex>>,
}

macro_rules! pii_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

pii_pattern!(RE_SSN, r"\b\d{3}-\d{2}-\d{4}\b");

pii_pattern!(
    RE_EMAIL,
    r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
);

// US formats, optional +1 prefix. The parenthesised area code cannot use a
// leading `\b`, so it gets its own branch.
pii_pattern!(
    RE_PHONE,
    r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)\s?|\b\d{3}[-.\s]?)\d{3}[-.\s]?\d{4}\b"
);

pii_pattern!(
    RE_CREDIT_CARD,
    r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6(?:011|5\d{2}))[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{3,4}\b"
);

// A bare date is far more likely an enrollment or claim date, so a DOB
// needs an explicit cue in front of it.
pii_pattern!(
    RE_DOB,
    r"(?i)\b(?:dob|date of birth|birth ?date|born(?: on)?)(?:\s+is)?\s*[:\-]?\s*\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}\b"
);

pii_pattern!(
    RE_MRN,
    r"(?i)\b(?:mrn|medical record(?: number| no\.?)?)\s*[:#]?\s*\d{6,10}\b"
);

pii_pattern!(
    RE_PERSON_NAME,
    r"\b(?:Mr|Mrs|Ms|Dr|Miss)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?\b"
);

/// All PII patterns, most specific first.
pub fn all_patterns() -> [PiiPattern; 7] {
    [
        PiiPattern {
            name: "ssn",
            category: PiiCategory::Ssn,
            regex: &RE_SSN,
        },
        PiiPattern {
            name: "email",
            category: PiiCategory::Email,
            regex: &RE_EMAIL,
        },
        PiiPattern {
            name: "credit_card",
            category: PiiCategory::CreditCard,
            regex: &RE_CREDIT_CARD,
        },
        PiiPattern {
            name: "mrn",
            category: PiiCategory::MedicalRecordNumber,
            regex: &RE_MRN,
        },
        PiiPattern {
            name: "dob",
            category: PiiCategory::DateOfBirth,
            regex: &RE_DOB,
        },
        PiiPattern {
            name: "phone",
            category: PiiCategory::Phone,
            regex: &RE_PHONE,
        },
        PiiPattern {
            name: "person_name",
            category: PiiCategory::PersonName,
            regex: &RE_PERSON_NAME,
        },
    ]
}

/// Names of patterns whose regex failed to compile. Those patterns simply
/// never match.
pub fn failed_patterns() -> Vec<&'static str> {
    all_patterns()
        .into_iter()
        .filter(|p| p.regex.is_none())
        .map(|p| p.name)
        .collect()
}

/// Run every pattern and return non-overlapping findings sorted by start.
pub fn scan_all(text: &str) -> Vec<PiiFinding> {
    let mut matches = Vec::new();
    for pat in all_patterns() {
        let Some(re) = pat.regex.as_ref() else { continue };
        for m in re.find_iter(text) {
            matches.push(PiiFinding {
                category: pat.category,
                start: m.start(),
                end: m.end(),
            });
        }
    }
    resolve_overlaps(matches)
}

/// Keep the longest match wherever matches overlap. Equal lengths keep the
/// earlier pattern in table order, then the earlier start.
fn resolve_overlaps(mut matches: Vec<PiiFinding>) -> Vec<PiiFinding> {
    // Stable sort: table order survives among equal lengths.
    matches.sort_by(|a, b| (b.end - b.start).cmp(&(a.end - a.start)));

    let mut kept: Vec<PiiFinding> = Vec::with_capacity(matches.len());
    for m in matches {
        if kept.iter().all(|k| m.end <= k.start || m.start >= k.end) {
            kept.push(m);
        }
    }
    kept.sort_by_key(|f| f.start);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(text: &str) -> Vec<PiiCategory> {
        scan_all(text).into_iter().map(|f| f.category).collect()
    }

    #[test]
    fn all_patterns_compile() {
        assert!(failed_patterns().is_empty());
    }

    #[test]
    fn ssn_is_not_a_phone_number() {
        assert_eq!(categories("ssn 123-45-6789"), vec![PiiCategory::Ssn]);
    }

    #[test]
    fn card_wins_over_embedded_digit_runs() {
        let found = scan_all("card 4111-1111-1111-1111 on file");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, PiiCategory::CreditCard);
    }

    #[test]
    fn dates_without_a_cue_are_not_dob() {
        assert!(categories("coverage starts 01/01/2025").is_empty());
        assert_eq!(
            categories("DOB: 3/14/1985"),
            vec![PiiCategory::DateOfBirth]
        );
    }

    #[test]
    fn findings_are_sorted_and_disjoint() {
        let found = scan_all("Ms. Ann Lee, ann@x.org, 555-867-5309, SSN 111-22-3333");
        assert_eq!(found.len(), 4);
        for pair in found.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn masks_match_no_pattern() {
        for pat in all_patterns() {
            let Some(re) = pat.regex.as_ref() else { continue };
            for other in all_patterns() {
                assert!(
                    !re.is_match(other.category.mask()),
                    "{} matches mask {}",
                    pat.name,
                    other.category.mask()
                );
            }
        }
    }
}
