//! Citation checks. Each citation must point at a retrieved chunk and quote
//! text that actually occurs in it.

use std::collections::HashMap;

use beacon_core::config::ValidationConfig;
use beacon_core::models::{Chunk, Citation, CitationCheck, CitationRejection};

use super::token_text;

/// Per-citation verdicts plus the invalid share.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationReport {
    pub checks: Vec<CitationCheck>,
    /// Invalid citations over all citations; 0.0 when there are none.
    pub invalid_ratio: f64,
}

impl CitationReport {
    pub fn all_valid(&self) -> bool {
        self.checks.iter().all(|c| c.valid)
    }
}

/// Check every citation in order.
///
/// Rejections are tested in a fixed order: unknown chunk, missing text,
/// text too short, text not in chunk, duplicate. A duplicate has the same
/// chunk id and the same normalized text prefix as an earlier citation that
/// passed the other checks.
pub fn validate_citations(
    citations: &[Citation],
    chunks: &[Chunk],
    config: &ValidationConfig,
) -> CitationReport {
    let by_id: HashMap<&str, &Chunk> = chunks.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut chunk_text: HashMap<&str, String> = HashMap::new();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();

    let mut checks = Vec::with_capacity(citations.len());
    for (index, citation) in citations.iter().enumerate() {
        let rejection = check_one(citation, &by_id, &mut chunk_text, config).or_else(|| {
            let prefix: String = token_text(&citation.text)
                .chars()
                .take(config.citation_prefix_chars)
                .collect();
            match seen.get(&(citation.chunk_id.clone(), prefix.clone())) {
                Some(&first_index) => Some(CitationRejection::Duplicate { first_index }),
                None => {
                    seen.insert((citation.chunk_id.clone(), prefix), index);
                    None
                }
            }
        });
        checks.push(CitationCheck {
            index,
            chunk_id: citation.chunk_id.clone(),
            valid: rejection.is_none(),
            rejection,
        });
    }

    let invalid = checks.iter().filter(|c| !c.valid).count();
    let invalid_ratio = if checks.is_empty() {
        0.0
    } else {
        invalid as f64 / checks.len() as f64
    };
    CitationReport {
        checks,
        invalid_ratio,
    }
}

fn check_one<'c>(
    citation: &Citation,
    by_id: &HashMap<&str, &'c Chunk>,
    chunk_text: &mut HashMap<&'c str, String>,
    config: &ValidationConfig,
) -> Option<CitationRejection> {
    let Some(&chunk) = by_id.get(citation.chunk_id.as_str()) else {
        return Some(CitationRejection::UnknownChunk);
    };

    let quoted = citation.text.trim();
    if quoted.is_empty() {
        return Some(CitationRejection::MissingText);
    }
    let chars = quoted.chars().count();
    if chars < config.min_citation_chars {
        return Some(CitationRejection::TextTooShort {
            chars,
            min: config.min_citation_chars,
        });
    }

    let needle = token_text(quoted);
    let haystack = chunk_text
        .entry(chunk.id.as_str())
        .or_insert_with(|| token_text(&chunk.content));
    if needle.is_empty() || !haystack.contains(&needle) {
        return Some(CitationRejection::NotInChunk);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::chunk;

    fn cite(chunk_id: &str, text: &str) -> Citation {
        Citation {
            chunk_id: chunk_id.to_string(),
            doc_id: String::new(),
            title: String::new(),
            section: String::new(),
            relevance_score: 0.0,
            text: text.to_string(),
        }
    }

    fn chunks() -> Vec<Chunk> {
        vec![chunk(
            "c1",
            "d1",
            "acme",
            0,
            "Preventive dental cleanings are covered at 100% twice per plan year.",
        )]
    }

    fn rejection(citations: &[Citation]) -> Vec<Option<CitationRejection>> {
        validate_citations(citations, &chunks(), &ValidationConfig::default())
            .checks
            .into_iter()
            .map(|c| c.rejection)
            .collect()
    }

    #[test]
    fn accepts_a_quote_with_different_case_and_punctuation() {
        let report = validate_citations(
            &[cite("c1", "preventive DENTAL cleanings are covered")],
            &chunks(),
            &ValidationConfig::default(),
        );
        assert!(report.all_valid());
        assert_eq!(report.invalid_ratio, 0.0);
    }

    #[test]
    fn each_rejection_reason() {
        let got = rejection(&[
            cite("nope", "preventive dental cleanings are covered"),
            cite("c1", "   "),
            cite("c1", "covered"),
            cite("c1", "orthodontia is covered at fifty percent"),
        ]);
        assert_eq!(
            got,
            vec![
                Some(CitationRejection::UnknownChunk),
                Some(CitationRejection::MissingText),
                Some(CitationRejection::TextTooShort { chars: 7, min: 20 }),
                Some(CitationRejection::NotInChunk),
            ]
        );
    }

    #[test]
    fn repeated_quote_is_a_duplicate_of_the_first() {
        let got = rejection(&[
            cite("c1", "dental cleanings are covered at 100%"),
            cite("c1", "Dental cleanings are covered at 100% twice"),
            cite("c1", "dental cleanings are covered at 100%"),
        ]);
        assert_eq!(got[0], None);
        assert_eq!(got[1], None);
        assert_eq!(got[2], Some(CitationRejection::Duplicate { first_index: 0 }));
    }

    #[test]
    fn invalid_ratio_counts_every_rejection() {
        let report = validate_citations(
            &[
                cite("c1", "dental cleanings are covered at 100%"),
                cite("c1", "short"),
                cite("x", "dental cleanings are covered at 100%"),
                cite("c1", "twice per plan year is the limit"),
            ],
            &chunks(),
            &ValidationConfig::default(),
        );
        assert_eq!(report.invalid_ratio, 0.75);
        assert!(!report.all_valid());
    }

    #[test]
    fn no_citations_means_no_invalid_ones() {
        let report = validate_citations(&[], &chunks(), &ValidationConfig::default());
        assert_eq!(report.invalid_ratio, 0.0);
        assert!(report.all_valid());
    }
}
