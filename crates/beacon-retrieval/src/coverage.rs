//! Term-overlap heuristics over retrieved content.
//!
//! Both are naive: a term counts if it occurs anywhere in the
//! lowercased content, word boundaries ignored. Routing thresholds are tuned
//! against exactly this behavior.

use beacon_core::models::Chunk;
use beacon_query::normalize::{normalize, tokenize};

/// Distinct alphanumeric terms of a query, in first-seen order.
pub fn query_terms(query: &str) -> Vec<String> {
    let normalized = normalize(query);
    let mut terms: Vec<String> = Vec::new();
    for token in tokenize(&normalized) {
        if !terms.iter().any(|t| t == token) {
            terms.push(token.to_string());
        }
    }
    terms
}

/// Fraction of `terms` found in the concatenated lowercased content of
/// `chunks`. 0.0 when there are no terms or no chunks.
pub fn coverage(terms: &[String], chunks: &[Chunk]) -> f64 {
    if terms.is_empty() || chunks.is_empty() {
        return 0.0;
    }
    let corpus = chunks
        .iter()
        .map(|c| c.content.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    overlap(terms, &corpus)
}

/// Best single-chunk term overlap: how well the strongest piece of evidence
/// covers the question on its own.
pub fn evidence_score(terms: &[String], chunks: &[Chunk]) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }
    chunks
        .iter()
        .map(|c| overlap(terms, &c.content.to_lowercase()))
        .fold(0.0, f64::max)
}

/// Fraction of `terms` contained in `lowercased`.
pub fn overlap(terms: &[String], lowercased: &str) -> f64 {
    if terms.is_empty() {
        return 0.0;
    }
    let hits = terms.iter().filter(|t| lowercased.contains(t.as_str())).count();
    hits as f64 / terms.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::chunk;

    #[test]
    fn terms_are_distinct_and_lowercase() {
        assert_eq!(
            query_terms("PPO vs. ppo: the PPO?"),
            vec!["ppo", "vs", "the"]
        );
        assert!(query_terms("  ?! ").is_empty());
    }

    #[test]
    fn coverage_spans_chunks_but_evidence_does_not() {
        let chunks = vec![
            chunk("a", "d1", "acme", 0, "The PPO deductible is $500."),
            chunk("b", "d2", "acme", 0, "Dental cleanings are free."),
        ];
        let terms = query_terms("ppo dental");
        assert_eq!(coverage(&terms, &chunks), 1.0);
        assert_eq!(evidence_score(&terms, &chunks), 0.5);
    }

    #[test]
    fn empty_inputs_score_zero() {
        let chunks = vec![chunk("a", "d1", "acme", 0, "anything")];
        assert_eq!(coverage(&[], &chunks), 0.0);
        assert_eq!(coverage(&query_terms("x"), &[]), 0.0);
        assert_eq!(evidence_score(&[], &chunks), 0.0);
    }

    #[test]
    fn substring_matching_is_naive() {
        let chunks = vec![chunk("a", "d1", "acme", 0, "Enrollment opens in November")];
        assert_eq!(coverage(&query_terms("enroll"), &chunks), 1.0);
    }
}
