//! Grounding: how much of the answer is traceable to retrieved content.
//!
//! The answer is split into lowercase alphanumeric tokens and every n-gram
//! for n in `1..=max_ngram` is a plain substring lookup in each chunk's token
//! text (lowercased, punctuation collapsed to single spaces). Word boundaries
//! are ignored, so any verbatim slice of a chunk scores 1.0. Longer n-grams
//! carry weight n, so copied phrases count for more than scattered shared
//! words.

use std::collections::BTreeMap;

use beacon_core::config::ValidationConfig;
use beacon_core::models::{Chunk, GroundingMetrics};
use beacon_query::normalize::{normalize, tokenize};

use super::token_text;

/// Score `response` against `chunks`. An empty response scores 0.0.
pub fn compute_grounding_score(
    response: &str,
    chunks: &[Chunk],
    config: &ValidationConfig,
) -> GroundingMetrics {
    let normalized = normalize(response);
    let tokens = tokenize(&normalized);

    let chunk_texts: Vec<(&str, String)> = chunks
        .iter()
        .map(|c| (c.id.as_str(), token_text(&c.content)))
        .collect();
    let grounded = |gram: &[&str]| {
        let needle = gram.join(" ");
        chunk_texts.iter().any(|(_, text)| text.contains(&needle))
    };

    let mut grounded_weight = 0.0;
    let mut total_weight = 0.0;
    for n in 1..=config.max_ngram.max(1) {
        let weight = n as f64;
        for gram in tokens.windows(n) {
            total_weight += weight;
            if grounded(gram) {
                grounded_weight += weight;
            }
        }
    }

    let score = if total_weight > 0.0 {
        (grounded_weight / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut chunk_token_hits = BTreeMap::new();
    for (id, text) in &chunk_texts {
        let hits = tokens
            .iter()
            .filter(|t| text.contains(**t))
            .count();
        chunk_token_hits.insert((*id).to_string(), hits);
    }

    GroundingMetrics {
        score,
        passed: score >= config.grounding_threshold,
        threshold: config.grounding_threshold,
        grounded_weight,
        total_weight,
        chunk_token_hits,
        ungrounded_spans: ungrounded_spans(&tokens, |t| grounded(&[t])),
    }
}

/// Maximal runs of consecutive tokens that appear in no chunk.
fn ungrounded_spans<'a>(tokens: &[&'a str], grounded: impl Fn(&'a str) -> bool) -> Vec<String> {
    let mut spans = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for &token in tokens {
        if grounded(token) {
            if !run.is_empty() {
                spans.push(run.join(" "));
                run.clear();
            }
        } else {
            run.push(token);
        }
    }
    if !run.is_empty() {
        spans.push(run.join(" "));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::chunk;

    fn score(response: &str, chunks: &[Chunk]) -> GroundingMetrics {
        compute_grounding_score(response, chunks, &ValidationConfig::default())
    }

    #[test]
    fn verbatim_answer_is_fully_grounded() {
        let c = chunk("c1", "d1", "acme", 0, "The PPO deductible is $1,500 per person.");
        let m = score("the PPO deductible is $1,500", &[c]);
        assert_eq!(m.score, 1.0);
        assert!(m.passed);
        assert!(m.ungrounded_spans.is_empty());
    }

    #[test]
    fn empty_response_scores_zero() {
        let c = chunk("c1", "d1", "acme", 0, "anything");
        let m = score("  ", &[c]);
        assert_eq!(m.score, 0.0);
        assert_eq!(m.total_weight, 0.0);
        assert!(!m.passed);
    }

    #[test]
    fn no_chunks_scores_zero() {
        let m = score("the deductible is high", &[]);
        assert_eq!(m.score, 0.0);
        assert_eq!(m.ungrounded_spans, vec!["the deductible is high".to_string()]);
    }

    #[test]
    fn weighting_favors_copied_phrases() {
        let c = chunk("c1", "d1", "acme", 0, "dental cleanings are covered twice a year");
        let scrambled = score("year twice covered cleanings dental", &[c.clone()]);
        let copied = score("dental cleanings are covered twice", &[c]);
        assert!(copied.score > scrambled.score);
        // Unigrams all match; no bigram or trigram does.
        assert!((scrambled.score - 5.0 / (5.0 + 8.0 + 9.0)).abs() < 1e-9);
    }

    #[test]
    fn slice_cut_mid_word_is_fully_grounded() {
        let c = chunk(
            "c1",
            "d1",
            "acme",
            0,
            "Preventive dental cleanings are covered at 100% twice per plan year.",
        );
        assert_eq!(score("ental cleanings are cover", &[c.clone()]).score, 1.0);
        assert_eq!(score("s are covered at 100% tw", &[c]).score, 1.0);
    }

    #[test]
    fn matching_ignores_case() {
        let c = chunk("c1", "d1", "acme", 0, "The HMO requires a referral.");
        assert_eq!(score("hmo REQUIRES a Referral", &[c]).score, 1.0);
    }

    #[test]
    fn reports_hits_per_chunk_and_ungrounded_runs() {
        let a = chunk("a", "d1", "acme", 0, "vision exams are covered");
        let b = chunk("b", "d2", "acme", 0, "dental cleanings are covered");
        let m = score("vision exams cost nothing extra but dental cleanings are covered", &[a, b]);
        assert_eq!(m.chunk_token_hits["a"], 4);
        assert_eq!(m.chunk_token_hits["b"], 4);
        assert_eq!(m.ungrounded_spans, vec!["cost nothing extra but".to_string()]);
    }
}
