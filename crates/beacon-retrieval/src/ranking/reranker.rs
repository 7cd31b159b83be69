//! Secondary re-ranking by query-term overlap.
//!
//! Blends each candidate's term overlap with its fused score normalized to
//! the best fused score, then keeps the top `top_k`.

use std::cmp::Ordering;

use crate::coverage::overlap;
use crate::search::rrf_fusion::FusedCandidate;

/// Weight of term overlap in the blended score; the rest is fused rank.
pub const OVERLAP_WEIGHT: f64 = 0.5;

/// Re-score and narrow `candidates` to `top_k`. With no terms the fused
/// order is kept and only truncation applies.
pub fn rerank(terms: &[String], candidates: Vec<FusedCandidate>, top_k: usize) -> Vec<FusedCandidate> {
    let mut candidates = candidates;
    if terms.is_empty() || candidates.is_empty() {
        candidates.truncate(top_k);
        return candidates;
    }

    let best = candidates
        .iter()
        .map(|c| c.scores.fused_score)
        .fold(0.0, f64::max);

    for c in &mut candidates {
        let rank_signal = if best > 0.0 {
            c.scores.fused_score / best
        } else {
            0.0
        };
        let term_signal = overlap(terms, &c.chunk.content.to_lowercase());
        c.score = OVERLAP_WEIGHT * term_signal + (1.0 - OVERLAP_WEIGHT) * rank_signal;
    }

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(top_k);
    candidates
}
