//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i), ranks 1-based.
//!
//! Combines the vector and lexical rankings without normalizing their raw
//! scores against each other.

use std::cmp::Ordering;
use std::collections::HashMap;

use beacon_core::models::{Chunk, MethodScores};

/// A chunk after fusion, with the raw scores it received from each list.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    pub chunk: Chunk,
    pub scores: MethodScores,
    /// Current ordering score: the fused score, or the reranked score once
    /// reranking has run.
    pub score: f64,
}

/// Fuse the vector and lexical lists, keyed by chunk id.
///
/// A chunk in both lists accumulates both terms. Ordering is by fused score
/// descending; on equal scores a chunk found by both methods comes first,
/// then first-seen order (vector list before lexical list). A repeated id
/// inside one list keeps its best rank.
pub fn fuse(vector: &[Chunk], lexical: &[Chunk], k: u32) -> Vec<FusedCandidate> {
    let mut candidates: Vec<FusedCandidate> = Vec::with_capacity(vector.len() + lexical.len());
    let mut index: HashMap<&str, usize> = HashMap::new();
    let k = f64::from(k);

    for (i, chunk) in vector.iter().enumerate() {
        let rank = i + 1;
        let slot = slot_for(&mut candidates, &mut index, chunk);
        if slot.scores.vector_rank.is_none() {
            slot.scores.vector_rank = Some(rank);
            slot.scores.vector_score = Some(chunk.relevance_score);
            slot.scores.fused_score += 1.0 / (k + rank as f64);
        }
    }

    for (i, chunk) in lexical.iter().enumerate() {
        let rank = i + 1;
        let slot = slot_for(&mut candidates, &mut index, chunk);
        if slot.scores.lexical_rank.is_none() {
            slot.scores.lexical_rank = Some(rank);
            slot.scores.lexical_score = Some(chunk.relevance_score);
            slot.scores.fused_score += 1.0 / (k + rank as f64);
        }
    }

    for c in &mut candidates {
        c.score = c.scores.fused_score;
    }

    // Stable sort keeps first-seen order among full ties.
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.scores.in_both().cmp(&a.scores.in_both()))
    });

    candidates
}

fn slot_for<'c, 'a>(
    candidates: &'c mut Vec<FusedCandidate>,
    index: &mut HashMap<&'a str, usize>,
    chunk: &'a Chunk,
) -> &'c mut FusedCandidate {
    let pos = *index.entry(chunk.id.as_str()).or_insert_with(|| {
        candidates.push(FusedCandidate {
            chunk: chunk.clone(),
            scores: MethodScores::default(),
            score: 0.0,
        });
        candidates.len() - 1
    });
    &mut candidates[pos]
}
