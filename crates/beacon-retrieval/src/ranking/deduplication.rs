//! Deduplicate candidates by (doc_id, position).

use std::collections::HashSet;

use crate::search::rrf_fusion::FusedCandidate;

/// Keep the first candidate for each (doc_id, position). Candidates are
/// pre-sorted by score, so the highest-scored copy wins.
pub fn deduplicate(candidates: Vec<FusedCandidate>) -> Vec<FusedCandidate> {
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert((c.chunk.doc_id.clone(), c.chunk.position)))
        .collect()
}
