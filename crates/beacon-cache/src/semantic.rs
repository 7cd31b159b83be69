//! Per-tenant semantic index: recent (embedding, exact key) pairs, newest
//! first, bounded in length. Stored in the backend as JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticEntry {
    pub embedding: Vec<f32>,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticIndex {
    pub entries: Vec<SemanticEntry>,
}

impl SemanticIndex {
    /// Record `key` as the newest entry, replacing any older entry for the
    /// same key and evicting the oldest beyond `capacity`.
    pub fn push(&mut self, embedding: Vec<f32>, key: String, capacity: usize) {
        self.entries.retain(|e| e.key != key);
        self.entries.insert(0, SemanticEntry { embedding, key });
        self.entries.truncate(capacity);
    }

    /// The most similar entry at or above `threshold`. Ties go to the newer
    /// entry.
    pub fn best_match(&self, embedding: &[f32], threshold: f64) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for entry in &self.entries {
            let sim = cosine_similarity(embedding, &entry.embedding);
            if sim >= threshold && best.map_or(true, |(_, b)| sim > b) {
                best = Some((entry.key.as_str(), sim));
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cosine similarity; 0.0 for mismatched dimensions or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}
