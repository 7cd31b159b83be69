use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use beacon_core::errors::EmbeddingError;
use beacon_core::traits::EmbeddingProvider;

pub const HASH_EMBEDDING_DIMS: usize = 64;

/// Deterministic bag-of-words embedder. Each lowercase alphanumeric token is
/// hashed into one signed bucket; the result is L2-normalized. Texts sharing
/// vocabulary get high cosine similarity, which is all the tests need.
#[derive(Debug, Default)]
pub struct HashEmbedder {
    failing: AtomicBool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Synchronous embedding, shared with [`crate::InMemorySearch`].
    pub fn embed_text(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; HASH_EMBEDDING_DIMS];
        let lower = text.to_lowercase();
        for token in lower.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            let hash = blake3::hash(token.as_bytes());
            let bytes = hash.as_bytes();
            let bucket = u16::from_le_bytes([bytes[0], bytes[1]]) as usize % HASH_EMBEDDING_DIMS;
            let sign = if bytes[2] & 1 == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(EmbeddingError::Failed {
                reason: "embedder scripted to fail".to_string(),
            });
        }
        Ok(Self::embed_text(text))
    }

    fn name(&self) -> &str {
        "hash-embedder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn identical_text_has_unit_similarity() {
        let a = HashEmbedder::embed_text("what is a ppo plan");
        let b = HashEmbedder::embed_text("What is a PPO plan?");
        assert!((cosine(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_text_is_the_zero_vector() {
        let v = HashEmbedder::embed_text("  ?? ");
        assert_eq!(v.len(), HASH_EMBEDDING_DIMS);
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
