//! Test fixtures for Beacon: the golden benefits corpus and in-memory fakes
//! for the search, embedding, generation, and cache traits.
//!
//! Everything here is deterministic. Fakes never sleep unless a delay is
//! scripted, so tests can run under a paused tokio clock.

mod cache;
mod embedder;
mod generator;
mod search;

pub use cache::RecordingCache;
pub use embedder::{HashEmbedder, HASH_EMBEDDING_DIMS};
pub use generator::{GenerationCall, ScriptedGenerator};
pub use search::InMemorySearch;

use std::path::PathBuf;

use beacon_core::models::Chunk;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Tenant with a populated corpus.
pub const ACME: &str = "acme";
/// Second tenant, used for isolation checks.
pub const GLOBEX: &str = "globex";
/// Tenant with no documents at all.
pub const INITECH: &str = "initech";

/// Root directory of this crate's fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

#[derive(Deserialize)]
struct Corpus {
    chunks: Vec<Chunk>,
}

/// Every chunk of the golden benefits corpus, all tenants.
pub fn benefits_corpus() -> Vec<Chunk> {
    load_fixture::<Corpus>("golden/benefits_corpus.json").chunks
}

/// Chunks of the golden corpus owned by `company_id`.
pub fn tenant_chunks(company_id: &str) -> Vec<Chunk> {
    benefits_corpus()
        .into_iter()
        .filter(|c| c.company_id == company_id)
        .collect()
}

/// One labelled PII sample: input text, expected categories, expected output.
#[derive(Debug, Clone, Deserialize)]
pub struct PiiSample {
    pub name: String,
    pub input: String,
    pub categories: Vec<String>,
    pub redacted: String,
}

/// Labelled PII detection/redaction samples.
pub fn pii_samples() -> Vec<PiiSample> {
    #[derive(Deserialize)]
    struct Samples {
        samples: Vec<PiiSample>,
    }
    load_fixture::<Samples>("golden/pii_samples.json").samples
}

/// Build a chunk by hand for unit tests that don't need the corpus.
pub fn chunk(id: &str, doc_id: &str, company_id: &str, position: u32, content: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        doc_id: doc_id.to_string(),
        company_id: company_id.to_string(),
        section_path: vec![doc_id.to_string()],
        title: doc_id.to_string(),
        content: content.to_string(),
        position,
        window_start: 0,
        window_end: content.len() as u32,
        relevance_score: 0.0,
        vector: None,
    }
}
