//! Cache key derivation. Keys are hex blake3 digests with a layer prefix.

use beacon_core::constants::CACHE_KEY_SEPARATOR;

pub const EXACT_PREFIX: &str = "l0:";
pub const SEMANTIC_PREFIX: &str = "l1:";

/// L0 key for a normalized query within one tenant. The separator byte keeps
/// `("ab", "c")` and `("a", "bc")` apart.
pub fn exact_key(normalized_query: &str, company_id: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(normalized_query.as_bytes());
    hasher.update(&[CACHE_KEY_SEPARATOR]);
    hasher.update(company_id.as_bytes());
    format!("{EXACT_PREFIX}{}", hasher.finalize().to_hex())
}

/// Key of a tenant's semantic index.
pub fn semantic_index_key(company_id: &str) -> String {
    format!("{SEMANTIC_PREFIX}{}", blake3::hash(company_id.as_bytes()).to_hex())
}
