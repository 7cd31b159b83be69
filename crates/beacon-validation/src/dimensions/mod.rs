pub mod citation;
pub mod grounding;

use beacon_query::normalize::{normalize, tokenize};

/// Lowercased alphanumeric tokens joined by single spaces.
pub(crate) fn token_text(text: &str) -> String {
    tokenize(&normalize(text)).join(" ")
}
