//! # beacon-query
//!
//! Query understanding. Turns raw question text into a [`QueryProfile`]:
//! normalized text, intent, entities, complexity, risk, and whether the
//! question needs deterministic computation.
//!
//! Everything here is pure and deterministic. Cache keys are derived from
//! `QueryProfile::normalized`, so identical input must always produce an
//! identical profile.

pub mod entities;
pub mod intent;
pub mod normalize;
pub mod signals;

use beacon_core::models::QueryProfile;

pub use normalize::normalize;

/// Analyze a raw query. Never fails; unusable input yields
/// [`QueryProfile::empty`].
pub fn analyze(query: &str) -> QueryProfile {
    let normalized = normalize(query);
    let tokens = normalize::tokenize(&normalized);
    if tokens.is_empty() {
        return QueryProfile::empty(normalized);
    }

    let padded = normalize::padded(&tokens);
    let entities = entities::extract(&normalized);
    let signals = signals::detect(&padded, &entities, &normalized);
    let intent = intent::classify(&padded);
    let complexity = signals::complexity(&signals);
    let risk = signals::risk(&padded);
    let needs_tool = signals::needs_tool(&signals);

    QueryProfile {
        normalized,
        intent,
        entities,
        complexity,
        risk,
        needs_tool,
        signals,
    }
}
