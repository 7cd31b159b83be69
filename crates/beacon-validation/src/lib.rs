//! # beacon-validation
//!
//! Checks a generated answer against the evidence it was generated from.
//!
//! ## Dimensions
//! 1. **Grounding**: weighted 1..n-gram overlap between the answer and the
//!    retrieved chunks
//! 2. **Citations**: every `[cite:...]` marker must quote its chunk
//! 3. **PII**: delegated to `beacon-privacy`; reported, never a failure
//!
//! The composite verdict tells the pipeline whether to escalate.

pub mod dimensions;
pub mod engine;

pub use dimensions::citation::{validate_citations, CitationReport};
pub use dimensions::grounding::compute_grounding_score;
pub use engine::OutputValidator;
