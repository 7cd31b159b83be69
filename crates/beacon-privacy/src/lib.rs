//! # beacon-privacy
//!
//! PII detection and redaction for generated answers. One pattern table
//! drives both detection and redaction; overlapping matches resolve
//! longest-first and every mask is inert, so redaction is idempotent.

pub mod patterns;
pub mod redactor;

pub use redactor::PiiRedactor;
