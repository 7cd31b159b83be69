//! # beacon-pipeline
//!
//! [`AnswerEngine`] runs one benefits question through every stage:
//! understanding, L0/L1 cache lookup, hybrid retrieval, routing, generation
//! with bounded escalation and downgrade, validation, PII redaction, and the
//! gated cache write.
//!
//! Every path returns a well-formed [`AnswerResponse`]. The one error that
//! escapes is `BeaconError::PipelineExhausted`.
//!
//! [`AnswerResponse`]: beacon_core::models::AnswerResponse

pub mod engine;
pub mod fallback;
pub mod prompt;
pub mod state;

pub use engine::AnswerEngine;
