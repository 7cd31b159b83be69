//! # beacon-observability
//!
//! Structured tracing (subscriber setup, per-stage span macros, named
//! events) and the append-only counters shared by every request.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use tracing_setup::events;
