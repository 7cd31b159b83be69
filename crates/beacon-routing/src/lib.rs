//! # beacon-routing
//!
//! The pattern router. Pure and stateless: every function here is a total
//! function of its arguments, safe to call from any number of requests.

pub mod router;
pub mod signals;
pub mod transitions;

pub use router::{select_tier, select_tier_with_reason, RouteRule};
pub use signals::derive_signals;
pub use transitions::{downgrade_tier, escalate_tier, should_downgrade_tier, should_escalate_tier};
