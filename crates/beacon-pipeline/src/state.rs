//! The bounded generate/validate loop as an explicit state machine.
//!
//! Transitions are pure functions so the retry policy can be tested without
//! a runtime. The engine drives the states and performs the I/O.

use beacon_core::config::RoutingConfig;
use beacon_core::errors::{GenerationError, ValidationError};
use beacon_core::models::{Outcome, Tier, ValidationResult};
use beacon_routing::should_downgrade_tier;

/// One step of the attempt loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptState {
    /// Call the generator at `tier`.
    Generating { tier: Tier },
    /// Validate the raw text produced at `tier`.
    Validating { tier: Tier, raw: String },
    /// Validation asked for a stronger tier.
    Escalate { from: Tier },
    /// A transient failure; retry one tier down.
    Downgrade { from: Tier, reason: String },
    /// Accept the latest validated candidate.
    Done { outcome: Outcome },
    Failed(AttemptFailure),
}

/// Terminal failure of the attempt loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptFailure {
    /// Non-transient generation error; answered with an apology.
    Permanent(GenerationError),
    /// Transient failures used up the retry budget before any text existed.
    Exhausted { attempts: usize },
    /// Malformed evidence reached the validator.
    Internal(ValidationError),
}

/// Extra generations allowed after the first, shared by escalations,
/// downgrades, and same-tier retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    max_retries: usize,
    used: usize,
}

impl RetryBudget {
    pub fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            used: 0,
        }
    }

    /// Take one retry if any remain.
    pub fn try_spend(&mut self) -> bool {
        if self.used < self.max_retries {
            self.used += 1;
            true
        } else {
            false
        }
    }

    pub fn remaining(&self) -> usize {
        self.max_retries - self.used
    }

    /// Generations started so far, assuming every spent retry was used.
    pub fn attempts(&self) -> usize {
        self.used + 1
    }
}

/// Next state after a failed generation call.
///
/// Once a candidate exists (an earlier attempt produced text that failed
/// validation) any further failure accepts that candidate rather than
/// spending retries on tiers already tried. Without one, a transient failure
/// downgrades when it qualifies and otherwise retries the same tier; only an
/// empty budget ends in `Exhausted`.
pub fn on_generation_error(
    tier: Tier,
    error: &GenerationError,
    elapsed_ms: u64,
    has_candidate: bool,
    budget: &mut RetryBudget,
    routing: &RoutingConfig,
) -> AttemptState {
    if has_candidate {
        return AttemptState::Done {
            outcome: Outcome::AnsweredUnvalidated,
        };
    }
    if should_downgrade_tier(tier, error, elapsed_ms, routing) && budget.try_spend() {
        return AttemptState::Downgrade {
            from: tier,
            reason: error.to_string(),
        };
    }
    // Transient but not downgradable (L1, or a fast timeout): retry in place.
    if error.is_transient() && budget.try_spend() {
        return AttemptState::Generating { tier };
    }
    if error.is_transient() {
        AttemptState::Failed(AttemptFailure::Exhausted {
            attempts: budget.attempts(),
        })
    } else {
        AttemptState::Failed(AttemptFailure::Permanent(error.clone()))
    }
}

/// Next state after validating a candidate produced at `tier`.
pub fn on_validation(
    tier: Tier,
    validation: &ValidationResult,
    budget: &mut RetryBudget,
) -> AttemptState {
    if !validation.requires_escalation {
        return AttemptState::Done {
            outcome: Outcome::Answered,
        };
    }
    if validation.should_reroute() && !tier.is_max() && budget.try_spend() {
        return AttemptState::Escalate { from: tier };
    }
    AttemptState::Done {
        outcome: Outcome::AnsweredUnvalidated,
    }
}
