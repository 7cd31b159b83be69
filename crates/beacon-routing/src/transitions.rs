//! Tier transitions: escalation after failed validation, downgrade after
//! transient generation failures.

use beacon_core::config::{RoutingConfig, ValidationConfig};
use beacon_core::errors::GenerationError;
use beacon_core::models::Tier;

/// Whether a validated response should be regenerated one tier up.
/// Uses the same grounding threshold as the validator. Never true at the top tier.
pub fn should_escalate_tier(
    tier: Tier,
    grounding_score: f64,
    citations_valid: bool,
    config: &ValidationConfig,
) -> bool {
    !tier.is_max() && (grounding_score < config.grounding_threshold || !citations_valid)
}

/// One tier up, saturating at L3.
pub fn escalate_tier(tier: Tier) -> Tier {
    match tier {
        Tier::L1 => Tier::L2,
        Tier::L2 | Tier::L3 => Tier::L3,
    }
}

/// Whether a failed generation should be retried one tier down.
///
/// Only transient failures qualify: a rate limit, or a timeout that took at
/// least `downgrade_min_elapsed_ms`. Never true at L1.
pub fn should_downgrade_tier(
    tier: Tier,
    error: &GenerationError,
    elapsed_ms: u64,
    config: &RoutingConfig,
) -> bool {
    if tier == Tier::MIN {
        return false;
    }
    match error {
        GenerationError::RateLimited { .. } => true,
        GenerationError::Timeout { .. } => elapsed_ms >= config.downgrade_min_elapsed_ms,
        GenerationError::Failed { .. } => false,
    }
}

/// One tier down, saturating at L1.
pub fn downgrade_tier(tier: Tier) -> Tier {
    match tier {
        Tier::L3 => Tier::L2,
        Tier::L2 | Tier::L1 => Tier::L1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_is_one_step_and_capped() {
        assert_eq!(escalate_tier(Tier::L1), Tier::L2);
        assert_eq!(escalate_tier(Tier::L2), Tier::L3);
        assert_eq!(escalate_tier(Tier::L3), Tier::L3);
    }

    #[test]
    fn repeated_escalation_never_passes_l3() {
        let mut tier = Tier::L1;
        for _ in 0..10 {
            tier = escalate_tier(tier);
            assert!(tier <= Tier::L3);
        }
        assert_eq!(tier, Tier::L3);
    }

    #[test]
    fn downgrade_is_one_step_and_floored() {
        assert_eq!(downgrade_tier(Tier::L3), Tier::L2);
        assert_eq!(downgrade_tier(Tier::L2), Tier::L1);
        assert_eq!(downgrade_tier(Tier::L1), Tier::L1);
    }

    #[test]
    fn escalate_on_weak_grounding_or_bad_citations() {
        let config = ValidationConfig::default();
        assert!(should_escalate_tier(Tier::L1, 0.69, true, &config));
        assert!(should_escalate_tier(Tier::L2, 0.95, false, &config));
        assert!(!should_escalate_tier(Tier::L1, 0.70, true, &config));
    }

    #[test]
    fn escalation_follows_configured_threshold() {
        let config = ValidationConfig { grounding_threshold: 0.8, ..ValidationConfig::default() };
        assert!(should_escalate_tier(Tier::L1, 0.75, true, &config));
        assert!(!should_escalate_tier(Tier::L1, 0.80, true, &config));
    }

    #[test]
    fn never_escalate_from_l3() {
        assert!(!should_escalate_tier(Tier::L3, 0.0, false, &ValidationConfig::default()));
    }

    #[test]
    fn downgrade_only_on_transient_failures_above_l1() {
        let config = RoutingConfig::default();
        let slow = GenerationError::Timeout { tier: Tier::L3, elapsed_ms: 9_000 };
        let limited = GenerationError::RateLimited { tier: Tier::L2, retry_after_ms: Some(500) };
        let broken = GenerationError::Failed { tier: Tier::L3, reason: "bad request".into() };

        assert!(should_downgrade_tier(Tier::L3, &slow, 9_000, &config));
        assert!(should_downgrade_tier(Tier::L2, &limited, 10, &config));
        assert!(!should_downgrade_tier(Tier::L3, &broken, 9_000, &config));
        assert!(!should_downgrade_tier(Tier::L1, &limited, 10, &config));
    }

    #[test]
    fn quick_timeouts_are_not_worth_a_downgrade() {
        let config = RoutingConfig::default();
        let quick = GenerationError::Timeout { tier: Tier::L2, elapsed_ms: 100 };
        assert!(!should_downgrade_tier(Tier::L2, &quick, 100, &config));
    }
}
