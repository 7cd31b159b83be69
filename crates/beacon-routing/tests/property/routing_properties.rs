use beacon_core::config::{RoutingConfig, ValidationConfig};
use beacon_core::models::{RoutingSignals, Tier};
use beacon_routing::{downgrade_tier, escalate_tier, select_tier, should_escalate_tier};
use proptest::prelude::*;

fn arb_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::L1), Just(Tier::L2), Just(Tier::L3)]
}

fn arb_signals() -> impl Strategy<Value = RoutingSignals> {
    (
        0.0f64..=1.0,
        0.0f64..=1.0,
        0.0f64..=1.0,
        0.0f64..=1.0,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(coverage, evidence, complexity, risk, multi, ops, tools)| RoutingSignals {
            coverage,
            evidence_score: evidence,
            complexity_score: complexity,
            risk_score: risk,
            multi_doc_synthesis: multi,
            has_operators: ops,
            needs_tools: tools,
        })
}

proptest! {
    #[test]
    fn escalation_never_exceeds_l3(start in arb_tier(), steps in 0usize..8) {
        let mut tier = start;
        for _ in 0..steps {
            let next = escalate_tier(tier);
            prop_assert!(next >= tier);
            tier = next;
        }
        prop_assert!(tier <= Tier::L3);
    }

    #[test]
    fn downgrade_never_goes_below_l1(start in arb_tier(), steps in 0usize..8) {
        let mut tier = start;
        for _ in 0..steps {
            tier = downgrade_tier(tier);
        }
        prop_assert!(tier >= Tier::L1);
    }

    #[test]
    fn l3_never_requests_escalation(grounding in 0.0f64..=1.0, citations_valid in any::<bool>()) {
        prop_assert!(!should_escalate_tier(Tier::L3, grounding, citations_valid, &ValidationConfig::default()));
    }

    #[test]
    fn routing_is_deterministic(signals in arb_signals()) {
        let config = RoutingConfig::default();
        prop_assert_eq!(select_tier(&signals, &config), select_tier(&signals, &config));
    }

    #[test]
    fn hard_l3_triggers_always_win(signals in arb_signals()) {
        let config = RoutingConfig::default();
        if signals.needs_tools || signals.risk_score >= config.risk_threshold {
            prop_assert_eq!(select_tier(&signals, &config), Tier::L3);
        }
    }
}
