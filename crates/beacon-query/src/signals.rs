//! Structural signals, complexity, risk, and tool detection.

use std::collections::HashSet;

use beacon_core::models::{Entity, EntityKind, QuerySignals};

use crate::entities::count_quantities;
use crate::normalize::has_term;

const OPERATOR_TERMS: &[&str] = &["and", "or", "not", "except", "unless", "but"];

const COMPARISON_TERMS: &[&str] = &[
    "compare",
    "comparison",
    "versus",
    "vs",
    "difference",
    "better",
    "cheaper",
    "between",
    "which plan",
];

const CALCULATION_TERMS: &[&str] = &[
    "how much",
    "calculate",
    "calculation",
    "compute",
    "estimate",
    "total",
    "owe",
    "pay",
    "out of pocket",
];

/// Risk vocabulary with weights. Strong terms alone reach the L3 threshold.
const RISK_TERMS: &[(&str, f64)] = &[
    ("lawsuit", 0.6),
    ("sue", 0.6),
    ("attorney", 0.6),
    ("lawyer", 0.6),
    ("discrimination", 0.6),
    ("retaliation", 0.6),
    ("wrongful termination", 0.6),
    ("erisa", 0.3),
    ("hipaa", 0.3),
    ("cobra", 0.3),
    ("fmla", 0.3),
    ("ada", 0.3),
    ("legal", 0.3),
    ("compliance", 0.3),
    ("violation", 0.3),
    ("complaint", 0.3),
    ("harassment", 0.3),
    ("appeal", 0.3),
    ("denied", 0.15),
    ("terminated", 0.15),
    ("fired", 0.15),
    ("disability", 0.15),
];

const W_OPERATORS: f64 = 0.2;
const W_COMPARISON: f64 = 0.3;
const W_CALCULATION: f64 = 0.3;
const W_MULTI_TOPIC: f64 = 0.2;
const W_QUANTITIES: f64 = 0.1;

/// Detect structural flags from padded tokens and extracted entities.
pub fn detect(padded: &str, entities: &[Entity], normalized: &str) -> QuerySignals {
    let topics: HashSet<&str> = entities
        .iter()
        .filter(|e| matches!(e.kind, EntityKind::PlanType | EntityKind::Benefit))
        .map(|e| e.value.as_str())
        .collect();

    QuerySignals {
        has_operators: OPERATOR_TERMS.iter().any(|t| has_term(padded, t)),
        has_comparison: COMPARISON_TERMS.iter().any(|t| has_term(padded, t)),
        has_calculation: CALCULATION_TERMS.iter().any(|t| has_term(padded, t)),
        multi_topic: topics.len() >= 2,
        numeric_quantities: count_quantities(normalized, entities),
    }
}

/// Weighted sum of structural signals, clamped to [0.0, 1.0].
pub fn complexity(signals: &QuerySignals) -> f64 {
    let mut score = 0.0;
    if signals.has_operators {
        score += W_OPERATORS;
    }
    if signals.has_comparison {
        score += W_COMPARISON;
    }
    if signals.has_calculation {
        score += W_CALCULATION;
    }
    if signals.multi_topic {
        score += W_MULTI_TOPIC;
    }
    if signals.numeric_quantities >= 2 {
        score += W_QUANTITIES;
    }
    clamp_unit(score)
}

/// Weighted presence of legal/compliance terms, clamped to [0.0, 1.0].
pub fn risk(padded: &str) -> f64 {
    let score: f64 = RISK_TERMS
        .iter()
        .filter(|(term, _)| has_term(padded, term))
        .map(|(_, weight)| weight)
        .sum();
    clamp_unit(score)
}

/// A calculation cue over at least two quantities is arithmetic the model
/// should not be trusted with, and must not be served from pattern answers.
pub fn needs_tool(signals: &QuerySignals) -> bool {
    signals.has_calculation && signals.numeric_quantities >= 2
}

fn clamp_unit(v: f64) -> f64 {
    // Rounded so weight sums like 0.2 + 0.1 compare cleanly against thresholds.
    ((v * 1000.0).round() / 1000.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::extract;
    use crate::normalize::{padded, tokenize};

    fn signals_for(text: &str) -> QuerySignals {
        detect(&padded(&tokenize(text)), &extract(text), text)
    }

    #[test]
    fn operators_require_whole_words() {
        assert!(!signals_for("what is a coordinator of benefits").has_operators);
        assert!(signals_for("dental or vision").has_operators);
    }

    #[test]
    fn complexity_is_clamped() {
        let s = QuerySignals {
            has_operators: true,
            has_comparison: true,
            has_calculation: true,
            multi_topic: true,
            numeric_quantities: 4,
        };
        assert_eq!(complexity(&s), 1.0);
        assert_eq!(complexity(&QuerySignals::default()), 0.0);
    }

    #[test]
    fn single_quantity_does_not_need_a_tool() {
        assert!(!needs_tool(&signals_for("how much is the $500 deductible")));
        assert!(needs_tool(&signals_for("how much do i owe on $500 at 20%")));
    }

    #[test]
    fn risk_accumulates_and_clamps() {
        assert_eq!(risk(&padded(&tokenize("is cobra available"))), 0.3);
        assert_eq!(
            risk(&padded(&tokenize("my attorney says discrimination lawsuit"))),
            1.0
        );
        assert_eq!(risk(&padded(&tokenize("what is a ppo"))), 0.0);
    }
}
