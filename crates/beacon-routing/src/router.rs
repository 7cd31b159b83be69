//! Fixed-priority decision table from routing signals to a starting tier.

use std::fmt;

use beacon_core::config::RoutingConfig;
use beacon_core::models::{RoutingSignals, Tier};
use serde::{Deserialize, Serialize};

/// The decision-table row that fired, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteRule {
    /// Risky, computational, very complex, or multi-document synthesis.
    HighStakes,
    /// Coverage or evidence too thin; the strongest tier must compensate.
    InsufficientEvidence,
    /// Moderately complex or uses boolean operators.
    Moderate,
    /// Everything else.
    Simple,
}

impl RouteRule {
    pub fn tier(self) -> Tier {
        match self {
            RouteRule::HighStakes | RouteRule::InsufficientEvidence => Tier::L3,
            RouteRule::Moderate => Tier::L2,
            RouteRule::Simple => Tier::L1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteRule::HighStakes => "high_stakes",
            RouteRule::InsufficientEvidence => "insufficient_evidence",
            RouteRule::Moderate => "moderate",
            RouteRule::Simple => "simple",
        }
    }
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the starting tier. First matching rule wins.
pub fn select_tier(signals: &RoutingSignals, config: &RoutingConfig) -> Tier {
    select_tier_with_reason(signals, config).1
}

/// Pick the starting tier and report which rule fired.
pub fn select_tier_with_reason(signals: &RoutingSignals, config: &RoutingConfig) -> (RouteRule, Tier) {
    let rule = if signals.risk_score >= config.risk_threshold
        || signals.needs_tools
        || signals.complexity_score >= config.complexity_high
        || signals.multi_doc_synthesis
    {
        RouteRule::HighStakes
    } else if signals.coverage < config.min_coverage || signals.evidence_score < config.min_evidence {
        RouteRule::InsufficientEvidence
    } else if signals.complexity_score >= config.complexity_medium || signals.has_operators {
        RouteRule::Moderate
    } else {
        RouteRule::Simple
    };
    (rule, rule.tier())
}
