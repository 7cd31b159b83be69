use serde::{Deserialize, Serialize};

use super::defaults;

/// Pattern router thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Risk at or above this routes straight to L3.
    pub risk_threshold: f64,
    /// Complexity at or above this routes straight to L3.
    pub complexity_high: f64,
    /// Complexity at or above this routes to at least L2.
    pub complexity_medium: f64,
    /// Coverage below this is insufficient evidence.
    pub min_coverage: f64,
    /// Evidence score below this is insufficient evidence.
    pub min_evidence: f64,
    /// A generation timeout only counts as transient past this many ms.
    pub downgrade_min_elapsed_ms: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            risk_threshold: defaults::DEFAULT_RISK_THRESHOLD,
            complexity_high: defaults::DEFAULT_COMPLEXITY_HIGH,
            complexity_medium: defaults::DEFAULT_COMPLEXITY_MEDIUM,
            min_coverage: defaults::DEFAULT_MIN_COVERAGE,
            min_evidence: defaults::DEFAULT_MIN_EVIDENCE,
            downgrade_min_elapsed_ms: defaults::DEFAULT_DOWNGRADE_MIN_ELAPSED_MS,
        }
    }
}
