use serde::{Deserialize, Serialize};

/// Closed set of question intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// "What is a PPO?"
    Definition,
    /// What a plan covers.
    Coverage,
    /// Premiums, deductibles, out-of-pocket amounts.
    Cost,
    /// Who qualifies, dependents, waiting periods.
    Eligibility,
    /// Open enrollment, qualifying life events.
    Enrollment,
    /// Claims, reimbursement, appeals paperwork.
    Claims,
    /// Plan-vs-plan questions.
    Comparison,
    /// Legal, regulatory, or compliance exposure. Wins keyword ties.
    LegalCompliance,
    /// Anything unclassified.
    General,
}

/// Kind of entity extracted from a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Money,
    Percentage,
    PlanType,
    Benefit,
    Year,
}

/// An entity match with a byte span into the normalized query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

/// Structural flags observed in the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySignals {
    pub has_operators: bool,
    pub has_comparison: bool,
    pub has_calculation: bool,
    pub multi_topic: bool,
    /// Number of money/percentage/number quantities.
    pub numeric_quantities: usize,
}

/// Result of query understanding. A pure function of the input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryProfile {
    pub normalized: String,
    pub intent: Intent,
    pub entities: Vec<Entity>,
    /// Structural complexity in [0.0, 1.0].
    pub complexity: f64,
    /// Legal/compliance risk in [0.0, 1.0].
    pub risk: f64,
    /// The question needs deterministic computation.
    pub needs_tool: bool,
    pub signals: QuerySignals,
}

impl QueryProfile {
    /// Lowest-complexity, lowest-risk profile for unusable input.
    pub fn empty(normalized: impl Into<String>) -> Self {
        Self {
            normalized: normalized.into(),
            intent: Intent::General,
            entities: Vec::new(),
            complexity: 0.0,
            risk: 0.0,
            needs_tool: false,
            signals: QuerySignals::default(),
        }
    }
}
