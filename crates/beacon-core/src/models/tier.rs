use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation tier. Ordered by cost and capability: `L1 < L2 < L3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Cheapest model; definitional lookups with strong evidence.
    L1,
    /// Mid-size model; moderately complex questions.
    L2,
    /// Strongest model; risky, computational, or poorly evidenced questions.
    L3,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::L1, Tier::L2, Tier::L3];
    pub const MAX: Tier = Tier::L3;
    pub const MIN: Tier = Tier::L1;

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::L1 => "L1",
            Tier::L2 => "L2",
            Tier::L3 => "L3",
        }
    }

    pub fn is_max(self) -> bool {
        self == Self::MAX
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
