//! Intent classification by keyword matching.

use beacon_core::models::Intent;

use crate::normalize::has_term;

/// Keyword patterns mapped to intents. Order matters: on equal hit counts the
/// earlier intent wins, which is why legal/compliance comes first.
const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::LegalCompliance,
        &[
            "lawsuit",
            "sue",
            "legal",
            "attorney",
            "lawyer",
            "erisa",
            "hipaa",
            "cobra",
            "fmla",
            "ada",
            "discrimination",
            "retaliation",
            "compliance",
            "regulation",
            "violation",
            "complaint",
            "appeal",
        ],
    ),
    (
        Intent::Comparison,
        &[
            "compare",
            "comparison",
            "versus",
            "vs",
            "difference",
            "better",
            "between",
        ],
    ),
    (
        Intent::Cost,
        &[
            "cost",
            "costs",
            "price",
            "premium",
            "premiums",
            "deductible",
            "copay",
            "coinsurance",
            "out of pocket",
            "pay",
            "how much",
            "fee",
        ],
    ),
    (
        Intent::Eligibility,
        &[
            "eligible",
            "eligibility",
            "qualify",
            "dependent",
            "dependents",
            "spouse",
            "waiting period",
            "part time",
        ],
    ),
    (
        Intent::Enrollment,
        &[
            "enroll",
            "enrollment",
            "open enrollment",
            "sign up",
            "change my plan",
            "qualifying life event",
        ],
    ),
    (
        Intent::Claims,
        &[
            "claim",
            "claims",
            "reimburse",
            "reimbursement",
            "receipt",
            "submit",
            "eob",
            "denied",
        ],
    ),
    (
        Intent::Coverage,
        &[
            "cover",
            "covered",
            "covers",
            "coverage",
            "include",
            "includes",
            "in network",
            "out of network",
        ],
    ),
    (
        Intent::Definition,
        &[
            "what is",
            "what s",
            "what are",
            "define",
            "definition",
            "meaning",
            "mean",
            "explain",
        ],
    ),
];

/// Classify intent from padded query tokens.
///
/// Each intent scores one point per keyword present; the highest score wins.
/// No hits at all falls back to `General`.
pub fn classify(padded: &str) -> Intent {
    let mut best_intent = Intent::General;
    let mut best_score = 0usize;

    for &(intent, keywords) in INTENT_KEYWORDS {
        let score = keywords.iter().filter(|kw| has_term(padded, kw)).count();
        if score > best_score {
            best_score = score;
            best_intent = intent;
        }
    }

    best_intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{padded, tokenize};

    fn classify_text(text: &str) -> Intent {
        classify(&padded(&tokenize(text)))
    }

    #[test]
    fn legal_wins_ties_against_claims() {
        // "appeal" (legal) vs "claim" (claims): one hit each.
        assert_eq!(
            classify_text("how do i appeal a claim"),
            Intent::LegalCompliance
        );
    }

    #[test]
    fn more_hits_beat_priority() {
        assert_eq!(
            classify_text("submit a claim for reimbursement with my receipt"),
            Intent::Claims
        );
    }

    #[test]
    fn unknown_text_is_general() {
        assert_eq!(classify_text("hello there"), Intent::General);
    }

    #[test]
    fn enrollment_phrases_match() {
        assert_eq!(
            classify_text("when does open enrollment start"),
            Intent::Enrollment
        );
    }
}
