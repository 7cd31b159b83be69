//! Regex/keyword entity extraction over normalized query text.

use std::sync::LazyLock;

use beacon_core::models::{Entity, EntityKind};
use regex::Regex;

macro_rules! entity_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

entity_pattern!(RE_MONEY, r"\$\s?\d[\d,]*(?:\.\d+)?k?");
entity_pattern!(RE_PERCENT, r"\d+(?:\.\d+)?\s?(?:%|percent\b)");
entity_pattern!(RE_YEAR, r"\b(?:19|20)\d{2}\b");
entity_pattern!(RE_PLAN_TYPE, r"\b(?:ppo|hmo|epo|pos|hdhp)\b");
entity_pattern!(
    RE_BENEFIT,
    r"\b(?:dental|vision|medical|pharmacy|prescription|hsa|fsa|hra|401\s?\(?k\)?|403\s?\(?b\)?|life insurance|disability|pto|parental leave|eap|cobra)"
);
entity_pattern!(RE_NUMBER, r"\b\d+(?:\.\d+)?\b");

/// Extraction order doubles as priority: a later pattern never claims bytes
/// already covered by an earlier match (so `$2000` is money, not a year).
fn ordered_patterns() -> [(EntityKind, &'static LazyLock<Option<Regex>>); 5] {
    [
        (EntityKind::Money, &RE_MONEY),
        (EntityKind::Percentage, &RE_PERCENT),
        (EntityKind::PlanType, &RE_PLAN_TYPE),
        (EntityKind::Benefit, &RE_BENEFIT),
        (EntityKind::Year, &RE_YEAR),
    ]
}

/// Extract entities from normalized text, ordered by span start.
pub fn extract(normalized: &str) -> Vec<Entity> {
    let mut entities: Vec<Entity> = Vec::new();

    for (kind, pattern) in ordered_patterns() {
        let Some(re) = pattern.as_ref() else { continue };
        for m in re.find_iter(normalized) {
            if overlaps_any(&entities, m.start(), m.end()) {
                continue;
            }
            entities.push(Entity {
                kind,
                value: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            });
        }
    }

    entities.sort_by_key(|e| (e.start, e.end));
    entities
}

/// Count numeric quantities: money, percentages, and bare numbers that are
/// not part of another entity (years and benefit names like 401k excluded).
pub fn count_quantities(normalized: &str, entities: &[Entity]) -> usize {
    let typed = entities
        .iter()
        .filter(|e| matches!(e.kind, EntityKind::Money | EntityKind::Percentage))
        .count();

    let bare = RE_NUMBER
        .as_ref()
        .map(|re| {
            re.find_iter(normalized)
                .filter(|m| !overlaps_any(entities, m.start(), m.end()))
                .count()
        })
        .unwrap_or(0);

    typed + bare
}

fn overlaps_any(entities: &[Entity], start: usize, end: usize) -> bool {
    entities.iter().any(|e| start < e.end && e.start < end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_is_not_mistaken_for_a_year() {
        let entities = extract("is $2000 the deductible for 2024");
        let kinds: Vec<EntityKind> = entities.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EntityKind::Money, EntityKind::Year]);
        assert_eq!(entities[0].value, "$2000");
        assert_eq!(entities[1].value, "2024");
    }

    #[test]
    fn spans_index_into_the_normalized_text() {
        let text = "does the hmo cover 80% of dental";
        for e in extract(text) {
            assert_eq!(&text[e.start..e.end], e.value);
        }
    }

    #[test]
    fn quantities_count_money_percent_and_bare_numbers() {
        let text = "$5000 procedure with 80% coverage after 3 visits";
        let entities = extract(text);
        assert_eq!(count_quantities(text, &entities), 3);
    }

    #[test]
    fn retirement_plans_are_benefits_not_numbers() {
        let text = "how does the 401k match work";
        let entities = extract(text);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Benefit);
        assert_eq!(count_quantities(text, &entities), 0);
    }
}
