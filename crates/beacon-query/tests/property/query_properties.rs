use beacon_query::{analyze, normalize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn analyze_is_deterministic(q in "\\PC{0,120}") {
        prop_assert_eq!(analyze(&q), analyze(&q));
    }

    #[test]
    fn scores_stay_in_unit_interval(q in "[a-z0-9$% ?,.]{0,160}") {
        let p = analyze(&q);
        prop_assert!((0.0..=1.0).contains(&p.complexity));
        prop_assert!((0.0..=1.0).contains(&p.risk));
    }

    #[test]
    fn normalization_is_idempotent(q in "\\PC{0,120}") {
        let once = normalize(&q);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn entity_spans_match_values(q in "[a-z0-9$% ]{0,120}") {
        let p = analyze(&q);
        let mut last_end = 0;
        for e in &p.entities {
            prop_assert!(e.start >= last_end, "entities overlap");
            prop_assert_eq!(&p.normalized[e.start..e.end], e.value.as_str());
            last_end = e.end;
        }
    }

    #[test]
    fn needs_tool_implies_calculation(q in "[a-z0-9$% ]{0,120}") {
        let p = analyze(&q);
        if p.needs_tool {
            prop_assert!(p.signals.has_calculation);
            prop_assert!(p.signals.numeric_quantities >= 2);
        }
    }
}
