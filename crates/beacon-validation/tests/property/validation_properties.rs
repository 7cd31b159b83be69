use beacon_core::config::ValidationConfig;
use beacon_validation::compute_grounding_score;
use proptest::prelude::*;
use test_fixtures::chunk;

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..40)
}

proptest! {
    #[test]
    fn grounding_score_stays_in_unit_interval(response in ".{0,200}", content in ".{0,200}") {
        let c = chunk("c1", "d1", "acme", 0, &content);
        let m = compute_grounding_score(&response, &[c], &ValidationConfig::default());
        prop_assert!((0.0..=1.0).contains(&m.score));
        prop_assert!(m.grounded_weight <= m.total_weight);
    }

    #[test]
    fn verbatim_copy_reaches_the_ceiling(tokens in words()) {
        prop_assume!(!tokens.is_empty());
        let text = tokens.join(" ");
        let c = chunk("c1", "d1", "acme", 0, &text);
        let m = compute_grounding_score(&text, &[c], &ValidationConfig::default());
        prop_assert_eq!(m.score, 1.0);
    }

    #[test]
    fn any_slice_of_a_chunk_reaches_the_ceiling(
        content in "[A-Za-z0-9 ,.%$-]{1,160}",
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let (i, j) = {
            let (x, y) = (a.index(content.len() + 1), b.index(content.len() + 1));
            (x.min(y), x.max(y))
        };
        let slice = &content[i..j];
        prop_assume!(slice.chars().any(|c| c.is_ascii_alphanumeric()));
        let c = chunk("c1", "d1", "acme", 0, &content);
        let m = compute_grounding_score(slice, &[c], &ValidationConfig::default());
        prop_assert_eq!(m.score, 1.0);
    }

    #[test]
    fn extra_chunks_never_lower_the_score(response in words(), a in words(), b in words()) {
        let response = response.join(" ");
        let one = [chunk("a", "d1", "acme", 0, &a.join(" "))];
        let two = [one[0].clone(), chunk("b", "d2", "acme", 0, &b.join(" "))];
        let config = ValidationConfig::default();
        let s1 = compute_grounding_score(&response, &one, &config).score;
        let s2 = compute_grounding_score(&response, &two, &config).score;
        prop_assert!(s2 >= s1);
    }
}
