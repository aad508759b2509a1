//! Property tests for the similarity and coverage measures
#![allow(clippy::float_cmp)]

use proptest::prelude::*;
use std::collections::HashSet;

use talentmatch_engine::{aggregate_best_matches, sanchez_similarity};
use talentmatch_types::SkillId;

fn feature_set() -> impl Strategy<Value = HashSet<SkillId>> {
    prop::collection::hash_set("[a-f]", 1..6)
        .prop_map(|names| names.into_iter().map(SkillId::from).collect())
}

proptest! {
    #[test]
    fn test_identity(a in feature_set()) {
        prop_assert_eq!(sanchez_similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_symmetry(a in feature_set(), b in feature_set()) {
        prop_assert_eq!(sanchez_similarity(&a, &b), sanchez_similarity(&b, &a));
    }

    #[test]
    fn test_range(a in feature_set(), b in feature_set()) {
        let score = sanchez_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));

        let disjoint = a.is_disjoint(&b);
        prop_assert_eq!(score == 0.0, disjoint);
    }

    #[test]
    fn test_coverage_range(
        best in prop::collection::vec(0.0f64..=1.0, 1..8),
        required in 1usize..8,
    ) {
        let score = aggregate_best_matches(best.clone(), required);
        prop_assert!((0.0..=1.0).contains(&score));

        #[allow(clippy::cast_precision_loss)]
        let cap = best.len().min(required) as f64 / required as f64;
        prop_assert!(score <= cap + 1e-12);
    }
}
