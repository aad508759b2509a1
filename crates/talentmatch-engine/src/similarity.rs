//! Sanchez information-content similarity between two feature sets

use std::collections::HashSet;
use talentmatch_taxonomy::AncestorClosure;
use talentmatch_types::SkillId;

/// `1 - log2(1 + (|A\B| + |B\A|) / (|A\B| + |B\A| + |A∩B|))`
///
/// Equal sets score exactly `1.0` and disjoint sets exactly `0.0`; anything
/// else lands in `(0, 1)`. Symmetric in its arguments.
pub fn sanchez_similarity(a: &HashSet<SkillId>, b: &HashSet<SkillId>) -> f64 {
    if a == b {
        return 1.0;
    }

    let shared = a.intersection(b).count();
    if shared == 0 {
        return 0.0;
    }

    let a_only = a.len() - shared;
    let b_only = b.len() - shared;

    #[allow(clippy::cast_precision_loss)]
    let numerator = (a_only + b_only) as f64;
    #[allow(clippy::cast_precision_loss)]
    let denominator = (a_only + b_only + shared) as f64;

    1.0 - (1.0 + numerator / denominator).log2()
}

/// Similarity of two skills through their ancestor closures
pub fn closure_similarity(a: &AncestorClosure, b: &AncestorClosure) -> f64 {
    sanchez_similarity(a.features(), b.features())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<SkillId> {
        names.iter().map(|n| SkillId::from(*n)).collect()
    }

    #[test]
    fn test_identity_is_exact() {
        let a = set(&["rust", "systems", "Skills"]);
        assert_eq!(sanchez_similarity(&a, &a.clone()), 1.0);
    }

    #[test]
    fn test_worked_example() {
        let a = set(&["X", "Root"]);
        let b = set(&["Y", "Root"]);
        let expected = 1.0 - (1.0 + 2.0_f64 / 3.0).log2();

        assert_eq!(sanchez_similarity(&a, &b), expected);
        assert!((sanchez_similarity(&a, &b) - 0.263).abs() < 1e-3);
    }

    #[test]
    fn test_disjoint_is_zero() {
        assert_eq!(sanchez_similarity(&set(&["a"]), &set(&["b"])), 0.0);
    }

    #[test]
    fn test_subset_scores_between_bounds() {
        let parent = set(&["languages", "Skills"]);
        let child = set(&["rust", "languages", "Skills"]);
        let score = sanchez_similarity(&child, &parent);

        // one element differs out of three
        assert_eq!(score, 1.0 - (1.0 + 1.0_f64 / 3.0).log2());
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_symmetric() {
        let a = set(&["rust", "systems", "languages", "Skills"]);
        let b = set(&["go", "languages", "Skills"]);
        assert_eq!(sanchez_similarity(&a, &b), sanchez_similarity(&b, &a));
    }

    #[test]
    fn test_siblings_closer_than_cousins() {
        let rust = set(&["rust", "compiled", "languages", "Skills"]);
        let go = set(&["go", "compiled", "languages", "Skills"]);
        let python = set(&["python", "interpreted", "languages", "Skills"]);

        assert!(sanchez_similarity(&rust, &go) > sanchez_similarity(&rust, &python));
    }
}
