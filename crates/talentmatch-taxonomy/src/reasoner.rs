//! Optional reasoning step run on the taxonomy before matching.
//!
//! A reasoner may extend or rewrite the hierarchy. Its output is consumed
//! as an ordinary taxonomy. A failing reasoner never blocks a run: the
//! unreasoned taxonomy is used instead.

use crate::error::Result;
use crate::graph::Taxonomy;
use tracing::{info, warn};

/// Transforms a taxonomy ahead of a matching run
pub trait Reasoner: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Produce the reasoned taxonomy
    fn reason(&self, taxonomy: &Taxonomy) -> Result<Taxonomy>;
}

/// Run `reasoner` if present, falling back to `taxonomy` on failure
pub fn apply_reasoning(taxonomy: Taxonomy, reasoner: Option<&dyn Reasoner>) -> Taxonomy {
    let Some(reasoner) = reasoner else {
        return taxonomy;
    };

    match reasoner.reason(&taxonomy) {
        Ok(reasoned) => {
            info!(
                "Reasoner '{}' produced {} skills, {} edges (was {}, {})",
                reasoner.name(),
                reasoned.len(),
                reasoned.edge_count(),
                taxonomy.len(),
                taxonomy.edge_count()
            );
            reasoned
        }
        Err(e) => {
            warn!(
                "Reasoner '{}' failed, continuing without reasoning: {}",
                reasoner.name(),
                e
            );
            taxonomy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaxonomyError;
    use talentmatch_types::SkillId;

    struct AddEdge;

    impl Reasoner for AddEdge {
        fn name(&self) -> &str {
            "add-edge"
        }

        fn reason(&self, taxonomy: &Taxonomy) -> Result<Taxonomy> {
            let mut reasoned = taxonomy.clone();
            reasoned.add_edge("languages".into(), "rust".into());
            Ok(reasoned)
        }
    }

    struct Failing;

    impl Reasoner for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn reason(&self, _taxonomy: &Taxonomy) -> Result<Taxonomy> {
            Err(TaxonomyError::Reasoning {
                reasoner: "failing".into(),
                reason: "inconsistent ontology".into(),
            })
        }
    }

    fn base() -> Taxonomy {
        Taxonomy::from_edges([(SkillId::from("systems"), SkillId::from("rust"))])
    }

    #[test]
    fn test_without_reasoner_is_identity() {
        assert_eq!(apply_reasoning(base(), None).edge_count(), 1);
    }

    #[test]
    fn test_reasoned_taxonomy_is_used() {
        let reasoned = apply_reasoning(base(), Some(&AddEdge));
        assert_eq!(reasoned.edge_count(), 2);
    }

    #[test]
    fn test_failure_falls_back() {
        let fallback = apply_reasoning(base(), Some(&Failing));
        assert_eq!(fallback.edge_count(), 1);
        assert!(fallback.contains(&"systems".into()));
    }
}
