//! Skill-name resolution
//!
//! Maps free-form skill names coming from job postings and user profiles to
//! taxonomy ids. Lookup is case-insensitive against the display form of each
//! id (underscores shown as spaces); a small static alias table covers names
//! whose punctuation cannot appear in an id. Raw names are only lowercased.

use crate::graph::Taxonomy;
use std::collections::HashMap;
use talentmatch_types::{SkillId, SkillSet};
use tracing::debug;

/// Raw name → taxonomy name, applied before the direct lookup
const SKILL_ALIASES: &[(&str, &str)] = &[("c#", "cs"), ("ci/cd", "ci_cd"), ("pl/sql", "pl_sql")];

/// Outcome of resolving a batch of raw names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Names that resolved to a taxonomy node
    pub matched: SkillSet,
    /// Names with no taxonomy node, in input order
    pub unmapped: Vec<String>,
}

/// Case-insensitive name index over a taxonomy
#[derive(Debug, Clone, Default)]
pub struct SkillIndex {
    by_name: HashMap<String, SkillId>,
}

impl SkillIndex {
    /// Index every node of the taxonomy
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Self {
        Self::from_skills(taxonomy.skills().cloned())
    }

    /// Index an explicit list of nodes
    pub fn from_skills<I>(skills: I) -> Self
    where
        I: IntoIterator<Item = SkillId>,
    {
        let by_name: HashMap<_, _> = skills
            .into_iter()
            .filter(|skill| !skill.is_root())
            .map(|skill| (index_key(&skill), skill))
            .collect();

        debug!("Skill index built with {} names", by_name.len());
        Self { by_name }
    }

    /// Resolve one raw name
    pub fn resolve(&self, raw: &str) -> Option<SkillId> {
        let key = raw.to_lowercase();
        if key.trim().is_empty() {
            return None;
        }

        let aliased = SKILL_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .and_then(|(_, target)| self.by_name.get(&index_key(&SkillId::from(*target))));

        aliased.or_else(|| self.by_name.get(&key)).cloned()
    }

    /// Resolve a batch, keeping the names that did not map
    pub fn resolve_all<I, S>(&self, raw_names: I) -> Resolution
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolution = Resolution::default();
        for raw in raw_names {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            match self.resolve(raw) {
                Some(skill) => {
                    resolution.matched.insert(skill);
                }
                None => resolution.unmapped.push(raw.to_string()),
            }
        }
        resolution
    }

    /// Number of indexed names
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Lowercased display name of an indexed id
fn index_key(skill: &SkillId) -> String {
    skill.display_name().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> SkillIndex {
        SkillIndex::from_skills(
            ["python", "machine_learning", "cs", "ci_cd", "pl_sql", "Skills"]
                .into_iter()
                .map(SkillId::from),
        )
    }

    #[test]
    fn test_lookup_is_case_insensitive_on_display_names() {
        let index = index();
        assert_eq!(index.resolve("Python"), Some("python".into()));
        assert_eq!(index.resolve("Machine Learning"), Some("machine_learning".into()));
    }

    #[test]
    fn test_raw_names_are_only_lowercased() {
        let index = index();
        assert_eq!(index.resolve("machine_learning"), None);
        assert_eq!(index.resolve("Machine  Learning"), None);
        assert_eq!(index.resolve(" python"), None);
    }

    #[test]
    fn test_aliases() {
        let index = index();
        assert_eq!(index.resolve("C#"), Some("cs".into()));
        assert_eq!(index.resolve("CI/CD"), Some("ci_cd".into()));
        assert_eq!(index.resolve("PL/SQL"), Some("pl_sql".into()));
    }

    #[test]
    fn test_alias_falls_back_to_direct_lookup() {
        let index = SkillIndex::from_skills([SkillId::from("c#")]);
        assert_eq!(index.resolve("c#"), Some("c#".into()));
    }

    #[test]
    fn test_root_is_not_indexed() {
        assert_eq!(index().resolve("skills"), None);
        assert_eq!(index().len(), 5);
    }

    #[test]
    fn test_resolve_all_splits_unmapped() {
        let resolution = index().resolve_all(["Python", "Kubernetes", "", "python", "C#"]);
        assert_eq!(
            resolution.matched,
            ["python", "cs"].into_iter().map(SkillId::from).collect::<SkillSet>()
        );
        assert_eq!(resolution.unmapped, vec!["Kubernetes".to_string()]);
    }
}
