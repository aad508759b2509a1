//! In-memory taxonomy snapshot
//!
//! The taxonomy is read once per run from the store (or a YAML file) and
//! then served from memory. Edges follow the `parentOf(parent, child)`
//! relation; nothing here assumes the graph is acyclic.

use crate::error::{Result, TaxonomyError};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use talentmatch_types::SkillId;
use tracing::debug;

/// Read-only capability to look up the direct parents of a skill
pub trait TaxonomyAccess: Send + Sync {
    /// Direct parents of `skill`. Unknown skills have no parents.
    fn direct_parents(&self, skill: &SkillId) -> Result<Vec<SkillId>>;
}

impl<T: TaxonomyAccess + ?Sized> TaxonomyAccess for Arc<T> {
    fn direct_parents(&self, skill: &SkillId) -> Result<Vec<SkillId>> {
        (**self).direct_parents(skill)
    }
}

impl<T: TaxonomyAccess + ?Sized> TaxonomyAccess for &T {
    fn direct_parents(&self, skill: &SkillId) -> Result<Vec<SkillId>> {
        (**self).direct_parents(skill)
    }
}

/// YAML layout: every skill maps to the list of its parents
#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    skills: BTreeMap<String, Vec<String>>,
}

/// Skill hierarchy held in memory
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    /// child → direct parents
    parents: BTreeMap<SkillId, BTreeSet<SkillId>>,
    /// Every node seen, with or without edges
    skills: BTreeSet<SkillId>,
}

impl Taxonomy {
    /// Create an empty taxonomy
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(parent, child)` pairs
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (SkillId, SkillId)>,
    {
        let mut taxonomy = Self::new();
        for (parent, child) in edges {
            taxonomy.add_edge(parent, child);
        }
        taxonomy
    }

    /// Parse the YAML form:
    ///
    /// ```yaml
    /// skills:
    ///   programming_languages: [Skills]
    ///   python: [programming_languages]
    /// ```
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: TaxonomyFile = serde_yaml::from_str(content)?;
        let mut taxonomy = Self::new();

        for (skill, parents) in file.skills {
            let child = SkillId::new(skill);
            taxonomy.add_skill(child.clone());
            for parent in parents {
                taxonomy.add_edge(SkillId::new(parent), child.clone());
            }
        }

        Ok(taxonomy)
    }

    /// Load a YAML taxonomy file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TaxonomyError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let taxonomy = Self::from_yaml_str(&content)?;
        debug!(
            "Loaded taxonomy from {:?}: {} skills, {} edges",
            path,
            taxonomy.len(),
            taxonomy.edge_count()
        );
        Ok(taxonomy)
    }

    /// Register a node without edges
    pub fn add_skill(&mut self, skill: SkillId) {
        self.skills.insert(skill);
    }

    /// Record `parentOf(parent, child)`
    pub fn add_edge(&mut self, parent: SkillId, child: SkillId) {
        self.skills.insert(parent.clone());
        self.skills.insert(child.clone());
        self.parents.entry(child).or_default().insert(parent);
    }

    /// Direct parents of a skill, empty for unknown skills
    pub fn parents(&self, skill: &SkillId) -> impl Iterator<Item = &SkillId> {
        self.parents.get(skill).into_iter().flatten()
    }

    /// Check whether a node is known
    pub fn contains(&self, skill: &SkillId) -> bool {
        self.skills.contains(skill)
    }

    /// All known nodes in id order
    pub fn skills(&self) -> impl Iterator<Item = &SkillId> {
        self.skills.iter()
    }

    /// All `(parent, child)` edges ordered by child then parent
    pub fn edges(&self) -> impl Iterator<Item = (&SkillId, &SkillId)> {
        self.parents
            .iter()
            .flat_map(|(child, parents)| parents.iter().map(move |parent| (parent, child)))
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.parents.values().map(BTreeSet::len).sum()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if the taxonomy has no nodes
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl TaxonomyAccess for Taxonomy {
    fn direct_parents(&self, skill: &SkillId) -> Result<Vec<SkillId>> {
        Ok(self.parents(skill).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_add_edge_registers_both_nodes() {
        let mut taxonomy = Taxonomy::new();
        taxonomy.add_edge("languages".into(), "rust".into());

        assert!(taxonomy.contains(&"languages".into()));
        assert!(taxonomy.contains(&"rust".into()));
        assert_eq!(taxonomy.edge_count(), 1);
        assert_eq!(
            taxonomy.direct_parents(&"rust".into()).unwrap(),
            vec![SkillId::from("languages")]
        );
    }

    #[test]
    fn test_unknown_skill_has_no_parents() {
        let taxonomy = Taxonomy::new();
        assert!(taxonomy.direct_parents(&"cobol".into()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
skills:
  programming_languages: [Skills]
  python: [programming_languages]
  django: [python, web_frameworks]
  soft_skills: []
"#;
        let taxonomy = Taxonomy::from_yaml_str(yaml).unwrap();

        assert!(taxonomy.contains(&"soft_skills".into()));
        assert!(taxonomy.contains(&"web_frameworks".into()));
        assert_eq!(taxonomy.edge_count(), 4);

        let parents: Vec<_> = taxonomy.parents(&"django".into()).cloned().collect();
        assert_eq!(parents, vec![SkillId::from("python"), SkillId::from("web_frameworks")]);
    }

    #[test]
    fn test_edges_are_parent_child_pairs() {
        let taxonomy = Taxonomy::from_edges([
            (SkillId::from("b"), SkillId::from("c")),
            (SkillId::from("a"), SkillId::from("b")),
        ]);
        let edges: Vec<_> = taxonomy
            .edges()
            .map(|(p, c)| (p.as_str().to_string(), c.as_str().to_string()))
            .collect();
        assert_eq!(
            edges,
            vec![("a".to_string(), "b".to_string()), ("b".to_string(), "c".to_string())]
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "skills:\n  rust: [systems]").unwrap();

        let taxonomy = Taxonomy::load(file.path()).unwrap();
        assert_eq!(taxonomy.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Taxonomy::load(Path::new("/nonexistent/taxonomy.yaml")).unwrap_err();
        assert!(matches!(err, TaxonomyError::Read { .. }));
    }
}
