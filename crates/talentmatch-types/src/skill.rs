use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of the universal skill superclass.
///
/// Every ancestor closure contains it, so any two skills share at least
/// one ancestor.
pub const ROOT_SKILL: &str = "Skills";

/// Stable identifier of a taxonomy node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

/// Skills attached to a user or required by a job
pub type SkillSet = BTreeSet<SkillId>;

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The root sentinel
    pub fn root() -> Self {
        Self(ROOT_SKILL.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_SKILL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable name: underscores become spaces
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SkillId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SkillId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
