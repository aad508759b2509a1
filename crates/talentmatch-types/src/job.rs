use crate::{SkillId, SkillSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Job ID type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A job opening and the skills it requires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub url: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub required_skills: SkillSet,
}

impl JobPosting {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: JobId::new(id),
            url: url.into(),
            title: None,
            company: None,
            required_skills: SkillSet::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>, company: Option<String>) -> Self {
        self.title = Some(title.into());
        self.company = company;
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SkillId>,
    {
        self.required_skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Jobs without requirements are never scored
    pub fn is_eligible(&self) -> bool {
        !self.required_skills.is_empty()
    }
}
