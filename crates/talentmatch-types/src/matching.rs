use crate::{JobId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Scores at or above this are strong matches
pub const STRONG_THRESHOLD: f64 = 0.65;

/// Scores strictly above this (and below `STRONG_THRESHOLD`) are mid matches
pub const MID_THRESHOLD: f64 = 0.35;

/// Discretized coverage score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchClass {
    #[serde(rename = "Strong Match")]
    Strong,
    #[serde(rename = "Mid Match")]
    Mid,
    #[serde(rename = "Weak Match")]
    Weak,
}

impl MatchClass {
    /// Classify a coverage score. Boundaries: 0.65 is Strong, 0.35 is Weak.
    pub fn classify(score: f64) -> Self {
        if score >= STRONG_THRESHOLD {
            Self::Strong
        } else if score > MID_THRESHOLD {
            Self::Mid
        } else {
            Self::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong Match",
            Self::Mid => "Mid Match",
            Self::Weak => "Weak Match",
        }
    }

    /// Inverse of [`MatchClass::label`]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Strong Match" => Some(Self::Strong),
            "Mid Match" => Some(Self::Mid),
            "Weak Match" => Some(Self::Weak),
            _ => None,
        }
    }
}

impl fmt::Display for MatchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score of one user against one job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub user_id: UserId,
    pub job_id: JobId,
    pub similarity: f64,
    pub classification: MatchClass,
}

impl MatchResult {
    pub fn new(user_id: UserId, job_id: JobId, similarity: f64) -> Self {
        Self {
            user_id,
            job_id,
            similarity,
            classification: MatchClass::classify(similarity),
        }
    }
}

/// The complete output of one matching run.
///
/// A run's results replace every previously stored result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRun {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<MatchResult>,
}

impl MatchRun {
    pub fn new(started_at: DateTime<Utc>, results: Vec<MatchResult>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at,
            finished_at: Utc::now(),
            results,
        }
    }
}

/// A stored match as shown to a user, joined with job details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMatch {
    pub job_id: JobId,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub similarity: f64,
    pub match_type: MatchClass,
}
