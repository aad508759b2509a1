//! Loading jobs, users and the taxonomy from files into the store.
//!
//! Raw skill names are mapped onto taxonomy nodes through [`SkillIndex`].
//! Job skills that do not map are kept as additional skills; user skills
//! that do not map are dropped.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use talentmatch_persistence::SqliteStore;
use talentmatch_taxonomy::{SkillIndex, Taxonomy};
use talentmatch_types::{JobPosting, UserProfile};
use tracing::{debug, info, warn};

/// One entry of a jobs file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default, rename = "jobUrl")]
    pub job_url_camel: Option<String>,
    #[serde(default, rename = "jobTitle")]
    pub job_title: Option<String>,
    #[serde(default, rename = "companyName")]
    pub company_name: Option<String>,
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,
}

impl RawJob {
    fn url(&self) -> Option<&str> {
        self.job_url
            .as_deref()
            .or(self.job_url_camel.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Jobs files are either a bare array or wrapped in `{"result": [...]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JobsFile {
    List(Vec<RawJob>),
    Wrapped { result: Vec<RawJob> },
}

/// One entry of a users file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

pub fn parse_jobs(content: &str) -> Result<Vec<RawJob>> {
    let file: JobsFile = serde_json::from_str(content).context("Invalid jobs JSON")?;
    Ok(match file {
        JobsFile::List(jobs) | JobsFile::Wrapped { result: jobs } => jobs,
    })
}

pub fn parse_users(content: &str) -> Result<Vec<RawUser>> {
    serde_json::from_str(content).context("Invalid users JSON")
}

/// Last path segment of a job URL, without query or fragment
pub fn job_key_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// A job mapped onto the taxonomy
#[derive(Debug, Clone)]
pub struct ImportedJob {
    pub job: JobPosting,
    pub unmapped: Vec<String>,
}

/// A user mapped onto the taxonomy
#[derive(Debug, Clone)]
pub struct ImportedUser {
    pub user: UserProfile,
    pub unmapped: Vec<String>,
}

/// Counters for one imported file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub unmapped_skills: usize,
}

/// Maps raw records onto taxonomy-backed profiles
pub struct Importer {
    index: SkillIndex,
    non_alnum: Regex,
}

impl Importer {
    pub fn new(index: SkillIndex) -> Result<Self> {
        let non_alnum = Regex::new(r"[^A-Za-z0-9]+").context("Invalid user id pattern")?;
        Ok(Self { index, non_alnum })
    }

    /// `User_` followed by the email with every non-alphanumeric run
    /// replaced by `_`
    pub fn user_id(&self, email: &str) -> String {
        let sanitized = self.non_alnum.replace_all(email, "_");
        let sanitized = sanitized.trim_matches('_');
        if sanitized.is_empty() {
            "User_User".to_string()
        } else {
            format!("User_{sanitized}")
        }
    }

    /// Returns `None` for records without a usable URL
    pub fn job(&self, raw: &RawJob) -> Option<ImportedJob> {
        let url = raw.url()?;
        let key = job_key_from_url(url)?;

        let resolution = self
            .index
            .resolve_all(raw.required_skills.iter().flatten());

        let mut job = JobPosting::new(format!("Job_{key}"), url);
        job.title = raw.job_title.clone();
        job.company = raw.company_name.clone();
        job.required_skills = resolution.matched;

        Some(ImportedJob {
            job,
            unmapped: resolution.unmapped,
        })
    }

    /// Returns `None` for records without an email
    pub fn user(&self, raw: &RawUser) -> Option<ImportedUser> {
        let email = raw.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;

        let resolution = self.index.resolve_all(&raw.skills);
        if !resolution.unmapped.is_empty() {
            debug!(
                "User {} has {} skills outside the taxonomy: {:?}",
                email,
                resolution.unmapped.len(),
                resolution.unmapped
            );
        }

        let mut user = UserProfile::new(self.user_id(email), email);
        user.skills = resolution.matched;
        Some(ImportedUser {
            user,
            unmapped: resolution.unmapped,
        })
    }

    pub async fn import_jobs(&self, store: &SqliteStore, path: &Path) -> Result<ImportSummary> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read jobs file {}", path.display()))?;

        let mut summary = ImportSummary::default();
        for raw in parse_jobs(&content)? {
            let Some(imported) = self.job(&raw) else {
                summary.skipped += 1;
                continue;
            };

            store.save_job(&imported.job).await?;
            store
                .save_additional_skills(&imported.job.id, &imported.unmapped)
                .await?;
            summary.unmapped_skills += imported.unmapped.len();
            summary.imported += 1;
        }

        if summary.skipped > 0 {
            warn!("Skipped {} jobs without a URL", summary.skipped);
        }
        info!(
            "Imported {} jobs from {} ({} unmapped skills kept as additional)",
            summary.imported,
            path.display(),
            summary.unmapped_skills
        );
        Ok(summary)
    }

    pub async fn import_users(&self, store: &SqliteStore, path: &Path) -> Result<ImportSummary> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read users file {}", path.display()))?;

        let mut summary = ImportSummary::default();
        for raw in parse_users(&content)? {
            let Some(imported) = self.user(&raw) else {
                summary.skipped += 1;
                continue;
            };

            summary.unmapped_skills += imported.unmapped.len();
            store.save_user(&imported.user).await?;
            summary.imported += 1;
        }

        if summary.skipped > 0 {
            warn!("Skipped {} users without an email", summary.skipped);
        }
        info!("Imported {} users from {}", summary.imported, path.display());
        Ok(summary)
    }
}

/// Replace the stored taxonomy with the contents of a YAML file
pub async fn import_taxonomy(store: &SqliteStore, path: &Path) -> Result<Taxonomy> {
    let taxonomy = Taxonomy::load(path)?;
    store.save_taxonomy(&taxonomy).await?;
    info!(
        "Imported taxonomy from {}: {} skills, {} edges",
        path.display(),
        taxonomy.len(),
        taxonomy.edge_count()
    );
    Ok(taxonomy)
}
