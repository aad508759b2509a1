//! Match orchestration
//!
//! Enumerates every eligible user × job pair, scores it and keeps the pairs
//! with positive coverage. Closures are resolved once per profile through
//! the shared memo cache; pair scoring then fans out over rayon.

use crate::coverage::coverage;
use crate::error::Result;
use chrono::Utc;
use rayon::prelude::*;
use std::sync::Arc;
use talentmatch_taxonomy::{AncestorClosure, AncestorResolver, CacheStats, TaxonomyAccess, DEFAULT_MAX_LEVELS};
use talentmatch_types::{JobPosting, MatchClass, MatchResult, MatchRun, SkillSet, UserProfile};
use tracing::{debug, info};

/// Matching run settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingConfig {
    /// Hops walked up the taxonomy per skill
    pub max_levels: usize,
    /// Worker threads; 0 uses the global rayon pool
    pub threads: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_levels: DEFAULT_MAX_LEVELS,
            threads: 0,
        }
    }
}

/// Counters describing one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub eligible_users: usize,
    pub eligible_jobs: usize,
    pub pairs_scored: usize,
    pub strong: usize,
    pub mid: usize,
    pub weak: usize,
    pub cache: CacheStats,
}

impl MatchReport {
    /// Number of emitted matches
    pub fn matches(&self) -> usize {
        self.strong + self.mid + self.weak
    }

    fn count(&mut self, results: &[MatchResult]) {
        for result in results {
            match result.classification {
                MatchClass::Strong => self.strong += 1,
                MatchClass::Mid => self.mid += 1,
                MatchClass::Weak => self.weak += 1,
            }
        }
    }
}

/// Result set of a run plus its counters
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub run: MatchRun,
    pub report: MatchReport,
}

/// Scores users against jobs over one taxonomy snapshot.
///
/// The closure cache lives as long as the orchestrator; create one per run
/// so a changed taxonomy is never served stale closures.
pub struct MatchOrchestrator<T> {
    resolver: AncestorResolver<T>,
    config: MatchingConfig,
}

impl<T: TaxonomyAccess> MatchOrchestrator<T> {
    pub fn new(taxonomy: T, config: MatchingConfig) -> Self {
        Self {
            resolver: AncestorResolver::new(taxonomy),
            config,
        }
    }

    pub fn resolver(&self) -> &AncestorResolver<T> {
        &self.resolver
    }

    pub fn config(&self) -> MatchingConfig {
        self.config
    }

    /// Score every eligible pair. Results are ordered by similarity
    /// descending, then user id, then job id.
    pub fn run(&self, users: &[UserProfile], jobs: &[JobPosting]) -> Result<MatchOutcome> {
        if self.config.threads == 0 {
            return self.run_in_current_pool(users, jobs);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .thread_name(|i| format!("talentmatch-score-{i}"))
            .build()?;
        pool.install(|| self.run_in_current_pool(users, jobs))
    }

    fn run_in_current_pool(&self, users: &[UserProfile], jobs: &[JobPosting]) -> Result<MatchOutcome> {
        let started_at = Utc::now();

        let users: Vec<&UserProfile> = users.iter().filter(|u| u.is_eligible()).collect();
        let jobs: Vec<&JobPosting> = jobs.iter().filter(|j| j.is_eligible()).collect();
        info!(
            "Matching {} users against {} jobs (max_levels={})",
            users.len(),
            jobs.len(),
            self.config.max_levels
        );

        let user_closures = users
            .par_iter()
            .map(|user| Ok((*user, self.closures(&user.skills)?)))
            .collect::<Result<Vec<_>>>()?;
        let job_closures = jobs
            .par_iter()
            .map(|job| Ok((*job, self.closures(&job.required_skills)?)))
            .collect::<Result<Vec<_>>>()?;

        let mut results: Vec<MatchResult> = user_closures
            .par_iter()
            .flat_map_iter(|(user, user_skills)| {
                job_closures.iter().filter_map(move |(job, job_skills)| {
                    let score = coverage(user_skills, job_skills)?;
                    (score > 0.0).then(|| MatchResult::new(user.id.clone(), job.id.clone(), score))
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.user_id.cmp(&b.user_id))
                .then_with(|| a.job_id.cmp(&b.job_id))
        });

        let mut report = MatchReport {
            eligible_users: users.len(),
            eligible_jobs: jobs.len(),
            pairs_scored: users.len() * jobs.len(),
            cache: self.resolver.stats(),
            ..MatchReport::default()
        };
        report.count(&results);

        debug!(
            "Closure cache: {} entries, {} hits, {} misses",
            report.cache.entries, report.cache.hits, report.cache.misses
        );
        info!(
            "Scored {} pairs: {} matches ({} strong, {} mid, {} weak)",
            report.pairs_scored,
            report.matches(),
            report.strong,
            report.mid,
            report.weak
        );

        Ok(MatchOutcome {
            run: MatchRun::new(started_at, results),
            report,
        })
    }

    fn closures(&self, skills: &SkillSet) -> Result<Vec<Arc<AncestorClosure>>> {
        skills
            .iter()
            .map(|skill| Ok(self.resolver.closure(skill, self.config.max_levels)?))
            .collect()
    }
}

/// Score `users` against `jobs` with default settings
pub fn run_matching<T: TaxonomyAccess>(
    taxonomy: T,
    users: &[UserProfile],
    jobs: &[JobPosting],
) -> Result<Vec<MatchResult>> {
    let outcome = MatchOrchestrator::new(taxonomy, MatchingConfig::default()).run(users, jobs)?;
    Ok(outcome.run.results)
}
