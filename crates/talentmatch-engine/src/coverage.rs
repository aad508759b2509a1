//! User–job coverage aggregation
//!
//! Each user skill is matched to its closest required skill. The best
//! matches are ranked and the top `|J|` are averaged over `|J|`, so a user
//! with fewer skills than the job requires can never reach 1.0.

use crate::error::Result;
use crate::similarity::closure_similarity;
use std::sync::Arc;
use talentmatch_taxonomy::{AncestorClosure, AncestorResolver, TaxonomyAccess};
use talentmatch_types::SkillSet;

/// Coverage of a job's requirements by a user's skills.
///
/// `None` when either side is empty: such pairs are not scored at all.
pub fn coverage(user: &[Arc<AncestorClosure>], job: &[Arc<AncestorClosure>]) -> Option<f64> {
    if user.is_empty() || job.is_empty() {
        return None;
    }

    let best_matches = user
        .iter()
        .map(|u| {
            job.iter()
                .map(|j| closure_similarity(u, j))
                .fold(0.0, f64::max)
        })
        .collect();

    Some(aggregate_best_matches(best_matches, job.len()))
}

/// Sum of the `required` highest values divided by `required`.
///
/// Fewer values than `required` are not padded; the divisor stays
/// `required`.
pub fn aggregate_best_matches(mut best_matches: Vec<f64>, required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }

    best_matches.sort_by(|a, b| b.total_cmp(a));
    let total: f64 = best_matches.iter().take(required).sum();

    #[allow(clippy::cast_precision_loss)]
    let required = required as f64;
    total / required
}

/// Resolve closures for both skill sets and score them
pub fn skill_set_coverage<T: TaxonomyAccess>(
    resolver: &AncestorResolver<T>,
    user_skills: &SkillSet,
    job_skills: &SkillSet,
    max_levels: usize,
) -> Result<Option<f64>> {
    if user_skills.is_empty() || job_skills.is_empty() {
        return Ok(None);
    }

    let resolve = |skills: &SkillSet| -> Result<Vec<Arc<AncestorClosure>>> {
        skills
            .iter()
            .map(|skill| Ok(resolver.closure(skill, max_levels)?))
            .collect()
    };

    let user = resolve(user_skills)?;
    let job = resolve(job_skills)?;
    Ok(coverage(&user, &job))
}
