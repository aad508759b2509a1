//! End-to-end matching runs over a small taxonomy
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::sync::Arc;

use talentmatch_engine::{coverage, run_matching, MatchOrchestrator, MatchingConfig};
use talentmatch_taxonomy::{AncestorClosure, Taxonomy};
use talentmatch_types::{JobPosting, MatchClass, SkillId, UserProfile};

fn taxonomy() -> Taxonomy {
    Taxonomy::from_yaml_str(
        r#"
skills:
  programming_languages: [Skills]
  compiled_languages: [programming_languages]
  rust: [compiled_languages]
  go: [compiled_languages]
  python: [programming_languages]
  databases: [Skills]
  postgres: [databases]
  sqlite: [databases]
  communication: [Skills]
"#,
    )
    .unwrap()
}

fn users() -> Vec<UserProfile> {
    vec![
        UserProfile::new("User_ana", "ana@example.com").with_skills(["rust", "postgres"]),
        UserProfile::new("User_ben", "ben@example.com").with_skills(["go"]),
        UserProfile::new("User_cy", "cy@example.com").with_skills(["python", "sqlite", "communication"]),
        UserProfile::new("User_empty", "empty@example.com"),
    ]
}

fn jobs() -> Vec<JobPosting> {
    vec![
        JobPosting::new("Job_1", "https://jobs.example.com/view/1").with_skills(["rust", "postgres"]),
        JobPosting::new("Job_2", "https://jobs.example.com/view/2").with_skills(["python"]),
        JobPosting::new("Job_3", "https://jobs.example.com/view/3"),
    ]
}

#[test]
fn test_results_are_sorted_and_classified() {
    let results = run_matching(taxonomy(), &users(), &jobs()).unwrap();

    // 3 eligible users × 2 eligible jobs, every pair shares at least the root
    assert_eq!(results.len(), 6);
    assert!(results
        .windows(2)
        .all(|w| w[0].similarity >= w[1].similarity));
    assert!(results.iter().all(|r| r.similarity > 0.0 && r.similarity <= 1.0));
    assert!(results
        .iter()
        .all(|r| r.classification == MatchClass::classify(r.similarity)));

    let best = &results[0];
    assert_eq!(best.similarity, 1.0);
    assert_eq!(best.classification, MatchClass::Strong);

    assert!(results.iter().all(|r| r.user_id.as_str() != "User_empty"));
    assert!(results.iter().all(|r| r.job_id.as_str() != "Job_3"));
}

#[test]
fn test_sibling_skill_scores_below_exact_skill() {
    let results = run_matching(taxonomy(), &users(), &jobs()).unwrap();
    let score = |user: &str, job: &str| {
        results
            .iter()
            .find(|r| r.user_id.as_str() == user && r.job_id.as_str() == job)
            .map(|r| r.similarity)
            .unwrap()
    };

    assert_eq!(score("User_ana", "Job_1"), 1.0);
    assert!(score("User_ben", "Job_1") < score("User_ana", "Job_1"));
    assert!(score("User_ben", "Job_1") > 0.0);
}

#[test]
fn test_partial_coverage_is_mid_match() {
    let user = UserProfile::new("User_dev", "dev@example.com").with_skills(["rust", "go", "python"]);
    let job = JobPosting::new("Job_wide", "https://jobs.example.com/view/wide")
        .with_skills(["rust", "go", "python", "postgres", "sqlite"]);

    let results = run_matching(taxonomy(), &[user], &[job]).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].similarity, 0.6);
    assert_eq!(results[0].classification, MatchClass::Mid);
}

#[test]
fn test_rerun_is_identical() {
    let config = MatchingConfig::default();
    let first = MatchOrchestrator::new(taxonomy(), config).run(&users(), &jobs()).unwrap();
    let second = MatchOrchestrator::new(taxonomy(), config).run(&users(), &jobs()).unwrap();

    assert_eq!(first.run.results, second.run.results);
    assert_eq!(first.report.eligible_users, 3);
    assert_eq!(first.report.eligible_jobs, 2);
}

#[test]
fn test_cyclic_taxonomy_still_scores() {
    let taxonomy = Taxonomy::from_edges([
        (SkillId::from("b"), SkillId::from("a")),
        (SkillId::from("a"), SkillId::from("b")),
    ]);
    let user = UserProfile::new("u", "u@example.com").with_skills(["a"]);
    let job = JobPosting::new("j", "https://jobs.example.com/view/j").with_skills(["b"]);

    let results = run_matching(taxonomy, &[user], &[job]).unwrap();
    // both closures are {a, b, Skills}
    assert_eq!(results[0].similarity, 1.0);
}

#[test]
fn test_disjoint_closures_cover_nothing() {
    let user = vec![Arc::new(AncestorClosure::from_features(SkillId::from("x"), std::iter::empty()))];
    let job = vec![Arc::new(AncestorClosure::from_features(SkillId::from("y"), std::iter::empty()))];

    assert_eq!(coverage(&user, &job), Some(0.0));
    assert_eq!(coverage(&[], &job), None);
}
