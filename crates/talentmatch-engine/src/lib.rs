//! `TalentMatch` Engine
//!
//! Scores every user against every job over a skill taxonomy.
//!
//! ## Pipeline
//!
//! 1. Each skill is expanded into its ancestor closure (memoized per run)
//! 2. Two closures are compared with the Sanchez information-content measure
//! 3. Per-skill best matches are aggregated into a user–job coverage score
//! 4. Positive scores are classified and returned, best first

pub mod coverage;
pub mod error;
pub mod orchestrator;
pub mod similarity;

pub use coverage::{aggregate_best_matches, coverage, skill_set_coverage};
pub use error::{EngineError, Result};
pub use orchestrator::{run_matching, MatchOrchestrator, MatchOutcome, MatchReport, MatchingConfig};
pub use similarity::{closure_similarity, sanchez_similarity};
