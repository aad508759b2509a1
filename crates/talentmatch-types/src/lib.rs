//! TalentMatch Types - Core types for the talent matching engine
//!
//! This module defines the data model shared by the taxonomy, the scoring
//! engine, the store and the pipeline driver.

mod job;
mod matching;
mod skill;
mod user;

pub use job::{JobId, JobPosting};
pub use matching::{MatchClass, MatchResult, MatchRun, UserMatch, MID_THRESHOLD, STRONG_THRESHOLD};
pub use skill::{SkillId, SkillSet, ROOT_SKILL};
pub use user::{UserId, UserProfile};
