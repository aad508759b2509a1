//! `TalentMatch` Taxonomy
//!
//! Read-only access to the skill hierarchy and everything derived from it.
//!
//! ## Features
//!
//! - In-memory taxonomy snapshot built from `parentOf` edges or a YAML file
//! - Depth-bounded, cycle-safe ancestor closures with a per-run memo cache
//! - Case-insensitive skill-name resolution with a static alias table
//! - Pluggable reasoning step that degrades to the unreasoned taxonomy

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod closure;
pub mod error;
pub mod graph;
pub mod index;
pub mod reasoner;

pub use closure::{compute_closure, AncestorClosure, AncestorResolver, CacheStats, DEFAULT_MAX_LEVELS};
pub use error::{Result, TaxonomyError};
pub use graph::{Taxonomy, TaxonomyAccess};
pub use index::{Resolution, SkillIndex};
pub use reasoner::{apply_reasoning, Reasoner};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{AncestorResolver, SkillIndex, Taxonomy, TaxonomyAccess, TaxonomyError};
}
