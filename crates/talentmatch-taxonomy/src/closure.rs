//! Ancestor closures
//!
//! A skill's closure is its taxonomic context: the skill itself, the root
//! sentinel, and every ancestor reachable within `max_levels` hops up the
//! `parentOf` relation. Closures are pure functions of the taxonomy, so the
//! resolver memoizes them per `(skill, max_levels)` for the whole run.

use crate::error::Result;
use crate::graph::TaxonomyAccess;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use talentmatch_types::SkillId;
use tracing::debug;

/// Default number of hops walked up the taxonomy
pub const DEFAULT_MAX_LEVELS: usize = 4;

/// Bounded ancestor set of a skill. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorClosure {
    skill: SkillId,
    features: HashSet<SkillId>,
}

impl AncestorClosure {
    /// Wrap a precomputed feature set. The seed is always included.
    pub fn from_features<I>(skill: SkillId, features: I) -> Self
    where
        I: IntoIterator<Item = SkillId>,
    {
        let mut features: HashSet<SkillId> = features.into_iter().collect();
        features.insert(skill.clone());
        Self { skill, features }
    }

    /// The seed skill
    pub fn skill(&self) -> &SkillId {
        &self.skill
    }

    /// Seed, ancestors and root
    pub fn features(&self) -> &HashSet<SkillId> {
        &self.features
    }

    /// Membership test
    pub fn contains(&self, skill: &SkillId) -> bool {
        self.features.contains(skill)
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Walk up to `max_levels` hops from `skill`, breadth first.
///
/// Parents already collected are never expanded again, which keeps the walk
/// finite on cyclic input.
pub fn compute_closure<T>(taxonomy: &T, skill: &SkillId, max_levels: usize) -> Result<AncestorClosure>
where
    T: TaxonomyAccess + ?Sized,
{
    let mut features = HashSet::from([skill.clone(), SkillId::root()]);
    let mut frontier = vec![skill.clone()];
    let mut level = 0;

    while !frontier.is_empty() && level < max_levels {
        let mut next = Vec::new();
        for node in &frontier {
            for parent in taxonomy.direct_parents(node)? {
                if features.insert(parent.clone()) {
                    next.push(parent);
                }
            }
        }
        frontier = next;
        level += 1;
    }

    Ok(AncestorClosure {
        skill: skill.clone(),
        features,
    })
}

/// Cache counters for run logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that computed a closure
    pub misses: u64,
    /// Distinct `(skill, max_levels)` entries held
    pub entries: usize,
}

/// Memoizing closure resolver over a taxonomy.
///
/// The first caller for a key computes and publishes the closure; callers
/// racing on the same key may compute it too, but all of them get the
/// published `Arc`. Entries are never modified once inserted.
pub struct AncestorResolver<T> {
    taxonomy: T,
    /// max_levels → skill → closure
    cache: RwLock<HashMap<usize, HashMap<SkillId, Arc<AncestorClosure>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: TaxonomyAccess> AncestorResolver<T> {
    /// Create a resolver with an empty cache
    pub fn new(taxonomy: T) -> Self {
        Self {
            taxonomy,
            cache: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Closure of `skill` bounded to `max_levels` hops
    pub fn closure(&self, skill: &SkillId, max_levels: usize) -> Result<Arc<AncestorClosure>> {
        if let Some(found) = self
            .cache
            .read()
            .get(&max_levels)
            .and_then(|by_skill| by_skill.get(skill))
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(found));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed = Arc::new(compute_closure(&self.taxonomy, skill, max_levels)?);
        debug!(
            "Computed closure for {} (max_levels={}): {} features",
            skill,
            max_levels,
            computed.len()
        );

        let mut cache = self.cache.write();
        let published = cache
            .entry(max_levels)
            .or_default()
            .entry(skill.clone())
            .or_insert(computed);
        Ok(Arc::clone(published))
    }

    /// Underlying taxonomy
    pub fn taxonomy(&self) -> &T {
        &self.taxonomy
    }

    /// Current cache counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.read().values().map(HashMap::len).sum(),
        }
    }
}
