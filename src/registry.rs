//! The ordered strategy registry.
//!
//! Registration with an existing tag replaces, never duplicates. The
//! active list is kept sorted descending by priority, stable on ties
//! (registration order), and published as a whole `Arc` slice: mutation
//! swaps the slice under a write lock, so concurrent enumeration never
//! observes a partially-updated entry.

use crate::strategy::ParseStrategy;
use crate::{ParseError, ParseResult};
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Diagnostic summary of the registered strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub count: usize,
    /// Tags in descending priority order.
    pub tags: Vec<&'static str>,
    /// `(tag, priority)` pairs in descending priority order.
    pub priorities: Vec<(&'static str, i32)>,
}

#[derive(Debug)]
struct Inner {
    /// Registration order; the sort source on every mutation.
    entries: Vec<Arc<dyn ParseStrategy>>,
    /// The published, priority-sorted snapshot.
    sorted: Arc<[Arc<dyn ParseStrategy>]>,
    index: FxHashMap<&'static str, usize>,
}

impl Inner {
    fn rebuild(&mut self) {
        let mut sorted = self.entries.clone();
        // Stable sort keeps registration order on priority ties.
        sorted.sort_by_key(|s| core::cmp::Reverse(s.descriptor().priority));
        self.sorted = sorted.into();
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, s)| (s.descriptor().tag, i))
            .collect();
    }
}

/// An ordered, tag-keyed collection of strategies.
#[derive(Debug)]
pub struct StrategyRegistry {
    inner: RwLock<Inner>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: Vec::new(),
                sorted: Vec::new().into(),
                index: FxHashMap::default(),
            }),
        }
    }

    /// A registry seeded with strategies in the given registration
    /// order.
    #[must_use]
    pub(crate) fn seeded(strategies: Vec<Arc<dyn ParseStrategy>>) -> Self {
        let registry = Self::new();
        registry.replace_all(strategies);
        registry
    }

    /// Inserts the strategy, replacing any previous one with the same
    /// tag.
    pub fn register(&self, strategy: Arc<dyn ParseStrategy>) {
        let tag = strategy.descriptor().tag;
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match inner.index.get(tag).copied() {
            Some(position) => {
                log::debug!("replacing strategy `{tag}`");
                inner.entries[position] = strategy;
            }
            None => {
                log::debug!("registering strategy `{tag}`");
                inner.entries.push(strategy);
            }
        }
        inner.rebuild();
    }

    /// Replaces the whole set in one swap.
    pub(crate) fn replace_all(&self, strategies: Vec<Arc<dyn ParseStrategy>>) {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        inner.entries = strategies;
        inner.rebuild();
    }

    /// Point lookup by tag. An unregistered tag is reported, never
    /// silently ignored.
    pub fn get(&self, tag: &str) -> ParseResult<Arc<dyn ParseStrategy>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .index
            .get(tag)
            .map(|&i| inner.entries[i].clone())
            .ok_or_else(|| {
                ParseError::registry_lookup()
                    .with_message(format!("no strategy registered for tag `{tag}`."))
            })
    }

    /// Whether a strategy is registered for the tag.
    #[must_use]
    pub fn has(&self, tag: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .index
            .contains_key(tag)
    }

    /// All strategies, descending by priority, stable on ties. The
    /// returned snapshot is immutable; later registrations do not
    /// affect it.
    #[must_use]
    pub fn all_sorted_by_priority(&self) -> Arc<[Arc<dyn ParseStrategy>]> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sorted
            .clone()
    }

    /// The registered tags, descending by priority.
    #[must_use]
    pub fn tags(&self) -> Vec<&'static str> {
        self.all_sorted_by_priority()
            .iter()
            .map(|s| s.descriptor().tag)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Diagnostic summary: count, tags, and priorities.
    #[must_use]
    pub fn stats(&self) -> RegistryStats {
        let sorted = self.all_sorted_by_priority();
        RegistryStats {
            count: sorted.len(),
            tags: sorted.iter().map(|s| s.descriptor().tag).collect(),
            priorities: sorted
                .iter()
                .map(|s| {
                    let d = s.descriptor();
                    (d.tag, d.priority)
                })
                .collect(),
        }
    }
}
