//! The diagnostic type classifier.
//!
//! Answers "what type is this input, and how sure are we" without
//! parsing: every strategy's shape test runs, matches are scored by
//! confidence, and candidates are ranked by (priority, confidence)
//! descending. Zero matches produce nearest-tag suggestions computed by
//! edit distance over the registered tags, which also back explicit-tag
//! lookups so a typo in a requested type is corrected rather than
//! silently ignored.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::options::Overflow;
use crate::registry::StrategyRegistry;
use crate::strategy::ParseStrategy;
use crate::{host, ParseError, ParseResult};
use std::borrow::Cow;
use std::sync::Arc;

/// How many nearest tags a miss suggests.
const MAX_SUGGESTIONS: usize = 3;
/// Suggestions farther than this edit distance are dropped. Two keeps
/// one-or-two-keystroke typos and little else: the registered tags are
/// short enough that distance three already crosses between unrelated
/// tags.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// One classified candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub tag: &'static str,
    pub priority: i32,
    pub confidence: f64,
}

/// The classifier's structured answer. Diagnostic entry points never
/// panic; a miss is represented, not thrown.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The input's runtime type name.
    pub input_type: Cow<'static, str>,
    /// Matching strategies, ranked by (priority, confidence) descending.
    pub candidates: Vec<Candidate>,
    /// Nearest registered tags, populated only on zero matches.
    pub suggestions: Vec<&'static str>,
}

impl Classification {
    /// The top candidate, if any strategy matched.
    #[must_use]
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Every candidate after the best.
    #[must_use]
    pub fn alternates(&self) -> &[Candidate] {
        self.candidates.get(1..).unwrap_or_default()
    }
}

/// A diagnostic classifier over one registry.
#[derive(Debug, Clone, Copy)]
pub struct TypeClassifier<'a> {
    registry: &'a StrategyRegistry,
}

impl<'a> TypeClassifier<'a> {
    #[must_use]
    pub fn new(registry: &'a StrategyRegistry) -> Self {
        Self { registry }
    }

    /// Classifies one input against every registered strategy.
    #[must_use]
    pub fn classify(&self, input: &TemporalInput) -> Classification {
        // Diagnostics run under the process defaults; the context only
        // feeds shape tests here.
        let ctx = ParseContext::new(
            host::default_time_zone(),
            host::default_calendar(),
            Overflow::default(),
        );

        let mut candidates: Vec<Candidate> = self
            .registry
            .all_sorted_by_priority()
            .iter()
            .filter(|s| s.can_handle(input, &ctx))
            .map(|s| {
                let d = s.descriptor();
                Candidate {
                    tag: d.tag,
                    priority: d.priority,
                    confidence: s.confidence(input, &ctx).clamp(0.0, 1.0),
                }
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.priority.cmp(&a.priority).then(
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(core::cmp::Ordering::Equal),
            )
        });

        let suggestions = if candidates.is_empty() {
            self.nearest_tags(&input.type_name())
        } else {
            Vec::new()
        };

        Classification {
            input_type: input.type_name(),
            candidates,
            suggestions,
        }
    }

    /// Resolves an explicitly requested strategy tag, suggesting
    /// corrections for a near miss.
    pub fn resolve_tag(&self, tag: &str) -> ParseResult<Arc<dyn ParseStrategy>> {
        self.registry.get(tag).map_err(|error| {
            let nearest = self.nearest_tags(tag);
            if nearest.is_empty() {
                error
            } else {
                ParseError::registry_lookup().with_message(format!(
                    "no strategy registered for tag `{tag}`; did you mean {}?",
                    nearest
                        .iter()
                        .map(|t| format!("`{t}`"))
                        .collect::<Vec<_>>()
                        .join(", "),
                ))
            }
        })
    }

    /// The registered tags nearest the needle, by edit distance.
    #[must_use]
    pub fn nearest_tags(&self, needle: &str) -> Vec<&'static str> {
        let mut scored: Vec<(usize, &'static str)> = self
            .registry
            .tags()
            .into_iter()
            .map(|tag| (strsim::levenshtein(needle, tag), tag))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .collect();
        scored.sort_by_key(|(distance, _)| *distance);
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, tag)| tag)
            .collect()
    }
}
