//! The strategy contract and the built-in shape strategies.
//!
//! A strategy is a stateless policy that recognizes and converts one
//! input shape. The orchestrator tries strategies in descending priority
//! order and the first whose [`ParseStrategy::can_handle`] answers true
//! is asked to parse; its result is final. Priority order is therefore a
//! correctness contract: reordering strategies changes which inputs they
//! capture.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::ParseResult;
use core::fmt;
use jiff::Zoned;
use std::sync::Arc;

mod array;
mod epoch_date;
mod fallback;
mod fields;
mod number;
mod split_timestamp;
mod temporal_like;
mod text;
mod wrapped;

pub use array::ArrayStrategy;
pub use epoch_date::EpochDateStrategy;
pub use fallback::FallbackStrategy;
pub use fields::FieldsStrategy;
pub use number::{EpochUnit, NumberStrategy};
pub use split_timestamp::SplitTimestampStrategy;
pub use temporal_like::{
    InstantStrategy, PlainDateStrategy, PlainDateTimeStrategy, ZonedStrategy,
};
pub use text::TextStrategy;
pub use wrapped::WrappedStrategy;

/// Well-known strategy tags.
pub mod tags {
    pub const PARSED: &str = "parsed";
    pub const ZONED: &str = "zoned";
    pub const INSTANT: &str = "instant";
    pub const PLAIN_DATETIME: &str = "plain-datetime";
    pub const PLAIN_DATE: &str = "plain-date";
    pub const DATE: &str = "date";
    pub const SPLIT_TIMESTAMP: &str = "split-timestamp";
    pub const NUMBER: &str = "number";
    pub const TEXT: &str = "string";
    pub const ARRAY: &str = "array";
    pub const FIELDS: &str = "fields";
    pub const FALLBACK: &str = "fallback";
}

/// Identity and ordering of one strategy implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyDescriptor {
    /// Unique type tag.
    pub tag: &'static str,
    /// Higher priorities are tried first. Ties keep registration order.
    pub priority: i32,
    /// Human-readable description for diagnostics.
    pub description: &'static str,
}

/// The structured answer of [`ParseStrategy::validate`]. Never produced
/// by panicking; diagnostic callers stay free of exception-driven
/// control flow.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub is_valid: bool,
    pub normalized: Option<TemporalInput>,
    /// A better-suited strategy tag, when the strategy can tell.
    pub suggested_strategy: Option<&'static str>,
    pub confidence: f64,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Validation {
    #[must_use]
    pub fn valid(normalized: TemporalInput, confidence: f64) -> Self {
        Self {
            is_valid: true,
            normalized: Some(normalized),
            confidence,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    #[must_use]
    pub fn suggesting(mut self, tag: &'static str) -> Self {
        self.suggested_strategy = Some(tag);
        self
    }
}

/// The result of [`ParseStrategy::normalize`]: a reshaped input plus the
/// transforms that were applied, for testability. Normalization is pure,
/// deterministic, and idempotent.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub input: TemporalInput,
    pub applied_transforms: Vec<&'static str>,
}

impl Normalized {
    #[must_use]
    pub fn untouched(input: TemporalInput) -> Self {
        Self {
            input,
            applied_transforms: Vec::new(),
        }
    }
}

/// The result of [`ParseStrategy::check_fast_path`]. A hit is
/// semantically identical to the full parse for the unambiguous sub-case
/// it targets.
#[derive(Debug, Clone, Default)]
pub struct FastPath {
    pub value: Option<Zoned>,
    pub confidence: f64,
}

impl FastPath {
    #[must_use]
    pub fn miss() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn hit(value: Zoned, confidence: f64) -> Self {
        Self {
            value: Some(value),
            confidence,
        }
    }
}

/// Advisory execution-cost class of a strategy. No effect on
/// correctness.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cost {
    Free,
    Cheap,
    #[default]
    Moderate,
    Expensive,
}

/// Advisory metadata for callers batching many inputs. No effect on
/// correctness.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimizationHints {
    pub cacheable: bool,
    pub cost: Cost,
}

/// A stateless policy recognizing and converting one input shape.
///
/// Implementations must keep [`ParseStrategy::can_handle`] cheap and
/// side-effect free, and must agree with their confidence: an input the
/// strategy cannot handle scores 0.
pub trait ParseStrategy: fmt::Debug + Send + Sync {
    /// This strategy's identity and priority.
    fn descriptor(&self) -> StrategyDescriptor;

    /// Cheap, side-effect-free shape test.
    fn can_handle(&self, input: &TemporalInput, ctx: &ParseContext) -> bool;

    /// Self-assessed certainty in `[0, 1]`; consumed only by the type
    /// classifier.
    fn confidence(&self, input: &TemporalInput, ctx: &ParseContext) -> f64 {
        if self.can_handle(input, ctx) {
            1.0
        } else {
            0.0
        }
    }

    /// Structured validation; never panics.
    fn validate(&self, input: &TemporalInput, ctx: &ParseContext) -> Validation {
        if self.can_handle(input, ctx) {
            let normalized = self.normalize(input, ctx);
            Validation::valid(normalized.input, self.confidence(input, ctx))
        } else {
            Validation::invalid(format!(
                "`{}` input is outside the `{}` strategy's domain",
                input.type_name(),
                self.descriptor().tag,
            ))
        }
    }

    /// Pure, deterministic, idempotent reshaping of the input.
    fn normalize(&self, input: &TemporalInput, _ctx: &ParseContext) -> Normalized {
        Normalized::untouched(input.clone())
    }

    /// Optional shortcut for a common unambiguous sub-case.
    fn check_fast_path(&self, _input: &TemporalInput, _ctx: &ParseContext) -> FastPath {
        FastPath::miss()
    }

    /// Authoritative conversion. Returns a classified error rather than
    /// panicking for any input within this strategy's declared domain.
    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned>;

    /// Advisory metadata only.
    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints::default()
    }
}

/// The built-in strategy set, in registration order.
#[must_use]
pub(crate) fn default_set() -> Vec<Arc<dyn ParseStrategy>> {
    vec![
        Arc::new(WrappedStrategy),
        Arc::new(ZonedStrategy),
        Arc::new(InstantStrategy),
        Arc::new(PlainDateTimeStrategy),
        Arc::new(PlainDateStrategy),
        Arc::new(EpochDateStrategy),
        Arc::new(SplitTimestampStrategy),
        Arc::new(NumberStrategy),
        Arc::new(TextStrategy),
        Arc::new(ArrayStrategy),
        Arc::new(FieldsStrategy),
        Arc::new(FallbackStrategy),
    ]
}

#[cfg(test)]
mod tests {
    use super::{default_set, tags};

    #[test]
    fn default_set_is_complete_and_unique() {
        let set = default_set();
        assert_eq!(set.len(), 12);
        let mut tags_seen: Vec<&str> = set.iter().map(|s| s.descriptor().tag).collect();
        tags_seen.sort_unstable();
        tags_seen.dedup();
        assert_eq!(tags_seen.len(), 12);
        assert!(tags_seen.contains(&tags::FALLBACK));
    }

    #[test]
    fn fallback_has_lowest_priority() {
        let set = default_set();
        let fallback = set
            .iter()
            .find(|s| s.descriptor().tag == tags::FALLBACK)
            .unwrap();
        for strategy in &set {
            if strategy.descriptor().tag != tags::FALLBACK {
                assert!(strategy.descriptor().priority > fallback.descriptor().priority);
            }
        }
    }
}
