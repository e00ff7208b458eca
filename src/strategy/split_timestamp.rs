//! The duck-typed third-party timestamp strategy.
//!
//! Anything exposing seconds, nanoseconds, and its own conversion
//! method (see [`crate::TimestampLike`]) is converted by delegating to
//! that method. A delegate error is wrapped, never re-thrown raw.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::strategy::{
    tags, Cost, OptimizationHints, ParseStrategy, StrategyDescriptor, Validation,
};
use crate::{ParseError, ParseResult};
use jiff::{Timestamp, Zoned};

/// The third-party timestamp-like strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitTimestampStrategy;

impl ParseStrategy for SplitTimestampStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::SPLIT_TIMESTAMP,
            priority: 65,
            description: "third-party seconds+nanoseconds object, converted by delegation",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::SplitTimestamp(_))
    }

    fn confidence(&self, input: &TemporalInput, _ctx: &ParseContext) -> f64 {
        match input {
            TemporalInput::SplitTimestamp(ts)
                if ts.seconds().is_finite() && ts.nanoseconds().is_finite() =>
            {
                0.9
            }
            TemporalInput::SplitTimestamp(_) => 0.2,
            _ => 0.0,
        }
    }

    fn validate(&self, input: &TemporalInput, ctx: &ParseContext) -> Validation {
        let TemporalInput::SplitTimestamp(ts) = input else {
            return Validation::invalid(format!(
                "`{}` input is outside the `split-timestamp` strategy's domain",
                input.type_name(),
            ));
        };
        if !ts.seconds().is_finite() || !ts.nanoseconds().is_finite() {
            return Validation::invalid(
                "timestamp-like value has non-finite seconds or nanoseconds.",
            );
        }
        let normalized = self.normalize(input, ctx);
        Validation::valid(normalized.input, self.confidence(input, ctx))
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::SplitTimestamp(ts) = input else {
            return Err(ParseError::assert()
                .with_message("split-timestamp strategy invoked off-domain."));
        };
        if !ts.seconds().is_finite() || !ts.nanoseconds().is_finite() {
            return Err(ParseError::structure()
                .with_message("timestamp-like value has non-finite seconds or nanoseconds."));
        }
        let millis = ts.to_epoch_milliseconds().map_err(|e| {
            ParseError::delegate()
                .with_message(format!("timestamp-like conversion failed: {e}"))
        })?;
        let timestamp = Timestamp::from_millisecond(millis).map_err(ParseError::from_host)?;
        Ok(timestamp.to_zoned(ctx.time_zone().clone()))
    }

    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints {
            cacheable: false,
            cost: Cost::Cheap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SplitTimestampStrategy;
    use crate::context::ParseContext;
    use crate::input::{EpochSplit, TemporalInput, TimestampLike};
    use crate::options::{CalendarId, Overflow};
    use crate::strategy::ParseStrategy;
    use crate::ErrorKind;
    use jiff::tz::TimeZone;
    use std::sync::Arc;

    fn utc_ctx() -> ParseContext {
        ParseContext::new(TimeZone::UTC, CalendarId::ISO8601, Overflow::Constrain)
    }

    #[test]
    fn delegates_to_the_conversion_method() {
        let ctx = utc_ctx();
        let input = TemporalInput::from(EpochSplit::new(1_700_000_000.0, 500_000_000.0));
        let zoned = SplitTimestampStrategy.parse(&input, &ctx).unwrap();
        assert_eq!(zoned.timestamp().as_millisecond(), 1_700_000_000_500);
    }

    #[test]
    fn non_finite_seconds_never_escape_raw() {
        let ctx = utc_ctx();
        let input = TemporalInput::from(EpochSplit::new(f64::INFINITY, 0.0));
        let err = SplitTimestampStrategy.parse(&input, &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
    }

    #[derive(Debug)]
    struct FailingConversion;

    impl TimestampLike for FailingConversion {
        fn seconds(&self) -> f64 {
            0.0
        }
        fn nanoseconds(&self) -> f64 {
            0.0
        }
        fn to_epoch_milliseconds(
            &self,
        ) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
            Err("backend unavailable".into())
        }
    }

    #[test]
    fn delegate_errors_are_wrapped() {
        let ctx = utc_ctx();
        let input = TemporalInput::SplitTimestamp(Arc::new(FailingConversion));
        let err = SplitTimestampStrategy.parse(&input, &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Delegate);
        assert!(err.message().contains("backend unavailable"));
    }
}
