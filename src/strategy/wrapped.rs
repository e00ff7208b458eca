//! The already-parsed strategy.
//!
//! An input of the crate's own kind short-circuits to its wrapped
//! canonical value. With no requested overrides this performs zero
//! additional host conversions; a requested zone is applied through the
//! canonical value's own conversion.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::strategy::{
    tags, Cost, FastPath, OptimizationHints, ParseStrategy, StrategyDescriptor,
};
use crate::{ParseError, ParseResult};
use jiff::Zoned;

/// The already-parsed strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct WrappedStrategy;

impl ParseStrategy for WrappedStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::PARSED,
            priority: 100,
            description: "already-parsed value, short-circuited",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::Parsed(_))
    }

    fn check_fast_path(&self, input: &TemporalInput, ctx: &ParseContext) -> FastPath {
        let TemporalInput::Parsed(success) = input else {
            return FastPath::miss();
        };
        if ctx.zone_requested() || ctx.calendar_requested() {
            return FastPath::miss();
        }
        FastPath::hit(success.value.clone(), 1.0)
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::Parsed(success) = input else {
            return Err(ParseError::assert().with_message("parsed strategy invoked off-domain."));
        };
        if ctx.zone_requested() {
            Ok(success.value.with_time_zone(ctx.time_zone().clone()))
        } else {
            Ok(success.value.clone())
        }
    }

    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints {
            cacheable: false,
            cost: Cost::Free,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WrappedStrategy;
    use crate::context::{ParseContext, ParseSuccess};
    use crate::input::TemporalInput;
    use crate::options::{CalendarId, Overflow};
    use crate::strategy::{tags, ParseStrategy};
    use core::time::Duration;
    use jiff::tz::TimeZone;

    fn success(value: jiff::Zoned) -> ParseSuccess {
        ParseSuccess {
            value,
            calendar: CalendarId::ISO8601,
            strategy: tags::TEXT,
            elapsed: Duration::ZERO,
            fast_path: false,
            confidence: 1.0,
        }
    }

    #[test]
    fn short_circuits_without_overrides() {
        let ctx = ParseContext::new(TimeZone::UTC, CalendarId::ISO8601, Overflow::Constrain);
        let value: jiff::Zoned = "2024-01-01T12:00:00+00:00[UTC]".parse().unwrap();
        let input = TemporalInput::from(success(value.clone()));

        let fast = WrappedStrategy.check_fast_path(&input, &ctx);
        assert_eq!(fast.value.as_ref().unwrap().timestamp(), value.timestamp());

        let parsed = WrappedStrategy.parse(&input, &ctx).unwrap();
        assert_eq!(parsed.timestamp(), value.timestamp());
    }

    #[test]
    fn requested_zone_is_applied() {
        let tz = TimeZone::get("Asia/Tokyo").unwrap();
        let ctx = ParseContext::new(tz, CalendarId::ISO8601, Overflow::Constrain)
            .with_explicit(true, false);
        let value: jiff::Zoned = "2024-01-01T12:00:00+00:00[UTC]".parse().unwrap();
        let input = TemporalInput::from(success(value.clone()));

        // Overrides disable the short-circuit.
        assert!(WrappedStrategy.check_fast_path(&input, &ctx).value.is_none());

        let parsed = WrappedStrategy.parse(&input, &ctx).unwrap();
        assert_eq!(parsed.time_zone().iana_name(), Some("Asia/Tokyo"));
        assert_eq!(parsed.timestamp(), value.timestamp());
    }
}
