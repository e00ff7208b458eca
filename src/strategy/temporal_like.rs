//! Strategies for native host temporal values.
//!
//! Instants, zoned date-times, plain dates, and plain date-times are
//! already structured; conversion is zone anchoring only, through the
//! host platform's documented conversions.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::strategy::{
    tags, Cost, FastPath, OptimizationHints, ParseStrategy, StrategyDescriptor,
};
use crate::{ParseError, ParseResult};
use jiff::Zoned;

/// Strategy for host exact instants.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantStrategy;

impl ParseStrategy for InstantStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::INSTANT,
            priority: 90,
            description: "host exact instant anchored to the resolved zone",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::Timestamp(_))
    }

    fn check_fast_path(&self, input: &TemporalInput, ctx: &ParseContext) -> FastPath {
        // Anchoring an instant cannot fail; the full parse is the fast
        // path.
        match input {
            TemporalInput::Timestamp(ts) => {
                FastPath::hit(ts.to_zoned(ctx.time_zone().clone()), 1.0)
            }
            _ => FastPath::miss(),
        }
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::Timestamp(ts) = input else {
            return Err(ParseError::assert().with_message("instant strategy invoked off-domain."));
        };
        Ok(ts.to_zoned(ctx.time_zone().clone()))
    }

    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints {
            cacheable: false,
            cost: Cost::Free,
        }
    }
}

/// Strategy for host zoned date-times.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZonedStrategy;

impl ParseStrategy for ZonedStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::ZONED,
            priority: 95,
            description: "host zoned date-time, re-anchored only on request",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::Zoned(_))
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::Zoned(zoned) = input else {
            return Err(ParseError::assert().with_message("zoned strategy invoked off-domain."));
        };
        if ctx.zone_requested() {
            Ok(zoned.with_time_zone(ctx.time_zone().clone()))
        } else {
            Ok(zoned.clone())
        }
    }

    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints {
            cacheable: false,
            cost: Cost::Free,
        }
    }
}

/// Strategy for host plain (naive) dates: midnight in the resolved zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainDateStrategy;

impl ParseStrategy for PlainDateStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::PLAIN_DATE,
            priority: 80,
            description: "host plain date anchored to midnight in the resolved zone",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::PlainDate(_))
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::PlainDate(date) = input else {
            return Err(
                ParseError::assert().with_message("plain-date strategy invoked off-domain.")
            );
        };
        date.to_zoned(ctx.time_zone().clone())
            .map_err(ParseError::from_host)
    }
}

/// Strategy for host plain (naive) date-times.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainDateTimeStrategy;

impl ParseStrategy for PlainDateTimeStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::PLAIN_DATETIME,
            priority: 85,
            description: "host plain date-time anchored to the resolved zone",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::PlainDateTime(_))
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::PlainDateTime(datetime) = input else {
            return Err(
                ParseError::assert().with_message("plain-datetime strategy invoked off-domain.")
            );
        };
        datetime
            .to_zoned(ctx.time_zone().clone())
            .map_err(ParseError::from_host)
    }
}

#[cfg(test)]
mod tests {
    use super::{InstantStrategy, PlainDateStrategy, PlainDateTimeStrategy, ZonedStrategy};
    use crate::context::ParseContext;
    use crate::input::TemporalInput;
    use crate::options::{CalendarId, Overflow};
    use crate::strategy::ParseStrategy;
    use jiff::civil::{date, datetime};
    use jiff::tz::TimeZone;
    use jiff::Timestamp;

    fn ctx_in(tz: TimeZone) -> ParseContext {
        ParseContext::new(tz, CalendarId::ISO8601, Overflow::Constrain)
    }

    #[test]
    fn instant_anchors_to_resolved_zone() {
        let tz = TimeZone::get("Asia/Tokyo").unwrap();
        let ctx = ctx_in(tz);
        let ts: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        let zoned = InstantStrategy
            .parse(&TemporalInput::from(ts), &ctx)
            .unwrap();
        assert_eq!(zoned.hour(), 9);
        assert_eq!(zoned.timestamp(), ts);
    }

    #[test]
    fn zoned_passes_through_without_request() {
        let ctx = ctx_in(TimeZone::UTC);
        let original: jiff::Zoned = "2024-06-15T08:30:00-04:00[America/New_York]".parse().unwrap();
        let zoned = ZonedStrategy
            .parse(&TemporalInput::from(original.clone()), &ctx)
            .unwrap();
        assert_eq!(zoned.time_zone().iana_name(), Some("America/New_York"));

        let ctx = ctx_in(TimeZone::UTC).with_explicit(true, false);
        let converted = ZonedStrategy
            .parse(&TemporalInput::from(original.clone()), &ctx)
            .unwrap();
        assert_eq!(converted.time_zone().iana_name(), Some("UTC"));
        assert_eq!(converted.timestamp(), original.timestamp());
    }

    #[test]
    fn plain_values_anchor_naively() {
        let ctx = ctx_in(TimeZone::UTC);
        let zoned = PlainDateStrategy
            .parse(&TemporalInput::from(date(2024, 1, 1)), &ctx)
            .unwrap();
        assert_eq!((zoned.year(), zoned.hour()), (2024, 0));

        let zoned = PlainDateTimeStrategy
            .parse(&TemporalInput::from(datetime(2024, 1, 1, 12, 30, 0, 0)), &ctx)
            .unwrap();
        assert_eq!((zoned.hour(), zoned.minute()), (12, 30));
    }
}
