//! The textual strategy: ISO-8601-like profiles and bare time-of-day.
//!
//! Profiles, in the order they are tried:
//! - bracketed-zone strings (`2024-01-01T12:00[America/New_York]`);
//! - offset-bearing instants (`2024-01-01T12:00:00Z`, `…+05:30`), which
//!   keep their offset as a fixed zone unless the caller requested one;
//! - naive date-times and dates, anchored to the resolved zone;
//! - bare time-of-day, anchored to the current date in the resolved
//!   zone.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::strategy::{
    tags, Cost, FastPath, Normalized, OptimizationHints, ParseStrategy, StrategyDescriptor,
    Validation,
};
use crate::{host, ParseError, ParseResult};
use jiff::civil;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

/// The textual strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextStrategy;

impl TextStrategy {
    fn parse_str(s: &str, ctx: &ParseContext) -> ParseResult<Zoned> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::structure().with_message("cannot parse an empty string."));
        }

        // Bracketed zone annotation: the richest profile, parsed and
        // cross-validated by the host platform.
        if s.contains('[') {
            let zoned: Zoned = s
                .parse()
                .map_err(|e| structural(s, &e))?;
            return Ok(anchor(zoned, ctx));
        }

        // Offset-bearing instant.
        if let Ok(timestamp) = s.parse::<Timestamp>() {
            let zone = if ctx.zone_requested() {
                ctx.time_zone().clone()
            } else if s.ends_with(['Z', 'z']) {
                TimeZone::UTC
            } else {
                trailing_offset_zone(s)?
            };
            return Ok(timestamp.to_zoned(zone));
        }

        // Naive date-time, anchored to the resolved zone.
        if let Ok(datetime) = s.parse::<civil::DateTime>() {
            return datetime
                .to_zoned(ctx.time_zone().clone())
                .map_err(|e| structural(s, &e));
        }

        // Date only: midnight in the resolved zone.
        if let Ok(date) = s.parse::<civil::Date>() {
            return date
                .to_zoned(ctx.time_zone().clone())
                .map_err(|e| structural(s, &e));
        }

        // Bare time-of-day: anchored to the current date.
        if let Ok(time) = s.parse::<civil::Time>() {
            let today = Timestamp::now()
                .to_zoned(ctx.time_zone().clone())
                .datetime()
                .date();
            return today
                .to_datetime(time)
                .to_zoned(ctx.time_zone().clone())
                .map_err(|e| structural(s, &e));
        }

        Err(ParseError::structure()
            .with_message(format!("`{s}` is not a recognized date/time string.")))
    }
}

fn structural(input: &str, error: &jiff::Error) -> ParseError {
    ParseError::structure().with_message(format!("failed to parse `{input}`: {error}"))
}

/// Converts an already-anchored value to the requested zone, when the
/// caller asked for one.
fn anchor(zoned: Zoned, ctx: &ParseContext) -> Zoned {
    if ctx.zone_requested() {
        zoned.with_time_zone(ctx.time_zone().clone())
    } else {
        zoned
    }
}

/// Extracts the trailing `±HH[:MM]` offset of an offset-bearing string
/// as a fixed zone.
fn trailing_offset_zone(s: &str) -> ParseResult<TimeZone> {
    let bytes = s.as_bytes();
    let start = bytes
        .iter()
        .rposition(|&b| b == b'+' || b == b'-')
        .filter(|&pos| pos > 10)
        .ok_or_else(|| {
            ParseError::structure().with_message(format!("`{s}` carries no usable UTC offset."))
        })?;
    host::resolve_time_zone(&s[start..])
}

impl ParseStrategy for TextStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::TEXT,
            priority: 55,
            description: "ISO-8601-like string or bare time-of-day",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::Text(_))
    }

    fn confidence(&self, input: &TemporalInput, _ctx: &ParseContext) -> f64 {
        match input {
            TemporalInput::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.1
                } else if s.as_bytes().first().is_some_and(u8::is_ascii_digit) {
                    0.9
                } else {
                    0.5
                }
            }
            _ => 0.0,
        }
    }

    fn validate(&self, input: &TemporalInput, ctx: &ParseContext) -> Validation {
        let TemporalInput::Text(s) = input else {
            return Validation::invalid(format!(
                "`{}` input is outside the `string` strategy's domain",
                input.type_name(),
            ));
        };
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Validation::invalid("cannot parse an empty string.");
        }
        let normalized = self.normalize(input, ctx);
        let validation = Validation::valid(normalized.input, self.confidence(input, ctx));
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            // A digit-only string is far more likely a bare epoch number.
            return validation
                .with_warning("digit-only string; a bare number input may be intended")
                .suggesting(tags::NUMBER);
        }
        validation
    }

    fn normalize(&self, input: &TemporalInput, _ctx: &ParseContext) -> Normalized {
        let TemporalInput::Text(s) = input else {
            return Normalized::untouched(input.clone());
        };
        let trimmed = s.trim();
        if trimmed.len() == s.len() {
            Normalized::untouched(input.clone())
        } else {
            Normalized {
                input: TemporalInput::Text(trimmed.to_owned()),
                applied_transforms: vec!["trim-whitespace"],
            }
        }
    }

    fn check_fast_path(&self, input: &TemporalInput, ctx: &ParseContext) -> FastPath {
        // `YYYY-MM-DD` with nothing else is the most common profile and
        // needs no disambiguation.
        let TemporalInput::Text(s) = input else {
            return FastPath::miss();
        };
        let s = s.trim();
        if s.len() == 10 && s.as_bytes()[4] == b'-' && s.as_bytes()[7] == b'-' {
            if let Ok(date) = s.parse::<civil::Date>() {
                if let Ok(zoned) = date.to_zoned(ctx.time_zone().clone()) {
                    return FastPath::hit(zoned, 1.0);
                }
            }
        }
        FastPath::miss()
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::Text(s) = input else {
            return Err(ParseError::assert().with_message("text strategy invoked off-domain."));
        };
        Self::parse_str(s, ctx)
    }

    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints {
            cacheable: true,
            cost: Cost::Moderate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TextStrategy;
    use crate::context::ParseContext;
    use crate::input::TemporalInput;
    use crate::options::{CalendarId, Overflow};
    use crate::strategy::{tags, ParseStrategy};
    use crate::ErrorKind;
    use jiff::tz::TimeZone;

    fn utc_ctx() -> ParseContext {
        ParseContext::new(TimeZone::UTC, CalendarId::ISO8601, Overflow::Constrain)
    }

    fn parse(s: &str, ctx: &ParseContext) -> crate::ParseResult<jiff::Zoned> {
        TextStrategy.parse(&TemporalInput::from(s), ctx)
    }

    #[test]
    fn utc_instant() {
        let ctx = utc_ctx();
        let zoned = parse("2024-01-01T12:00:00Z", &ctx).unwrap();
        assert_eq!(
            (zoned.year(), zoned.month(), zoned.day(), zoned.hour()),
            (2024, 1, 1, 12)
        );
        assert_eq!(zoned.offset().seconds(), 0);
    }

    #[test]
    fn offset_is_kept_as_fixed_zone() {
        let ctx = utc_ctx();
        let zoned = parse("2024-01-01T12:00:00+05:30", &ctx).unwrap();
        assert_eq!(zoned.offset().seconds(), 5 * 3600 + 30 * 60);
        assert_eq!(zoned.hour(), 12);
    }

    #[test]
    fn requested_zone_wins_over_offset() {
        let ctx = utc_ctx().with_explicit(true, false);
        let zoned = parse("2024-01-01T12:00:00+05:30", &ctx).unwrap();
        assert_eq!(zoned.offset().seconds(), 0);
        assert_eq!(zoned.hour(), 6);
        assert_eq!(zoned.minute(), 30);
    }

    #[test]
    fn bracketed_zone() {
        let ctx = utc_ctx();
        let zoned = parse("2024-06-15T08:30:00-04:00[America/New_York]", &ctx).unwrap();
        assert_eq!(zoned.time_zone().iana_name(), Some("America/New_York"));
        assert_eq!(zoned.hour(), 8);
    }

    #[test]
    fn naive_datetime_anchors_to_resolved_zone() {
        let tz = TimeZone::get("America/New_York").unwrap();
        let ctx = ParseContext::new(tz, CalendarId::ISO8601, Overflow::Constrain);
        let zoned = parse("2024-01-01T09:15:00", &ctx).unwrap();
        assert_eq!(zoned.time_zone().iana_name(), Some("America/New_York"));
        assert_eq!((zoned.hour(), zoned.minute()), (9, 15));
    }

    #[test]
    fn date_only_is_midnight() {
        let ctx = utc_ctx();
        let zoned = parse("2024-01-01", &ctx).unwrap();
        assert_eq!((zoned.hour(), zoned.minute(), zoned.second()), (0, 0, 0));
    }

    #[test]
    fn bare_time_of_day_uses_current_date() {
        let ctx = utc_ctx();
        let zoned = parse("14:30:15", &ctx).unwrap();
        assert_eq!((zoned.hour(), zoned.minute(), zoned.second()), (14, 30, 15));
        let today = jiff::Timestamp::now().to_zoned(TimeZone::UTC).datetime().date();
        assert_eq!(zoned.datetime().date(), today);
    }

    #[test]
    fn malformed_text_is_structural_and_names_the_input() {
        let ctx = utc_ctx();
        let err = parse("not a date", &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
        assert!(err.message().contains("not a date"));

        let err = parse("", &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
    }

    #[test]
    fn impossible_dates_fail() {
        let ctx = utc_ctx();
        assert!(parse("2024-02-30", &ctx).is_err());
        assert!(parse("2024-13-01T00:00:00Z", &ctx).is_err());
    }

    #[test]
    fn fast_path_agrees_with_full_parse() {
        let ctx = utc_ctx();
        let input = TemporalInput::from("2024-03-10");
        let fast = TextStrategy.check_fast_path(&input, &ctx);
        let full = TextStrategy.parse(&input, &ctx).unwrap();
        assert_eq!(fast.value.unwrap().timestamp(), full.timestamp());
    }

    #[test]
    fn digit_only_string_suggests_number() {
        let ctx = utc_ctx();
        let validation = TextStrategy.validate(&TemporalInput::from("1700000000"), &ctx);
        assert_eq!(validation.suggested_strategy, Some(tags::NUMBER));
        assert!(!validation.warnings.is_empty());
    }

    #[test]
    fn normalize_trims_once() {
        let ctx = utc_ctx();
        let once = TextStrategy.normalize(&TemporalInput::from("  2024-01-01 "), &ctx);
        assert_eq!(once.applied_transforms, vec!["trim-whitespace"]);
        let twice = TextStrategy.normalize(&once.input, &ctx);
        assert!(twice.applied_transforms.is_empty());
    }
}
