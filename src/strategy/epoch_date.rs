//! The native date-like strategy.
//!
//! An [`EpochDate`] holds a single, possibly non-finite epoch-millisecond
//! float; a non-finite instant is the "invalid date" state and is a
//! structural failure, everything else converts through epoch
//! milliseconds.

use crate::context::ParseContext;
use crate::input::{EpochDate, TemporalInput};
use crate::primitive::WeakF64;
use crate::strategy::{
    tags, Cost, FastPath, OptimizationHints, ParseStrategy, StrategyDescriptor, Validation,
};
use crate::{ParseError, ParseResult};
use jiff::{Timestamp, Zoned};

/// The native date-like strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct EpochDateStrategy;

fn convert(date: &EpochDate, ctx: &ParseContext) -> ParseResult<Zoned> {
    if !date.is_valid() {
        return Err(ParseError::structure()
            .with_message("date-like value holds a non-finite instant (invalid date)."));
    }
    let (millis, _) = WeakF64(date.epoch_milliseconds()).to_integral();
    let timestamp = Timestamp::from_millisecond(WeakF64(millis).truncate::<i64>())
        .map_err(ParseError::from_host)?;
    Ok(timestamp.to_zoned(ctx.time_zone().clone()))
}

impl ParseStrategy for EpochDateStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::DATE,
            priority: 70,
            description: "native date-like value converted via epoch milliseconds",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::Date(_))
    }

    fn confidence(&self, input: &TemporalInput, _ctx: &ParseContext) -> f64 {
        match input {
            TemporalInput::Date(d) if d.is_valid() => 1.0,
            TemporalInput::Date(_) => 0.2,
            _ => 0.0,
        }
    }

    fn validate(&self, input: &TemporalInput, ctx: &ParseContext) -> Validation {
        match input {
            TemporalInput::Date(d) if d.is_valid() => {
                let normalized = self.normalize(input, ctx);
                Validation::valid(normalized.input, 1.0)
            }
            TemporalInput::Date(_) => {
                Validation::invalid("date-like value holds a non-finite instant (invalid date).")
            }
            _ => Validation::invalid(format!(
                "`{}` input is outside the `date` strategy's domain",
                input.type_name(),
            )),
        }
    }

    fn check_fast_path(&self, input: &TemporalInput, ctx: &ParseContext) -> FastPath {
        // A finite, integral instant is already the full conversion.
        let TemporalInput::Date(d) = input else {
            return FastPath::miss();
        };
        if d.is_valid() && d.epoch_milliseconds().fract() == 0.0 {
            if let Ok(zoned) = convert(d, ctx) {
                return FastPath::hit(zoned, 1.0);
            }
        }
        FastPath::miss()
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::Date(d) = input else {
            return Err(ParseError::assert().with_message("date strategy invoked off-domain."));
        };
        convert(d, ctx)
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
    use super::EpochDateStrategy;
    use crate::context::ParseContext;
    use crate::input::{EpochDate, TemporalInput};
    use crate::options::{CalendarId, Overflow};
    use crate::strategy::ParseStrategy;
    use crate::ErrorKind;
    use jiff::tz::TimeZone;

    fn utc_ctx() -> ParseContext {
        ParseContext::new(TimeZone::UTC, CalendarId::ISO8601, Overflow::Constrain)
    }

    #[test]
    fn converts_via_epoch_milliseconds() {
        let ctx = utc_ctx();
        let input = TemporalInput::from(EpochDate::from_epoch_milliseconds(1_700_000_000_000.0));
        let zoned = EpochDateStrategy.parse(&input, &ctx).unwrap();
        assert_eq!(zoned.timestamp().as_millisecond(), 1_700_000_000_000);
    }

    #[test]
    fn rejects_invalid_date() {
        let ctx = utc_ctx();
        let input = TemporalInput::from(EpochDate::from_epoch_milliseconds(f64::NAN));
        let err = EpochDateStrategy.parse(&input, &ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
        assert!(!EpochDateStrategy.validate(&input, &ctx).is_valid);
    }

    #[test]
    fn fast_path_agrees_with_full_parse() {
        let ctx = utc_ctx();
        let input = TemporalInput::from(EpochDate::from_epoch_milliseconds(86_400_000.0));
        let fast = EpochDateStrategy.check_fast_path(&input, &ctx);
        let full = EpochDateStrategy.parse(&input, &ctx).unwrap();
        assert_eq!(fast.value.unwrap().timestamp(), full.timestamp());
    }
}
