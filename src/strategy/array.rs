//! The array-like strategy.
//!
//! Positions in fixed order: year, month (1-based), day, hour, minute,
//! second, millisecond. The first three are required; fewer than three
//! positions is a hard validation error. Positions are exact values and
//! validated strictly, regardless of the overflow policy.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::primitive::WeakF64;
use crate::strategy::{
    tags, Cost, Normalized, OptimizationHints, ParseStrategy, StrategyDescriptor, Validation,
};
use crate::{ParseError, ParseResult};
use jiff::civil;
use jiff::Zoned;

const MIN_POSITIONS: usize = 3;
const MAX_POSITIONS: usize = 7;

/// The array-like strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayStrategy;

fn position<T>(values: &[f64], index: usize, default: f64) -> ParseResult<T>
where
    T: num_traits::Bounded + num_traits::AsPrimitive<f64> + Copy + 'static,
    f64: num_traits::AsPrimitive<T>,
{
    WeakF64(values.get(index).copied().unwrap_or(default)).checked_int::<T>()
}

fn convert(values: &[f64], ctx: &ParseContext) -> ParseResult<Zoned> {
    if values.len() < MIN_POSITIONS {
        return Err(ParseError::structure().with_message(format!(
            "array input requires at least year, month, and day; got {} position(s).",
            values.len(),
        )));
    }
    if values.len() > MAX_POSITIONS {
        return Err(ParseError::structure().with_message(format!(
            "array input accepts at most {MAX_POSITIONS} positions; got {}.",
            values.len(),
        )));
    }

    let year = position::<i16>(values, 0, 0.0)?;
    let month = position::<i8>(values, 1, 1.0)?;
    let day = position::<i8>(values, 2, 1.0)?;
    let hour = position::<i8>(values, 3, 0.0)?;
    let minute = position::<i8>(values, 4, 0.0)?;
    let second = position::<i8>(values, 5, 0.0)?;
    let millisecond = position::<i32>(values, 6, 0.0)?;
    if !(0..1_000).contains(&millisecond) {
        return Err(ParseError::structure()
            .with_message(format!("millisecond position {millisecond} is out of range.")));
    }

    let date = civil::Date::new(year, month, day).map_err(ParseError::from_host)?;
    let time = civil::Time::new(hour, minute, second, millisecond * 1_000_000)
        .map_err(ParseError::from_host)?;
    date.to_datetime(time)
        .to_zoned(ctx.time_zone().clone())
        .map_err(ParseError::from_host)
}

impl ParseStrategy for ArrayStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::ARRAY,
            priority: 50,
            description: "numeric positions in fixed year-first order",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::Array(_))
    }

    fn confidence(&self, input: &TemporalInput, _ctx: &ParseContext) -> f64 {
        match input {
            TemporalInput::Array(values) if values.len() < MIN_POSITIONS => 0.2,
            TemporalInput::Array(values) if values.iter().all(|v| v.is_finite()) => 0.9,
            TemporalInput::Array(_) => 0.3,
            _ => 0.0,
        }
    }

    fn validate(&self, input: &TemporalInput, ctx: &ParseContext) -> Validation {
        let TemporalInput::Array(values) = input else {
            return Validation::invalid(format!(
                "`{}` input is outside the `array` strategy's domain",
                input.type_name(),
            ));
        };
        if values.len() < MIN_POSITIONS {
            return Validation::invalid(format!(
                "array input requires at least year, month, and day; got {} position(s).",
                values.len(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Validation::invalid(format!("array position {bad} is not finite."));
        }
        let normalized = self.normalize(input, ctx);
        let mut validation = Validation::valid(normalized.input, self.confidence(input, ctx));
        if values.len() > MAX_POSITIONS {
            validation = validation.with_warning(format!(
                "array input accepts at most {MAX_POSITIONS} positions; extras will fail parsing",
            ));
        }
        validation
    }

    fn normalize(&self, input: &TemporalInput, _ctx: &ParseContext) -> Normalized {
        let TemporalInput::Array(values) = input else {
            return Normalized::untouched(input.clone());
        };
        let mut touched = false;
        let coerced: Vec<f64> = values
            .iter()
            .map(|v| {
                let (integral, transform) = WeakF64(*v).to_integral();
                touched |= transform.is_some();
                integral
            })
            .collect();
        if touched {
            Normalized {
                input: TemporalInput::Array(coerced),
                applied_transforms: vec!["coerce-positions-to-integers"],
            }
        } else {
            Normalized::untouched(input.clone())
        }
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::Array(values) = input else {
            return Err(ParseError::assert().with_message("array strategy invoked off-domain."));
        };
        convert(values, ctx)
    }

    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints {
            cacheable: true,
            cost: Cost::Cheap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ArrayStrategy;
    use crate::context::ParseContext;
    use crate::input::TemporalInput;
    use crate::options::{CalendarId, Overflow};
    use crate::strategy::ParseStrategy;
    use crate::ErrorKind;
    use jiff::tz::TimeZone;

    fn utc_ctx() -> ParseContext {
        ParseContext::new(TimeZone::UTC, CalendarId::ISO8601, Overflow::Constrain)
    }

    #[test]
    fn three_positions_are_midnight() {
        let ctx = utc_ctx();
        let zoned = ArrayStrategy
            .parse(&TemporalInput::from([2024, 1, 1]), &ctx)
            .unwrap();
        assert_eq!(
            (zoned.year(), zoned.month(), zoned.day(), zoned.hour()),
            (2024, 1, 1, 0)
        );
    }

    #[test]
    fn seven_positions() {
        let ctx = utc_ctx();
        let zoned = ArrayStrategy
            .parse(&TemporalInput::from([2024, 6, 15, 8, 30, 45, 250]), &ctx)
            .unwrap();
        assert_eq!((zoned.hour(), zoned.minute(), zoned.second()), (8, 30, 45));
        assert_eq!(zoned.millisecond(), 250);
    }

    #[test]
    fn short_array_is_a_hard_error() {
        let ctx = utc_ctx();
        let err = ArrayStrategy
            .parse(&TemporalInput::from([2024, 1]), &ctx)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
        assert!(!ArrayStrategy
            .validate(&TemporalInput::from([2024, 1]), &ctx)
            .is_valid);
    }

    #[test]
    fn impossible_dates_fail_even_under_constrain() {
        let ctx = utc_ctx();
        let err = ArrayStrategy
            .parse(&TemporalInput::from([2024, 2, 30]), &ctx)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
    }

    #[test]
    fn too_many_positions_fail() {
        let ctx = utc_ctx();
        let input = TemporalInput::Array(vec![2024.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(ArrayStrategy.parse(&input, &ctx).is_err());
    }

    #[test]
    fn normalize_coerces_fractions_idempotently() {
        let ctx = utc_ctx();
        let input = TemporalInput::Array(vec![2024.0, 1.5, 1.0]);
        let once = ArrayStrategy.normalize(&input, &ctx);
        assert_eq!(once.applied_transforms, vec!["coerce-positions-to-integers"]);
        let twice = ArrayStrategy.normalize(&once.input, &ctx);
        assert!(twice.applied_transforms.is_empty());
    }
}
