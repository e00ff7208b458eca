//! The bare-number strategy and its seconds-vs-milliseconds
//! disambiguator.
//!
//! A bare number may be epoch seconds or epoch milliseconds, and both
//! interpretations can be independently valid, so validity alone cannot
//! disambiguate. The decision block below resolves the ambiguity with a
//! deterministic rule order; its thresholds are observable behavior and
//! must not drift.

use crate::context::ParseContext;
use crate::input::TemporalInput;
use crate::primitive::WeakF64;
use crate::strategy::{
    tags, Cost, FastPath, Normalized, OptimizationHints, ParseStrategy, StrategyDescriptor,
    Validation,
};
use crate::{ParseError, ParseResult};
use jiff::{Timestamp, Zoned};

// Disambiguation thresholds.
//
// TODO(config): expose these as an opt-in configuration without changing
// the defaults.

/// `|x| >= 10^12` is always milliseconds: 13+ digits cannot plausibly be
/// seconds for realistic dates.
const MS_FLOOR: f64 = 1e12;
/// `|x| < 10^11` is seconds (subject to the negative day-scale rule).
const SECONDS_CEILING: f64 = 1e11;
/// A negative value within one day of the epoch, in milliseconds. A
/// day-scale negative offset is a common millisecond literal and an
/// implausible seconds literal.
const DAY_SCALE_MS: f64 = crate::MS_PER_DAY as f64;
/// Millisecond interpretations landing in this year window are
/// preferred within the ambiguous band.
const MS_WINDOW: core::ops::RangeInclusive<f64> = 1970.0..=2010.0;
/// A seconds interpretation landing after this year is preferred as
/// seconds within the ambiguous band.
const SECONDS_CUTOFF_YEAR: f64 = 2100.0;
/// Mean Gregorian year length in seconds, used for the approximate year
/// windows above.
const MEAN_YEAR_SECONDS: f64 = 31_556_952.0;

/// The unit a bare number was decided to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochUnit {
    Seconds,
    Milliseconds,
}

/// One unit decision: the chosen unit, the resulting epoch milliseconds,
/// and the transforms applied on the way (for testability).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UnitDecision {
    pub(crate) unit: EpochUnit,
    pub(crate) epoch_milliseconds: i64,
    pub(crate) applied_transforms: Vec<&'static str>,
}

/// Decides whether a bare number is epoch seconds or milliseconds.
///
/// Rule order (deterministic, each rule final):
/// 1. non-finite input is rejected;
/// 2. `|x| >= 10^12` is milliseconds;
/// 3. a negative value with `|x| <= 86_400_000` is always milliseconds;
/// 4. `|x| < 10^11` is seconds;
/// 5. in the ambiguous band `10^11 <= |x| < 10^12`, a seconds
///    interpretation landing after ~2100 decides seconds, a millisecond
///    interpretation landing in ~1970–2010 decides milliseconds, and
///    otherwise milliseconds win exactly when the value is valid as
///    milliseconds and invalid as seconds.
///
/// The ×1000 conversion for seconds happens only after the unit
/// decision and is recorded as an applied transform.
pub(crate) fn decide_unit(value: f64) -> ParseResult<UnitDecision> {
    if !value.is_finite() {
        return Err(ParseError::structure()
            .with_message("cannot interpret a non-finite number as an epoch value."));
    }
    let (integral, integral_transform) = WeakF64(value).to_integral();
    let mut applied_transforms = Vec::new();
    if let Some(transform) = integral_transform {
        applied_transforms.push(transform);
    }

    let magnitude = integral.abs();
    let unit = if magnitude >= MS_FLOOR {
        EpochUnit::Milliseconds
    } else if integral < 0.0 && magnitude <= DAY_SCALE_MS {
        EpochUnit::Milliseconds
    } else if magnitude < SECONDS_CEILING {
        EpochUnit::Seconds
    } else {
        ambiguous_band_unit(integral)
    };

    let epoch_milliseconds = match unit {
        EpochUnit::Milliseconds => WeakF64(integral).truncate::<i64>(),
        EpochUnit::Seconds => {
            applied_transforms.push("seconds-to-milliseconds");
            WeakF64(integral * 1_000.0).truncate::<i64>()
        }
    };

    Ok(UnitDecision {
        unit,
        epoch_milliseconds,
        applied_transforms,
    })
}

/// Tie-break rules for the band `10^11 <= |x| < 10^12`.
fn ambiguous_band_unit(value: f64) -> EpochUnit {
    let seconds_year = 1970.0 + value / MEAN_YEAR_SECONDS;
    let millis_year = 1970.0 + value / (MEAN_YEAR_SECONDS * 1_000.0);
    if seconds_year > SECONDS_CUTOFF_YEAR {
        return EpochUnit::Seconds;
    }
    if MS_WINDOW.contains(&millis_year) {
        return EpochUnit::Milliseconds;
    }
    if valid_as_milliseconds(value) && !valid_as_seconds(value) {
        EpochUnit::Milliseconds
    } else {
        EpochUnit::Seconds
    }
}

fn valid_as_milliseconds(value: f64) -> bool {
    Timestamp::from_millisecond(WeakF64(value).truncate::<i64>()).is_ok()
}

fn valid_as_seconds(value: f64) -> bool {
    Timestamp::from_second(WeakF64(value).truncate::<i64>()).is_ok()
}

/// The bare-number strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberStrategy;

impl ParseStrategy for NumberStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::NUMBER,
            priority: 60,
            description: "bare epoch number, seconds or milliseconds",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::Number(_))
    }

    fn confidence(&self, input: &TemporalInput, _ctx: &ParseContext) -> f64 {
        match input {
            TemporalInput::Number(n) if !n.is_finite() => 0.1,
            // The ambiguous band is exactly the low-certainty region.
            TemporalInput::Number(n) if n.abs() >= SECONDS_CEILING && n.abs() < MS_FLOOR => 0.7,
            TemporalInput::Number(_) => 1.0,
            _ => 0.0,
        }
    }

    fn validate(&self, input: &TemporalInput, ctx: &ParseContext) -> Validation {
        let TemporalInput::Number(n) = input else {
            return Validation::invalid(format!(
                "`{}` input is outside the `number` strategy's domain",
                input.type_name(),
            ));
        };
        if !n.is_finite() {
            return Validation::invalid("number value is not a finite value.");
        }
        let normalized = self.normalize(input, ctx);
        let mut validation = Validation::valid(normalized.input, self.confidence(input, ctx));
        if n.abs() >= SECONDS_CEILING && n.abs() < MS_FLOOR {
            validation = validation
                .with_warning("value falls in the ambiguous seconds/milliseconds band");
        }
        validation
    }

    fn normalize(&self, input: &TemporalInput, _ctx: &ParseContext) -> Normalized {
        let TemporalInput::Number(n) = input else {
            return Normalized::untouched(input.clone());
        };
        let (integral, transform) = WeakF64(*n).to_integral();
        Normalized {
            input: TemporalInput::Number(integral),
            applied_transforms: transform.into_iter().collect(),
        }
    }

    fn check_fast_path(&self, input: &TemporalInput, ctx: &ParseContext) -> FastPath {
        // Unambiguous sub-case: a non-negative integral count of seconds
        // below the seconds ceiling decides identically to the full
        // rule chain.
        let TemporalInput::Number(n) = input else {
            return FastPath::miss();
        };
        if n.is_finite() && n.fract() == 0.0 && *n >= 0.0 && *n < SECONDS_CEILING {
            if let Ok(ts) = Timestamp::from_second(*n as i64) {
                return FastPath::hit(ts.to_zoned(ctx.time_zone().clone()), 1.0);
            }
        }
        FastPath::miss()
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::Number(n) = input else {
            return Err(ParseError::assert().with_message("number strategy invoked off-domain."));
        };
        let decision = decide_unit(*n)?;
        let timestamp =
            Timestamp::from_millisecond(decision.epoch_milliseconds).map_err(|e| {
                ParseError::structure().with_message(format!(
                    "epoch value {n} ({:?}) is outside the representable range: {e}",
                    decision.unit,
                ))
            })?;
        Ok(timestamp.to_zoned(ctx.time_zone().clone()))
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
    use super::{decide_unit, EpochUnit, NumberStrategy};
    use crate::context::ParseContext;
    use crate::input::TemporalInput;
    use crate::options::{CalendarId, Overflow};
    use crate::strategy::ParseStrategy;
    use jiff::tz::TimeZone;

    fn utc_ctx() -> ParseContext {
        ParseContext::new(TimeZone::UTC, CalendarId::ISO8601, Overflow::Constrain)
    }

    #[test]
    fn non_finite_is_rejected() {
        assert!(decide_unit(f64::NAN).is_err());
        assert!(decide_unit(f64::INFINITY).is_err());
        assert!(decide_unit(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn thirteen_digits_are_milliseconds() {
        let decision = decide_unit(1_000_000_000_000.0).unwrap();
        assert_eq!(decision.unit, EpochUnit::Milliseconds);
        assert_eq!(decision.epoch_milliseconds, 1_000_000_000_000);
        assert!(decision.applied_transforms.is_empty());
    }

    #[test]
    fn twelve_digits_decide_seconds() {
        let decision = decide_unit(999_999_999_999.0).unwrap();
        assert_eq!(decision.unit, EpochUnit::Seconds);
        assert_eq!(decision.epoch_milliseconds, 999_999_999_999_000);
        assert_eq!(decision.applied_transforms, vec!["seconds-to-milliseconds"]);
    }

    #[test]
    fn small_magnitudes_are_seconds() {
        let decision = decide_unit(1_700_000_000.0).unwrap();
        assert_eq!(decision.unit, EpochUnit::Seconds);
        assert_eq!(decision.epoch_milliseconds, 1_700_000_000_000);
    }

    #[test]
    fn negative_day_scale_is_milliseconds() {
        let decision = decide_unit(-86_400_000.0).unwrap();
        assert_eq!(decision.unit, EpochUnit::Milliseconds);
        assert_eq!(decision.epoch_milliseconds, -86_400_000);

        // One past the day-scale threshold falls through to seconds.
        let decision = decide_unit(-86_400_001.0).unwrap();
        assert_eq!(decision.unit, EpochUnit::Seconds);
    }

    #[test]
    fn negative_band_prefers_plausible_milliseconds() {
        // -5e11 ms is 1954; -5e11 s is far outside the representable
        // range, so milliseconds win the default tie-break.
        let decision = decide_unit(-500_000_000_000.0).unwrap();
        assert_eq!(decision.unit, EpochUnit::Milliseconds);
    }

    #[test]
    fn fractional_values_are_coerced_before_unit_conversion() {
        let decision = decide_unit(1_700_000_000.9).unwrap();
        assert_eq!(decision.unit, EpochUnit::Seconds);
        assert_eq!(decision.epoch_milliseconds, 1_700_000_000_000);
        assert_eq!(
            decision.applied_transforms,
            vec!["truncate-fraction", "seconds-to-milliseconds"],
        );
    }

    #[test]
    fn parse_seconds_and_milliseconds_agree() {
        let ctx = utc_ctx();
        let strategy = NumberStrategy;
        let from_seconds = strategy
            .parse(&TemporalInput::Number(1_700_000_000.0), &ctx)
            .unwrap();
        let from_millis = strategy
            .parse(&TemporalInput::Number(1_700_000_000_000.0), &ctx)
            .unwrap();
        assert_eq!(from_seconds.timestamp(), from_millis.timestamp());
        assert_eq!(from_seconds.timestamp().as_second(), 1_700_000_000);
    }

    #[test]
    fn negative_near_epoch_law() {
        let ctx = utc_ctx();
        let zoned = NumberStrategy
            .parse(&TemporalInput::Number(-86_400_000.0), &ctx)
            .unwrap();
        assert_eq!(zoned.year(), 1969);
        assert_eq!(zoned.month(), 12);
        assert_eq!(zoned.day(), 31);
    }

    #[test]
    fn fast_path_matches_full_parse() {
        let ctx = utc_ctx();
        let strategy = NumberStrategy;
        let input = TemporalInput::Number(1_700_000_000.0);
        let fast = strategy.check_fast_path(&input, &ctx);
        let full = strategy.parse(&input, &ctx).unwrap();
        assert_eq!(fast.value.unwrap().timestamp(), full.timestamp());

        // Negative values never take the fast path.
        let negative = TemporalInput::Number(-60.0);
        assert!(strategy.check_fast_path(&negative, &ctx).value.is_none());
    }

    #[test]
    fn normalize_is_idempotent() {
        let ctx = utc_ctx();
        let strategy = NumberStrategy;
        let once = strategy.normalize(&TemporalInput::Number(1.5), &ctx);
        let twice = strategy.normalize(&once.input, &ctx);
        assert!(twice.applied_transforms.is_empty());
        match (&once.input, &twice.input) {
            (TemporalInput::Number(a), TemporalInput::Number(b)) => assert_eq!(a, b),
            other => panic!("unexpected normalization output: {other:?}"),
        }
    }
}
