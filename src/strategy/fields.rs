//! The field-object strategy.
//!
//! Converts a partial [`DateTimeFields`] record. Year, month, and day
//! are required; the remaining fields default. Out-of-range fields are
//! clamped under [`Overflow::Constrain`] and fail under
//! [`Overflow::Reject`]. A record-level time zone or offset overrides
//! the resolved target zone.

use crate::context::ParseContext;
use crate::input::{DateTimeFields, TemporalInput};
use crate::options::Overflow;
use crate::strategy::{
    tags, Cost, OptimizationHints, ParseStrategy, StrategyDescriptor, Validation,
};
use crate::{host, ParseError, ParseResult};
use jiff::civil;
use jiff::tz::TimeZone;
use jiff::Zoned;

/// The field-object strategy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldsStrategy;

fn record_zone(fields: &DateTimeFields, ctx: &ParseContext) -> ParseResult<TimeZone> {
    if let Some(id) = &fields.time_zone {
        return host::resolve_time_zone(id);
    }
    if let Some(offset) = &fields.offset {
        return host::resolve_time_zone(offset);
    }
    Ok(ctx.time_zone().clone())
}

fn resolve_date(fields: &DateTimeFields, overflow: Overflow) -> ParseResult<civil::Date> {
    let missing = fields.missing_required();
    if !missing.is_empty() {
        return Err(ParseError::structure()
            .with_message(format!("missing required field(s): {}.", missing.join(", "))));
    }
    // Requireds are present past this point.
    let year = fields.year.ok_or_else(ParseError::assert)?;
    let month = fields.month.ok_or_else(ParseError::assert)?;
    let day = fields.day.ok_or_else(ParseError::assert)?;

    match overflow {
        Overflow::Reject => civil::Date::new(year, month, day).map_err(ParseError::from_host),
        Overflow::Constrain => {
            let month = num_traits::clamp(month, 1, 12);
            let first = civil::Date::new(year, month, 1).map_err(ParseError::from_host)?;
            let day = num_traits::clamp(day, 1, first.days_in_month());
            civil::Date::new(year, month, day).map_err(ParseError::from_host)
        }
    }
}

fn resolve_time(fields: &DateTimeFields, overflow: Overflow) -> ParseResult<civil::Time> {
    let hour = fields.hour.unwrap_or(0);
    let minute = fields.minute.unwrap_or(0);
    let second = fields.second.unwrap_or(0);
    let millisecond = fields.millisecond.unwrap_or(0);
    let microsecond = fields.microsecond.unwrap_or(0);
    let nanosecond = fields.nanosecond.unwrap_or(0);

    let (hour, minute, second, millisecond, microsecond, nanosecond) = match overflow {
        Overflow::Reject => (hour, minute, second, millisecond, microsecond, nanosecond),
        Overflow::Constrain => (
            num_traits::clamp(hour, 0, 23),
            num_traits::clamp(minute, 0, 59),
            num_traits::clamp(second, 0, 59),
            num_traits::clamp(millisecond, 0, 999),
            num_traits::clamp(microsecond, 0, 999),
            num_traits::clamp(nanosecond, 0, 999),
        ),
    };

    // Summed in i64: unclamped i16 fields can overflow an i32 product.
    let subsec = i64::from(millisecond) * 1_000_000
        + i64::from(microsecond) * 1_000
        + i64::from(nanosecond);
    if !(0..1_000_000_000).contains(&subsec) {
        return Err(ParseError::structure()
            .with_message(format!("sub-second fields total {subsec} nanoseconds.")));
    }
    civil::Time::new(hour, minute, second, subsec as i32).map_err(ParseError::from_host)
}

fn convert(fields: &DateTimeFields, ctx: &ParseContext) -> ParseResult<Zoned> {
    let zone = record_zone(fields, ctx)?;
    let date = resolve_date(fields, ctx.overflow())?;
    let time = resolve_time(fields, ctx.overflow())?;
    date.to_datetime(time)
        .to_zoned(zone)
        .map_err(ParseError::from_host)
}

impl ParseStrategy for FieldsStrategy {
    fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            tag: tags::FIELDS,
            priority: 45,
            description: "partial field record under the overflow policy",
        }
    }

    fn can_handle(&self, input: &TemporalInput, _ctx: &ParseContext) -> bool {
        matches!(input, TemporalInput::Fields(_))
    }

    fn confidence(&self, input: &TemporalInput, _ctx: &ParseContext) -> f64 {
        match input {
            TemporalInput::Fields(f) if f.missing_required().is_empty() => 0.9,
            TemporalInput::Fields(f) if !f.is_empty() => 0.4,
            TemporalInput::Fields(_) => 0.1,
            _ => 0.0,
        }
    }

    fn validate(&self, input: &TemporalInput, ctx: &ParseContext) -> Validation {
        let TemporalInput::Fields(fields) = input else {
            return Validation::invalid(format!(
                "`{}` input is outside the `fields` strategy's domain",
                input.type_name(),
            ));
        };
        let missing = fields.missing_required();
        if !missing.is_empty() {
            return Validation::invalid(format!(
                "missing required field(s): {}.",
                missing.join(", "),
            ));
        }
        if let (Some(_), Some(_)) = (&fields.time_zone, &fields.offset) {
            let normalized = self.normalize(input, ctx);
            return Validation::valid(normalized.input, self.confidence(input, ctx))
                .with_warning("both time_zone and offset are set; time_zone wins");
        }
        let normalized = self.normalize(input, ctx);
        Validation::valid(normalized.input, self.confidence(input, ctx))
    }

    fn parse(&self, input: &TemporalInput, ctx: &ParseContext) -> ParseResult<Zoned> {
        let TemporalInput::Fields(fields) = input else {
            return Err(ParseError::assert().with_message("fields strategy invoked off-domain."));
        };
        convert(fields, ctx)
    }

    fn optimization_hints(&self) -> OptimizationHints {
        OptimizationHints {
            cacheable: true,
            cost: Cost::Cheap,
        }
    }
}
