//! The closed tagged union of accepted input shapes.
//!
//! `TemporalInput` is the crate's model of a weakly-typed caller value:
//! a string, a bare epoch number, a native date-like holder, a host
//! temporal value, an array of positions, a partial field record, a
//! duck-typed third-party timestamp, an already-parsed value, or
//! something the crate cannot convert at all. Inputs are immutable as
//! received; strategies that reshape them return a new value.

use crate::context::ParseSuccess;
use core::fmt;
use jiff::civil;
use jiff::{Timestamp, Zoned};
use std::borrow::Cow;
use std::sync::Arc;

/// A weakly-typed date/time input.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum TemporalInput {
    /// No value supplied; defaults to the current instant.
    Absent,
    /// An ISO-8601-like string, or a bare time of day.
    Text(String),
    /// A bare epoch number, seconds or milliseconds.
    Number(f64),
    /// A native date-like value holding a possibly invalid epoch instant.
    Date(EpochDate),
    /// A host exact instant.
    Timestamp(Timestamp),
    /// A host zoned date-time.
    Zoned(Zoned),
    /// A host calendar date without time or zone.
    PlainDate(civil::Date),
    /// A host calendar date-time without zone.
    PlainDateTime(civil::DateTime),
    /// Numeric positions in fixed order: year, month (1-based), day,
    /// hour, minute, second, millisecond.
    Array(Vec<f64>),
    /// A partial field record.
    Fields(DateTimeFields),
    /// A third-party seconds-plus-nanoseconds object converted through
    /// its own method.
    SplitTimestamp(Arc<dyn TimestampLike>),
    /// An already-parsed value of this crate's own kind.
    Parsed(Box<ParseSuccess>),
    /// A boolean; never convertible.
    Bool(bool),
    /// An arbitrary value of a named runtime type; never convertible.
    Opaque(Cow<'static, str>),
}

impl TemporalInput {
    /// The runtime type name used in diagnostics and unsupported-shape
    /// errors.
    #[must_use]
    pub fn type_name(&self) -> Cow<'static, str> {
        match self {
            Self::Absent => Cow::Borrowed("absent"),
            Self::Text(_) => Cow::Borrowed("string"),
            Self::Number(_) => Cow::Borrowed("number"),
            Self::Date(_) => Cow::Borrowed("date"),
            Self::Timestamp(_) => Cow::Borrowed("instant"),
            Self::Zoned(_) => Cow::Borrowed("zoned-date-time"),
            Self::PlainDate(_) => Cow::Borrowed("plain-date"),
            Self::PlainDateTime(_) => Cow::Borrowed("plain-date-time"),
            Self::Array(_) => Cow::Borrowed("array"),
            Self::Fields(_) => Cow::Borrowed("fields"),
            Self::SplitTimestamp(_) => Cow::Borrowed("split-timestamp"),
            Self::Parsed(_) => Cow::Borrowed("parsed"),
            Self::Bool(_) => Cow::Borrowed("bool"),
            Self::Opaque(name) => name.clone(),
        }
    }

    /// An opaque input carrying only its runtime type name, for values
    /// the caller knows cannot convert.
    #[must_use]
    pub fn opaque(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self::Opaque(type_name.into())
    }
}

/// A native date-like value: a single epoch-millisecond float that may be
/// non-finite, in which case the value represents an invalid date.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EpochDate {
    epoch_milliseconds: f64,
}

impl EpochDate {
    /// A date-like value for the given epoch milliseconds.
    #[inline]
    #[must_use]
    pub fn from_epoch_milliseconds(epoch_milliseconds: f64) -> Self {
        Self { epoch_milliseconds }
    }

    /// A date-like value for the current instant.
    #[must_use]
    pub fn now() -> Self {
        Self {
            epoch_milliseconds: Timestamp::now().as_millisecond() as f64,
        }
    }

    /// The internal epoch instant, possibly non-finite.
    #[inline]
    #[must_use]
    pub fn epoch_milliseconds(&self) -> f64 {
        self.epoch_milliseconds
    }

    /// Whether the internal instant is a representable number.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.epoch_milliseconds.is_finite()
    }
}

/// A partial date-time field record.
///
/// Year, month, and day are required by the field strategy; everything
/// else defaults. A record-level time zone or offset overrides the
/// resolved target zone.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DateTimeFields {
    pub year: Option<i16>,
    /// 1-based month.
    pub month: Option<i8>,
    pub day: Option<i8>,
    pub hour: Option<i8>,
    pub minute: Option<i8>,
    pub second: Option<i8>,
    pub millisecond: Option<i16>,
    pub microsecond: Option<i16>,
    pub nanosecond: Option<i16>,
    /// Fixed offset identifier, e.g. `+05:30`.
    pub offset: Option<String>,
    /// IANA time-zone identifier.
    pub time_zone: Option<String>,
}

impl DateTimeFields {
    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// The names of the required fields that are missing.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.year.is_none() {
            missing.push("year");
        }
        if self.month.is_none() {
            missing.push("month");
        }
        if self.day.is_none() {
            missing.push("day");
        }
        missing
    }
}

/// A structural capability check for third-party timestamp objects:
/// anything exposing seconds, nanoseconds, and its own conversion method.
///
/// The conversion is delegated, and its error is wrapped as a
/// [`crate::ErrorKind::Delegate`] failure rather than propagated raw.
pub trait TimestampLike: fmt::Debug + Send + Sync {
    /// Whole seconds since the epoch.
    fn seconds(&self) -> f64;
    /// Nanoseconds within the second.
    fn nanoseconds(&self) -> f64;
    /// The object's own conversion to epoch milliseconds.
    fn to_epoch_milliseconds(&self) -> Result<i64, Box<dyn std::error::Error + Send + Sync>>;
}

/// A plain seconds-plus-nanoseconds pair implementing [`TimestampLike`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochSplit {
    pub seconds: f64,
    pub nanoseconds: f64,
}

impl EpochSplit {
    #[must_use]
    pub fn new(seconds: f64, nanoseconds: f64) -> Self {
        Self {
            seconds,
            nanoseconds,
        }
    }
}

impl TimestampLike for EpochSplit {
    fn seconds(&self) -> f64 {
        self.seconds
    }

    fn nanoseconds(&self) -> f64 {
        self.nanoseconds
    }

    fn to_epoch_milliseconds(&self) -> Result<i64, Box<dyn std::error::Error + Send + Sync>> {
        if !self.seconds.is_finite() || !self.nanoseconds.is_finite() {
            return Err("seconds and nanoseconds must be finite".into());
        }
        let millis = self.seconds * 1_000.0 + self.nanoseconds / 1_000_000.0;
        if millis.abs() > i64::MAX as f64 {
            return Err("timestamp exceeds the representable epoch range".into());
        }
        Ok(millis as i64)
    }
}

// Conversion impls for ergonomic call sites.

impl From<()> for TemporalInput {
    fn from((): ()) -> Self {
        Self::Absent
    }
}

impl<T: Into<TemporalInput>> From<Option<T>> for TemporalInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl From<&str> for TemporalInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for TemporalInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for TemporalInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for TemporalInput {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for TemporalInput {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<EpochDate> for TemporalInput {
    fn from(value: EpochDate) -> Self {
        Self::Date(value)
    }
}

impl From<Timestamp> for TemporalInput {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Zoned> for TemporalInput {
    fn from(value: Zoned) -> Self {
        Self::Zoned(value)
    }
}

impl From<civil::Date> for TemporalInput {
    fn from(value: civil::Date) -> Self {
        Self::PlainDate(value)
    }
}

impl From<civil::DateTime> for TemporalInput {
    fn from(value: civil::DateTime) -> Self {
        Self::PlainDateTime(value)
    }
}

impl From<Vec<f64>> for TemporalInput {
    fn from(value: Vec<f64>) -> Self {
        Self::Array(value)
    }
}

impl From<&[f64]> for TemporalInput {
    fn from(value: &[f64]) -> Self {
        Self::Array(value.to_vec())
    }
}

impl From<Vec<i32>> for TemporalInput {
    fn from(value: Vec<i32>) -> Self {
        Self::Array(value.into_iter().map(f64::from).collect())
    }
}

impl<const N: usize> From<[i32; N]> for TemporalInput {
    fn from(value: [i32; N]) -> Self {
        Self::Array(value.iter().copied().map(f64::from).collect())
    }
}

impl From<DateTimeFields> for TemporalInput {
    fn from(value: DateTimeFields) -> Self {
        Self::Fields(value)
    }
}

impl From<EpochSplit> for TemporalInput {
    fn from(value: EpochSplit) -> Self {
        Self::SplitTimestamp(Arc::new(value))
    }
}

impl From<Arc<dyn TimestampLike>> for TemporalInput {
    fn from(value: Arc<dyn TimestampLike>) -> Self {
        Self::SplitTimestamp(value)
    }
}

impl From<ParseSuccess> for TemporalInput {
    fn from(value: ParseSuccess) -> Self {
        Self::Parsed(Box::new(value))
    }
}

impl From<bool> for TemporalInput {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{DateTimeFields, EpochDate, EpochSplit, TemporalInput, TimestampLike};

    #[test]
    fn type_names() {
        assert_eq!(TemporalInput::from("x").type_name(), "string");
        assert_eq!(TemporalInput::from(1.0).type_name(), "number");
        assert_eq!(TemporalInput::from(true).type_name(), "bool");
        assert_eq!(TemporalInput::opaque("regexp").type_name(), "regexp");
        assert_eq!(TemporalInput::from(None::<f64>).type_name(), "absent");
    }

    #[test]
    fn invalid_epoch_date() {
        assert!(!EpochDate::from_epoch_milliseconds(f64::NAN).is_valid());
        assert!(EpochDate::from_epoch_milliseconds(0.0).is_valid());
    }

    #[test]
    fn missing_required_fields() {
        let fields = DateTimeFields {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(fields.missing_required(), vec!["month", "day"]);
        assert!(DateTimeFields::default().is_empty());
    }

    #[test]
    fn epoch_split_conversion() {
        let split = EpochSplit::new(1_700_000_000.0, 500_000_000.0);
        assert_eq!(split.to_epoch_milliseconds().unwrap(), 1_700_000_000_500);
        assert!(EpochSplit::new(f64::INFINITY, 0.0)
            .to_epoch_milliseconds()
            .is_err());
    }
}
