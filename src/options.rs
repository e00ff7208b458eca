//! Caller-facing parse options.
//!
//! Options are immutable per call. Anything left unset falls back to the
//! process-wide defaults in [`crate::host`].

use crate::{ParseError, ParseResult};
use core::fmt;
use core::str::FromStr;

/// Options supplied alongside an input to [`crate::parse`].
#[non_exhaustive]
#[derive(Debug, Default, Clone)]
pub struct ParseOptions {
    /// Target time-zone identifier (IANA id or fixed offset such as
    /// `+05:30`). Validated before any strategy runs.
    pub time_zone: Option<String>,
    /// Target calendar identifier. Validated before any strategy runs.
    pub calendar: Option<String>,
    /// Overflow policy for field records.
    pub overflow: Overflow,
}

impl ParseOptions {
    /// Options targeting the given time zone.
    #[must_use]
    pub fn with_time_zone(mut self, id: impl Into<String>) -> Self {
        self.time_zone = Some(id.into());
        self
    }

    /// Options targeting the given calendar.
    #[must_use]
    pub fn with_calendar(mut self, id: impl Into<String>) -> Self {
        self.calendar = Some(id.into());
        self
    }

    /// Options with the given overflow policy.
    #[must_use]
    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }
}

/// The overflow policy applied when resolving calendar fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Out-of-range fields are clamped into range.
    #[default]
    Constrain,
    /// Out-of-range fields are a structural failure.
    Reject,
}

impl FromStr for Overflow {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constrain" => Ok(Self::Constrain),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseError::structure()
                .with_message(format!("{s} is not a valid overflow policy."))),
        }
    }
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constrain => "constrain",
            Self::Reject => "reject",
        })
    }
}

/// A validated calendar identifier.
///
/// The host platform computes proleptic-Gregorian dates only, so the
/// accepted identifiers are the ones that resolve to that calendar.
/// Anything else is a structural failure naming the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarId(&'static str);

impl CalendarId {
    /// The ISO 8601 calendar.
    pub const ISO8601: CalendarId = CalendarId("iso8601");
    /// The Gregorian calendar.
    pub const GREGORY: CalendarId = CalendarId("gregory");

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for CalendarId {
    fn default() -> Self {
        Self::ISO8601
    }
}

impl FromStr for CalendarId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("iso8601") {
            return Ok(Self::ISO8601);
        }
        if s.eq_ignore_ascii_case("gregory") || s.eq_ignore_ascii_case("gregorian") {
            return Ok(Self::GREGORY);
        }
        Err(ParseError::structure()
            .with_message(format!("`{s}` is not a supported calendar identifier.")))
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
