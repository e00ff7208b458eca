//! Per-call parse context and the result model.
//!
//! A [`ParseContext`] is created fresh by the orchestrator for one call,
//! owned exclusively by that call, and discarded afterwards. Strategies
//! receive it immutably.

use crate::options::{CalendarId, Overflow};
use crate::ParseError;
use core::time::Duration;
use jiff::tz::TimeZone;
use jiff::Zoned;
use rustc_hash::FxHashMap;
use std::time::Instant;

/// The context the orchestrator threads through one parse call.
#[derive(Debug, Clone)]
pub struct ParseContext {
    time_zone: TimeZone,
    calendar: CalendarId,
    overflow: Overflow,
    explicit_zone: bool,
    explicit_calendar: bool,
    start: Instant,
    metadata: FxHashMap<&'static str, String>,
}

impl ParseContext {
    pub(crate) fn new(time_zone: TimeZone, calendar: CalendarId, overflow: Overflow) -> Self {
        Self {
            time_zone,
            calendar,
            overflow,
            explicit_zone: false,
            explicit_calendar: false,
            start: Instant::now(),
            metadata: FxHashMap::default(),
        }
    }

    pub(crate) fn with_explicit(mut self, zone: bool, calendar: bool) -> Self {
        self.explicit_zone = zone;
        self.explicit_calendar = calendar;
        self
    }

    /// The resolved target time zone for this call.
    #[inline]
    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// The resolved target calendar for this call.
    #[inline]
    #[must_use]
    pub fn calendar(&self) -> CalendarId {
        self.calendar
    }

    /// The overflow policy for this call.
    #[inline]
    #[must_use]
    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Whether the caller supplied the time zone explicitly, as opposed
    /// to it being the process default.
    #[inline]
    #[must_use]
    pub fn zone_requested(&self) -> bool {
        self.explicit_zone
    }

    /// Whether the caller supplied the calendar explicitly.
    #[inline]
    #[must_use]
    pub fn calendar_requested(&self) -> bool {
        self.explicit_calendar
    }

    /// Time elapsed since this call started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The diagnostic metadata recorded for this call.
    #[must_use]
    pub fn metadata(&self) -> &FxHashMap<&'static str, String> {
        &self.metadata
    }

    pub(crate) fn note(&mut self, key: &'static str, value: impl Into<String>) {
        self.metadata.insert(key, value.into());
    }
}

/// A successful parse: the canonical value plus provenance.
#[derive(Debug, Clone)]
pub struct ParseSuccess {
    /// The canonical zoned date-time value.
    pub value: Zoned,
    /// The calendar the value was resolved under.
    pub calendar: CalendarId,
    /// The tag of the strategy that produced the value.
    pub strategy: &'static str,
    /// Wall time the call took.
    pub elapsed: Duration,
    /// Whether a fast path produced the value.
    pub fast_path: bool,
    /// The producing strategy's self-assessed certainty.
    pub confidence: f64,
}

/// A failed parse: the classified error plus provenance.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// The classified error.
    pub error: ParseError,
    /// The strategy that produced the failure, if one was selected.
    pub strategy: Option<&'static str>,
    /// Wall time the call took.
    pub elapsed: Duration,
}

/// The outcome of one parse call. The selected strategy's result is
/// final; there is no fallback to other strategies.
pub type ParseOutcome = Result<ParseSuccess, ParseFailure>;

#[cfg(test)]
mod tests {
    use super::ParseContext;
    use crate::options::{CalendarId, Overflow};
    use jiff::tz::TimeZone;

    #[test]
    fn context_defaults_and_notes() {
        let mut ctx = ParseContext::new(TimeZone::UTC, CalendarId::ISO8601, Overflow::Constrain);
        assert!(!ctx.zone_requested());
        assert!(!ctx.calendar_requested());
        ctx.note("absent", "defaulted to current instant");
        assert_eq!(
            ctx.metadata().get("absent").map(String::as_str),
            Some("defaulted to current instant")
        );

        let ctx = ctx.with_explicit(true, false);
        assert!(ctx.zone_requested());
        assert!(!ctx.calendar_requested());
    }
}
