//! Process-wide host configuration.
//!
//! Holds the default time zone and calendar consulted whenever
//! [`crate::ParseOptions`] omit them, and the identifier-resolution
//! routine shared by the orchestrator and the field strategy.

use crate::options::CalendarId;
use crate::{ParseError, ParseResult};
use core::str::FromStr;
use jiff::tz::{Offset, TimeZone};
use std::sync::{OnceLock, RwLock};

#[derive(Debug, Clone)]
struct HostConfig {
    time_zone: TimeZone,
    calendar: CalendarId,
}

fn config() -> &'static RwLock<HostConfig> {
    static CONFIG: OnceLock<RwLock<HostConfig>> = OnceLock::new();
    CONFIG.get_or_init(|| {
        RwLock::new(HostConfig {
            time_zone: system_time_zone(),
            calendar: CalendarId::default(),
        })
    })
}

/// Returns the host system's time zone, falling back to UTC when the
/// platform does not report one.
#[must_use]
pub(crate) fn system_time_zone() -> TimeZone {
    match iana_time_zone::get_timezone() {
        Ok(id) => TimeZone::get(&id).unwrap_or(TimeZone::UTC),
        Err(_) => {
            log::debug!("system time zone unavailable; defaulting to UTC");
            TimeZone::UTC
        }
    }
}

/// Returns the process-wide default time zone.
#[must_use]
pub fn default_time_zone() -> TimeZone {
    config()
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .time_zone
        .clone()
}

/// Sets the process-wide default time zone.
pub fn set_default_time_zone(id: &str) -> ParseResult<()> {
    let tz = resolve_time_zone(id)?;
    log::debug!("default time zone set to `{id}`");
    config()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .time_zone = tz;
    Ok(())
}

/// Returns the process-wide default calendar.
#[must_use]
pub fn default_calendar() -> CalendarId {
    config()
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .calendar
}

/// Sets the process-wide default calendar.
pub fn set_default_calendar(id: &str) -> ParseResult<()> {
    let calendar = CalendarId::from_str(id)?;
    config()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .calendar = calendar;
    Ok(())
}

/// Resolves a time-zone identifier to a concrete [`TimeZone`].
///
/// Accepts IANA identifiers (`America/New_York`, `UTC`) and fixed offsets
/// (`+05:30`, `-08`, `+0130`). An unresolvable identifier is a
/// [`crate::ErrorKind::TimezoneResolution`] failure naming the id.
pub fn resolve_time_zone(id: &str) -> ParseResult<TimeZone> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ParseError::timezone().with_message("empty time zone identifier."));
    }
    if id.starts_with('+') || id.starts_with('-') {
        return parse_offset(id)
            .map(TimeZone::fixed)
            .ok_or_else(|| invalid_identifier(id));
    }
    TimeZone::get(id).map_err(|_| invalid_identifier(id))
}

fn invalid_identifier(id: &str) -> ParseError {
    ParseError::timezone().with_message(format!("`{id}` is not a valid time zone identifier."))
}

/// Parses `±HH`, `±HH:MM`, or `±HHMM` into a fixed offset.
fn parse_offset(id: &str) -> Option<Offset> {
    let (sign, digits) = match id.as_bytes().first()? {
        b'+' => (1i32, &id[1..]),
        b'-' => (-1i32, &id[1..]),
        _ => return None,
    };
    if !digits.is_ascii() {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..].parse::<i32>().ok()?,
        ),
        5 if digits.as_bytes()[2] == b':' => (
            digits[..2].parse::<i32>().ok()?,
            digits[3..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Offset::from_seconds(sign * (hours * 3600 + minutes * 60)).ok()
}

#[cfg(test)]
mod tests {
    use super::{
        default_calendar, default_time_zone, parse_offset, resolve_time_zone,
        set_default_calendar, set_default_time_zone,
    };
    use crate::options::CalendarId;
    use crate::ErrorKind;

    #[test]
    fn resolves_iana_identifiers() {
        assert!(resolve_time_zone("America/New_York").is_ok());
        assert!(resolve_time_zone("UTC").is_ok());
    }

    #[test]
    fn resolves_fixed_offsets() {
        let tz = resolve_time_zone("+05:30").unwrap();
        let at_epoch = jiff::Timestamp::UNIX_EPOCH.to_zoned(tz);
        assert_eq!(at_epoch.offset().seconds(), 5 * 3600 + 30 * 60);
        assert_eq!(parse_offset("-08").unwrap().seconds(), -8 * 3600);
        assert!(resolve_time_zone("+0130").is_ok());
    }

    // One test owns both process-wide defaults; splitting it would race
    // under the parallel test runner.
    #[test]
    fn process_defaults_round_trip() {
        let original = default_time_zone();

        set_default_time_zone("Asia/Tokyo").unwrap();
        assert_eq!(default_time_zone().iana_name(), Some("Asia/Tokyo"));

        // A failed set keeps the previous default.
        let err = set_default_time_zone("Not/AZone").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TimezoneResolution);
        assert_eq!(default_time_zone().iana_name(), Some("Asia/Tokyo"));

        // A parse with no explicit zone consults the default.
        let parsed = crate::parse("2024-01-01T00:00:00", &crate::ParseOptions::default()).unwrap();
        assert_eq!(parsed.value.time_zone().iana_name(), Some("Asia/Tokyo"));

        set_default_calendar("gregory").unwrap();
        assert_eq!(default_calendar(), CalendarId::GREGORY);
        assert!(set_default_calendar("chinese").is_err());
        assert_eq!(default_calendar(), CalendarId::GREGORY);

        set_default_calendar("iso8601").unwrap();
        if let Some(id) = original.iana_name() {
            set_default_time_zone(id).unwrap();
        }
    }

    #[test]
    fn rejects_unknown_identifiers() {
        let err = resolve_time_zone("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TimezoneResolution);
        assert!(err.message().contains("Mars/Olympus_Mons"));
        assert!(resolve_time_zone("+25:00").is_err());
        assert!(resolve_time_zone("").is_err());
    }
}
