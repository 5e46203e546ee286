//! Value type parsers for iCalendar (RFC 5545 §3.3).
//!
//! These work on a property value taken out of the block tree, so their
//! errors carry the rejected value instead of a stream position.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::datetime::{DATE_FORMAT, LOCAL_FORMAT};

/// Parses a DATE value (RFC 5545 §3.3.4), e.g. `19970714`.
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit calendar date.
pub fn parse_date(s: &str) -> ParseResult<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::value(ParseErrorKind::InvalidDate, s));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_e| ParseError::value(ParseErrorKind::InvalidDate, s))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5) without a `Z` suffix.
///
/// ## Errors
/// Returns an error unless the string is `yyyyMMddTHHmmss`.
pub fn parse_local_date_time(s: &str) -> ParseResult<NaiveDateTime> {
    let invalid = || ParseError::value(ParseErrorKind::InvalidDateTime, s);
    if s.len() != 15 || s.as_bytes().get(8) != Some(&b'T') {
        return Err(invalid());
    }
    NaiveDateTime::parse_from_str(s, LOCAL_FORMAT).map_err(|_e| invalid())
}

/// Parses a UTC DATE-TIME value, `yyyyMMddTHHmmssZ`.
///
/// ## Errors
/// Returns an error if the `Z` suffix is missing or the date-time is invalid.
pub fn parse_utc_date_time(s: &str) -> ParseResult<DateTime<Utc>> {
    let local = s
        .strip_suffix(['Z', 'z'])
        .ok_or_else(|| ParseError::value(ParseErrorKind::InvalidDateTime, s))?;
    parse_local_date_time(local)
        .map(|dt| dt.and_utc())
        .map_err(|_e| ParseError::value(ParseErrorKind::InvalidDateTime, s))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: `[+|-]P nW` or `[+|-]P [nD] [T [nH] [nM] [nS]]`.
///
/// ## Errors
/// Returns an error if the string is not a valid duration.
pub fn parse_duration(s: &str) -> ParseResult<TimeDelta> {
    let invalid = || ParseError::value(ParseErrorKind::InvalidDuration, s);

    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let rest = rest.strip_prefix(['P', 'p']).ok_or_else(invalid)?;
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total = TimeDelta::zero();
    let mut number = String::new();
    let mut in_time = false;
    let mut seen_unit = false;
    let mut seen_time_unit = false;

    for c in rest.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }

        let c = c.to_ascii_uppercase();
        if c == 'T' {
            if in_time || !number.is_empty() {
                return Err(invalid());
            }
            in_time = true;
            continue;
        }

        let n: i64 = number.parse().map_err(|_e| invalid())?;
        number.clear();
        let part = match (c, in_time) {
            ('W', false) => TimeDelta::try_weeks(n),
            ('D', false) => TimeDelta::try_days(n),
            ('H', true) => TimeDelta::try_hours(n),
            ('M', true) => TimeDelta::try_minutes(n),
            ('S', true) => TimeDelta::try_seconds(n),
            _ => None,
        }
        .ok_or_else(invalid)?;
        total = total.checked_add(&part).ok_or_else(invalid)?;
        seen_unit = true;
        seen_time_unit |= in_time;
    }

    if !number.is_empty() || !seen_unit || (in_time && !seen_time_unit) {
        return Err(invalid());
    }

    Ok(if negative { -total } else { total })
}

/// Parses a BOOLEAN value (RFC 5545 §3.3.2), case-insensitive.
#[must_use]
pub fn parse_boolean(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("TRUE") {
        Some(true)
    } else if s.eq_ignore_ascii_case("FALSE") {
        Some(false)
    } else {
        None
    }
}

/// Unescapes a TEXT value (RFC 5545 §3.3.11).
///
/// Unknown escapes are kept as written.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Decodes RFC 6868 caret escapes in a parameter value (`^^`, `^n`, `^'`).
///
/// A caret before any other character is kept.
#[must_use]
pub fn decode_caret(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '^' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => result.push('^'),
            Some('n' | 'N') => result.push('\n'),
            Some('\'') => result.push('"'),
            _ => {
                result.push('^');
                continue;
            }
        }
        chars.next();
    }

    result
}
