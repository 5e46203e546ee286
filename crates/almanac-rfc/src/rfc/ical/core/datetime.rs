//! Date, date-time, and UTC offset text forms (RFC 5545 §3.3.4, §3.3.5, §3.3.14).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::error::{RfcError, RfcResult};

/// `yyyyMMdd`
pub const DATE_FORMAT: &str = "%Y%m%d";
/// `yyyyMMdd'T'HHmmss`, floating or zoned.
pub const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";
/// `yyyyMMdd'T'HHmmss'Z'`
pub const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[must_use]
pub fn format_local(local: NaiveDateTime) -> String {
    local.format(LOCAL_FORMAT).to_string()
}

#[must_use]
pub fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format(UTC_FORMAT).to_string()
}

/// Parses an RRULE UNTIL value: a UTC date-time, or a bare date taken as
/// midnight UTC.
pub(crate) fn parse_until(s: &str) -> Option<DateTime<Utc>> {
    if let Some(local) = s.strip_suffix(['Z', 'z']) {
        if local.len() != 15 {
            return None;
        }
        return NaiveDateTime::parse_from_str(local, LOCAL_FORMAT)
            .ok()
            .map(|dt| dt.and_utc());
    }
    if s.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// UTC offset (RFC 5545 §3.3.14), e.g. `+0200` or `-0430`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UtcOffset {
    /// Total seconds east of UTC.
    seconds: i32,
}

impl UtcOffset {
    /// UTC offset (zero).
    pub const UTC: Self = Self { seconds: 0 };

    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }

    /// Converts a signed delta, saturating at the `i32` range.
    #[must_use]
    pub fn from_delta(delta: TimeDelta) -> Self {
        let seconds = i32::try_from(delta.num_seconds())
            .unwrap_or(if delta < TimeDelta::zero() { i32::MIN } else { i32::MAX });
        Self { seconds }
    }

    #[must_use]
    pub const fn as_seconds(self) -> i32 {
        self.seconds
    }

    #[must_use]
    pub fn as_delta(self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.seconds))
    }

    /// Returns this offset shifted by `delta`.
    #[must_use]
    pub fn shifted(self, delta: TimeDelta) -> Self {
        Self::from_delta(self.as_delta() + delta)
    }
}

/// Seconds are written only when non-zero.
impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds >= 0 { '+' } else { '-' };
        let abs = self.seconds.unsigned_abs();
        let hours = abs / 3600;
        let minutes = (abs % 3600) / 60;
        let seconds = abs % 60;
        write!(f, "{sign}{hours:02}{minutes:02}")?;
        if seconds != 0 {
            write!(f, "{seconds:02}")?;
        }
        Ok(())
    }
}

impl FromStr for UtcOffset {
    type Err = RfcError;

    fn from_str(s: &str) -> RfcResult<Self> {
        let invalid = || RfcError::InvalidUtcOffset(s.to_string());

        let (sign, digits) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        if !(digits.len() == 4 || digits.len() == 6) || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let field = |range: std::ops::Range<usize>| digits[range].parse::<i32>().map_err(|_e| invalid());
        let hours = field(0..2)?;
        let minutes = field(2..4)?;
        let seconds = if digits.len() == 6 { field(4..6)? } else { 0 };
        if minutes > 59 || seconds > 59 {
            return Err(invalid());
        }

        let total = hours * 3600 + minutes * 60 + seconds;
        // "-0000" is not a valid offset.
        if sign < 0 && total == 0 {
            return Err(invalid());
        }
        Ok(Self::from_seconds(sign * total))
    }
}
