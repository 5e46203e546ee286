//! Recurrence rule value (RFC 5545 §3.3.10).
//!
//! Covers the rule parts needed to describe yearly time-zone transitions.
//! Expansion of rules into occurrences is not supported.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc, Weekday};

use super::datetime::{format_utc, parse_until};
use crate::error::{RfcError, RfcResult};

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-letter weekday code used in BYDAY.
#[must_use]
pub const fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}

/// Parses a two-letter weekday code (case-insensitive).
#[must_use]
pub fn parse_weekday_code(s: &str) -> Option<Weekday> {
    Some(match s.to_ascii_uppercase().as_str() {
        "SU" => Weekday::Sun,
        "MO" => Weekday::Mon,
        "TU" => Weekday::Tue,
        "WE" => Weekday::Wed,
        "TH" => Weekday::Thu,
        "FR" => Weekday::Fri,
        "SA" => Weekday::Sat,
        _ => return None,
    })
}

/// Weekday with optional occurrence number, e.g. `MO`, `2SU`, `-1SU`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Occurrence within the period (-53..=53, never 0).
    pub ordinal: Option<i8>,
    pub weekday: Weekday,
}

impl WeekdayNum {
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    #[must_use]
    pub const fn nth(ordinal: i8, weekday: Weekday) -> Self {
        Self {
            ordinal: Some(ordinal),
            weekday,
        }
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        f.write_str(weekday_code(self.weekday))
    }
}

impl FromStr for WeekdayNum {
    type Err = RfcError;

    fn from_str(s: &str) -> RfcResult<Self> {
        let invalid = || RfcError::InvalidRecurrenceRule(format!("invalid BYDAY entry {s:?}"));
        let split = s.len().checked_sub(2).ok_or_else(invalid)?;
        if !s.is_char_boundary(split) {
            return Err(invalid());
        }
        let (ordinal, code) = s.split_at(split);
        let weekday = parse_weekday_code(code).ok_or_else(invalid)?;
        if ordinal.is_empty() {
            return Ok(Self::every(weekday));
        }
        let n = ordinal.parse::<i8>().map_err(|_e| invalid())?;
        if n == 0 || !(-53..=53).contains(&n) {
            return Err(invalid());
        }
        Ok(Self::nth(n, weekday))
    }
}

/// A recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: Option<u32>,
    /// Inclusive upper bound, always UTC.
    pub until: Option<DateTime<Utc>>,
    pub count: Option<u32>,
    pub by_day: Vec<WeekdayNum>,
    pub by_month_day: Vec<i8>,
    pub by_month: Vec<u8>,
}

impl RecurrenceRule {
    #[must_use]
    pub const fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: None,
            until: None,
            count: None,
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_month: Vec::new(),
        }
    }

    /// `FREQ=YEARLY;BYDAY=<n><weekday>;BYMONTH=<month>`
    #[must_use]
    pub fn yearly_on_weekday(month: u8, day: WeekdayNum) -> Self {
        Self {
            by_day: vec![day],
            by_month: vec![month],
            ..Self::new(Frequency::Yearly)
        }
    }

    /// `FREQ=YEARLY;BYMONTHDAY=<day>;BYMONTH=<month>`
    #[must_use]
    pub fn yearly_on_date(month: u8, day: u8) -> Self {
        Self {
            by_month_day: vec![i8::try_from(day).unwrap_or(i8::MAX)],
            by_month: vec![month],
            ..Self::new(Frequency::Yearly)
        }
    }

    #[must_use]
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, name: &str, items: &[T]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    write!(f, ";{name}=")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FREQ={}", self.frequency)?;
        if let Some(interval) = self.interval {
            write!(f, ";INTERVAL={interval}")?;
        }
        write_list(f, "BYDAY", &self.by_day)?;
        write_list(f, "BYMONTHDAY", &self.by_month_day)?;
        write_list(f, "BYMONTH", &self.by_month)?;
        if let Some(until) = self.until {
            write!(f, ";UNTIL={}", format_utc(until))?;
        }
        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }
        Ok(())
    }
}

fn parse_list<T>(value: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Vec<T>> {
    value.split(',').map(|item| parse(item.trim())).collect()
}

impl FromStr for RecurrenceRule {
    type Err = RfcError;

    fn from_str(s: &str) -> RfcResult<Self> {
        let invalid = |part: &str| RfcError::InvalidRecurrenceRule(format!("invalid rule part {part:?}"));

        let mut frequency = None;
        let mut rule = Self::new(Frequency::Yearly);

        for part in s.split(';').filter(|p| !p.is_empty()) {
            let (name, value) = part.split_once('=').ok_or_else(|| invalid(part))?;
            match name.to_ascii_uppercase().as_str() {
                "FREQ" => frequency = Some(Frequency::parse(value).ok_or_else(|| invalid(part))?),
                "INTERVAL" => {
                    rule.interval = Some(value.parse().map_err(|_e| invalid(part))?);
                }
                "COUNT" => rule.count = Some(value.parse().map_err(|_e| invalid(part))?),
                "UNTIL" => rule.until = Some(parse_until(value).ok_or_else(|| invalid(part))?),
                "BYDAY" => {
                    rule.by_day = value
                        .split(',')
                        .map(|item| item.trim().parse::<WeekdayNum>())
                        .collect::<RfcResult<_>>()?;
                }
                "BYMONTHDAY" => {
                    rule.by_month_day = parse_list(value, |v| {
                        v.parse::<i8>()
                            .ok()
                            .filter(|d| *d != 0 && (-31..=31).contains(d))
                    })
                    .ok_or_else(|| invalid(part))?;
                }
                "BYMONTH" => {
                    rule.by_month = parse_list(value, |v| {
                        v.parse::<u8>().ok().filter(|m| (1..=12).contains(m))
                    })
                    .ok_or_else(|| invalid(part))?;
                }
                other => {
                    tracing::trace!(part = other, "Ignoring unsupported RRULE part");
                }
            }
        }

        rule.frequency = frequency
            .ok_or_else(|| RfcError::InvalidRecurrenceRule("missing FREQ".to_string()))?;
        if rule.until.is_some() && rule.count.is_some() {
            return Err(RfcError::InvalidRecurrenceRule(
                "UNTIL and COUNT are mutually exclusive".to_string(),
            ));
        }
        Ok(rule)
    }
}
