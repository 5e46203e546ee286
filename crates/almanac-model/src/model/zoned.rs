use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::timezone::TimeZone;

/// Which zone a wall-clock value belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneRef {
    Utc,
    Zone(TimeZone),
    /// A `TZID` that could not be resolved; no offset is known.
    Unresolved(String),
}

/// A wall-clock date-time paired with the zone needed to place it on the
/// UTC timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedDateTime {
    local: NaiveDateTime,
    zone: ZoneRef,
}

impl ZonedDateTime {
    #[must_use]
    pub fn utc(instant: DateTime<Utc>) -> Self {
        Self {
            local: instant.naive_utc(),
            zone: ZoneRef::Utc,
        }
    }

    /// A calendar date for all-day events, held as UTC midnight.
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self {
            local: date.and_time(NaiveTime::MIN),
            zone: ZoneRef::Utc,
        }
    }

    #[must_use]
    pub fn new(local: NaiveDateTime, zone: TimeZone) -> Self {
        Self {
            local,
            zone: ZoneRef::Zone(zone),
        }
    }

    #[must_use]
    pub fn unresolved(local: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self {
            local,
            zone: ZoneRef::Unresolved(tzid.into()),
        }
    }

    #[must_use]
    pub const fn local(&self) -> NaiveDateTime {
        self.local
    }

    #[must_use]
    pub const fn zone(&self) -> &ZoneRef {
        &self.zone
    }

    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.zone, ZoneRef::Utc)
    }

    /// The `TZID` to write alongside the local value, `None` for UTC.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.zone {
            ZoneRef::Utc => None,
            ZoneRef::Zone(zone) => Some(zone.id()),
            ZoneRef::Unresolved(tzid) => Some(tzid),
        }
    }

    /// Converts to UTC; `None` when the zone is unresolved.
    #[must_use]
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match &self.zone {
            ZoneRef::Utc => Some(self.local.and_utc()),
            ZoneRef::Zone(zone) => Some(zone.to_utc(self.local)),
            ZoneRef::Unresolved(_) => None,
        }
    }

    /// Returns a copy shifted by `delta` in wall-clock time, same zone, or
    /// `None` when the result is out of range.
    #[must_use]
    pub fn shifted(&self, delta: chrono::TimeDelta) -> Option<Self> {
        Some(Self {
            local: self.local.checked_add_signed(delta)?,
            zone: self.zone.clone(),
        })
    }
}
