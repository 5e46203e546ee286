use std::fmt;

use almanac_rfc::rfc::ical::core::UtcOffset;
use almanac_rfc::rfc::ical::timezone::TimeZoneRules;
use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone as _, Utc};
use chrono_tz::Tz;

use super::rules;

/// A resolved IANA time zone.
#[derive(Clone, Copy)]
pub struct TimeZone {
    tz: Tz,
}

impl TimeZone {
    #[must_use]
    pub const fn from_tz(tz: Tz) -> Self {
        Self { tz }
    }

    /// Canonical IANA identifier, written as `TZID`.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.tz.name()
    }

    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    /// Offset in effect at `instant`.
    #[must_use]
    pub fn utc_offset(&self, instant: DateTime<Utc>) -> UtcOffset {
        let offset = self.tz.offset_from_utc_datetime(&instant.naive_utc());
        UtcOffset::from_seconds(offset.fix().local_minus_utc())
    }

    /// Converts a wall-clock time in this zone to UTC.
    ///
    /// An ambiguous time (the repeated hour when clocks go back) takes the
    /// earlier instant. A time inside a gap is read with the offset in force
    /// before the gap.
    #[must_use]
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
            LocalResult::None => {
                let offset = self.tz.offset_from_utc_datetime(&local).fix();
                (local - offset).and_utc()
            }
        }
    }

    /// Daylight-saving rules covering local times `min..=max`.
    #[must_use]
    pub fn rules(&self, min: NaiveDateTime, max: NaiveDateTime) -> TimeZoneRules {
        rules::derive(self.tz, min, max)
    }
}

impl PartialEq for TimeZone {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for TimeZone {}

impl std::hash::Hash for TimeZone {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimeZone").field(&self.id()).finish()
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl From<Tz> for TimeZone {
    fn from(tz: Tz) -> Self {
        Self::from_tz(tz)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeDelta};

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn offsets_follow_daylight_saving() {
        let new_york = TimeZone::from_tz(chrono_tz::America::New_York);
        assert_eq!(new_york.utc_offset(at(2026, 1, 15, 12, 0).and_utc()).to_string(), "-0500");
        assert_eq!(new_york.utc_offset(at(2026, 7, 15, 12, 0).and_utc()).to_string(), "-0400");
    }

    #[test]
    fn local_to_utc() {
        let new_york = TimeZone::from_tz(chrono_tz::America::New_York);
        assert_eq!(new_york.to_utc(at(2026, 1, 15, 10, 0)), at(2026, 1, 15, 15, 0).and_utc());

        // 01:30 happens twice on 2026-11-01; the first is still EDT.
        assert_eq!(new_york.to_utc(at(2026, 11, 1, 1, 30)), at(2026, 11, 1, 5, 30).and_utc());

        // 02:30 never happens on 2026-03-08; read with EST.
        assert_eq!(
            new_york.to_utc(at(2026, 3, 8, 2, 30)),
            (at(2026, 3, 8, 2, 30) + TimeDelta::hours(5)).and_utc()
        );
    }

    #[test]
    fn equality_is_by_identifier() {
        let a = TimeZone::from_tz(chrono_tz::Europe::Berlin);
        let b = TimeZone::from(chrono_tz::Europe::Berlin);
        assert_eq!(a, b);
        assert_ne!(a, TimeZone::from_tz(chrono_tz::Europe::Paris));
        assert_eq!(format!("{a:?}"), "TimeZone(\"Europe/Berlin\")");
    }
}
