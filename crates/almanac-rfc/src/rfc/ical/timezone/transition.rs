//! Daylight-saving adjustment rules and their yearly transition patterns.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};

use crate::rfc::ical::core::{RecurrenceRule, UtcOffset, WeekdayNum};

/// When in the year a transition happens, in local wall-clock time before
/// the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionTime {
    /// The same calendar date every year.
    Fixed { month: u32, day: u32, time: NaiveTime },
    /// The `week`-th `weekday` of `month`; week 5 means the last one.
    Floating {
        month: u32,
        week: u32,
        weekday: Weekday,
        time: NaiveTime,
    },
}

impl TransitionTime {
    #[must_use]
    pub const fn month(&self) -> u32 {
        match self {
            Self::Fixed { month, .. } | Self::Floating { month, .. } => *month,
        }
    }

    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        match self {
            Self::Fixed { time, .. } | Self::Floating { time, .. } => *time,
        }
    }

    /// Returns the onset of this pattern in `year`.
    ///
    /// A fixed day past the end of the month (e.g. February 29 in a common
    /// year) is clamped to the month's last day. Returns `None` only for an
    /// invalid month or week.
    #[must_use]
    pub fn onset_in(&self, year: i32) -> Option<NaiveDateTime> {
        let month_len = days_in_month(year, self.month())?;
        let day = match *self {
            Self::Fixed { day, .. } => {
                if day == 0 {
                    return None;
                }
                day.min(month_len)
            }
            Self::Floating { week, weekday, .. } => {
                if !(1..=5).contains(&week) {
                    return None;
                }
                let first = NaiveDate::from_ymd_opt(year, self.month(), 1)?;
                let lead = (7 + weekday.num_days_from_sunday() - first.weekday().num_days_from_sunday()) % 7;
                let day = 1 + lead + (week - 1) * 7;
                if day > month_len { day - 7 } else { day }
            }
        };
        NaiveDate::from_ymd_opt(year, self.month(), day).map(|date| date.and_time(self.time()))
    }

    /// First onset at or after `at`, looking at `at`'s year and the next.
    #[must_use]
    pub fn first_onset_on_or_after(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        [at.year(), at.year() + 1]
            .into_iter()
            .filter_map(|year| self.onset_in(year))
            .find(|onset| *onset >= at)
    }

    /// Last onset at or before `at`, looking at `at`'s year and the previous.
    #[must_use]
    pub fn last_onset_on_or_before(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        [at.year(), at.year() - 1]
            .into_iter()
            .filter_map(|year| self.onset_in(year))
            .find(|onset| *onset <= at)
    }

    /// Yearly recurrence rule reproducing this pattern.
    ///
    /// Floating patterns use `BYDAY=<n><weekday>` with week 5 written as `-1`.
    /// Fixed patterns use `BYMONTHDAY`.
    #[must_use]
    pub fn recurrence_rule(&self) -> RecurrenceRule {
        let month = u8::try_from(self.month()).unwrap_or(u8::MAX);
        match *self {
            Self::Fixed { day, .. } => RecurrenceRule::yearly_on_date(month, u8::try_from(day).unwrap_or(u8::MAX)),
            Self::Floating { week, weekday, .. } => {
                let ordinal = if week >= 5 { -1 } else { i8::try_from(week).unwrap_or(-1) };
                RecurrenceRule::yearly_on_weekday(month, WeekdayNum::nth(ordinal, weekday))
            }
        }
    }
}

/// Number of days in `month` of `year`.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// A period during which a zone follows one daylight-saving pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentRule {
    /// First day the rule applies.
    pub start: NaiveDate,
    /// Last day the rule applies; `None` while it is still in force.
    pub end: Option<NaiveDate>,
    /// Standard-time offset while the rule applies.
    pub base_offset: UtcOffset,
    /// Added to `base_offset` during daylight time.
    pub daylight_delta: TimeDelta,
    /// Transition into daylight time.
    pub daylight_start: TransitionTime,
    /// Transition back to standard time.
    pub daylight_end: TransitionTime,
    pub standard_name: Option<String>,
    pub daylight_name: Option<String>,
}

impl AdjustmentRule {
    #[must_use]
    pub fn daylight_offset(&self) -> UtcOffset {
        self.base_offset.shifted(self.daylight_delta)
    }

    /// Whether the rule's active range overlaps the inclusive date window.
    #[must_use]
    pub fn intersects(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start <= to && self.end.is_none_or(|end| end >= from)
    }
}
