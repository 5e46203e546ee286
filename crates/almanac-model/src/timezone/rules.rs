//! Derives daylight-saving adjustment rules from the tz database.
//!
//! chrono-tz only exposes offsets at instants, so each year in the window is
//! scanned for its offset changes. A year with exactly one change into
//! daylight time and one back is described by its two transitions; runs of
//! consecutive years that share a pattern collapse into one rule.
//!
//! Scanning starts one year before the window so the first rule has an
//! onset at or before the window start.

use almanac_rfc::rfc::ical::core::UtcOffset;
use almanac_rfc::rfc::ical::timezone::{AdjustmentRule, TimeZoneRules, TransitionTime, days_in_month};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone as _};
use chrono_tz::{OffsetComponents, OffsetName, Tz, TzOffset};

#[tracing::instrument(skip(tz), fields(tzid = tz.name()))]
pub(crate) fn derive(tz: Tz, min: NaiveDateTime, max: NaiveDateTime) -> TimeZoneRules {
    let (first_year, last_year) = (min.year() - 1, max.year().max(min.year()));

    let mut runs: Vec<Run> = Vec::new();
    for year in first_year..=last_year {
        let Some(observed) = observe_year(tz, year) else {
            continue;
        };
        let extended = runs.last_mut().is_some_and(|run| run.try_extend(&observed));
        if !extended {
            runs.push(Run::from(observed));
        }
    }

    let at_min = tz.offset_from_utc_datetime(&min);
    let standard_name = if is_daylight(&at_min) {
        runs.first().and_then(|run| run.standard_name.clone())
    } else {
        at_min.abbreviation().map(str::to_string)
    };

    let mut adjustment_rules = Vec::with_capacity(runs.len());
    let mut runs = runs.into_iter().peekable();
    while let Some(run) = runs.next() {
        let year_end = NaiveDate::from_ymd_opt(run.last_year, 12, 31);
        // A superseded rule stays in force until its successor's first change.
        let end = match runs.peek() {
            Some(next) if next.first_year == run.last_year + 1 => next.first_change.pred_opt().or(year_end),
            _ if run.last_year >= last_year => None,
            _ => year_end,
        };
        adjustment_rules.extend(run.into_rule(end));
    }

    tracing::debug!(rules = adjustment_rules.len(), "Derived adjustment rules");

    TimeZoneRules {
        id: tz.name().to_string(),
        base_offset: UtcOffset::from_delta(at_min.base_utc_offset()),
        standard_name,
        adjustment_rules,
    }
}

fn is_daylight(offset: &TzOffset) -> bool {
    !offset.dst_offset().is_zero()
}

fn same_state(a: &TzOffset, b: &TzOffset) -> bool {
    a.fix() == b.fix() && a.dst_offset() == b.dst_offset()
}

/// One offset change.
struct Transition {
    /// Wall-clock time just before the change.
    local: NaiveDateTime,
    before: TzOffset,
    after: TzOffset,
}

/// Finds every offset change between January 1 of `year` and of the next
/// year (UTC), sampling daily and bisecting to the second.
fn transitions_in(tz: Tz, year: i32) -> Vec<Transition> {
    let (Some(start), Some(end)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year + 1, 1, 1),
    ) else {
        return Vec::new();
    };
    let end = end.and_time(NaiveTime::MIN);

    let mut found = Vec::new();
    let mut lo = start.and_time(NaiveTime::MIN);
    let mut before = tz.offset_from_utc_datetime(&lo);
    while lo < end {
        let hi = (lo + TimeDelta::days(1)).min(end);
        let sampled = tz.offset_from_utc_datetime(&hi);
        if !same_state(&before, &sampled) {
            let at = bisect(tz, lo, hi, &before);
            found.push(Transition {
                local: at + before.fix(),
                before,
                after: tz.offset_from_utc_datetime(&at),
            });
        }
        before = sampled;
        lo = hi;
    }
    found
}

/// First instant in `(lo, hi]` whose state differs from `old`.
fn bisect(tz: Tz, mut lo: NaiveDateTime, mut hi: NaiveDateTime, old: &TzOffset) -> NaiveDateTime {
    while hi - lo > TimeDelta::seconds(1) {
        let mid = lo + TimeDelta::seconds((hi - lo).num_seconds() / 2);
        if same_state(&tz.offset_from_utc_datetime(&mid), old) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}

/// Patterns that describe a transition's onset, most specific first.
///
/// A day in the last week of its month is both "last weekday" and possibly
/// "fourth weekday"; every reading is kept until later years rule it out.
fn candidates(local: NaiveDateTime) -> Vec<TransitionTime> {
    let (month, day, weekday, time) = (local.month(), local.day(), local.weekday(), local.time());
    let month_len = days_in_month(local.year(), month).unwrap_or(31);
    let week = (day - 1) / 7 + 1;

    let mut patterns = Vec::with_capacity(3);
    if day + 7 > month_len {
        patterns.push(TransitionTime::Floating {
            month,
            week: 5,
            weekday,
            time,
        });
    }
    if week < 5 {
        patterns.push(TransitionTime::Floating {
            month,
            week,
            weekday,
            time,
        });
    }
    patterns.push(TransitionTime::Fixed { month, day, time });
    patterns
}

/// Daylight saving as observed in a single year.
struct ObservedYear {
    year: i32,
    /// Local date of the year's earlier transition.
    first_change: NaiveDate,
    base: UtcOffset,
    delta: TimeDelta,
    start: Vec<TransitionTime>,
    end: Vec<TransitionTime>,
    standard_name: Option<String>,
    daylight_name: Option<String>,
}

fn observe_year(tz: Tz, year: i32) -> Option<ObservedYear> {
    let transitions = transitions_in(tz, year);
    let [first, second] = transitions.as_slice() else {
        if !transitions.is_empty() {
            tracing::trace!(year, count = transitions.len(), "Irregular year, no rule");
        }
        return None;
    };

    let (into, out) = match (is_daylight(&first.after), is_daylight(&second.after)) {
        (true, false) => (first, second),
        (false, true) => (second, first),
        _ => {
            tracing::trace!(year, "Transitions do not pair into and out of daylight time");
            return None;
        }
    };
    if is_daylight(&into.before) || into.before.fix() != out.after.fix() {
        tracing::trace!(year, "Standard offset changed during the year, no rule");
        return None;
    }

    Some(ObservedYear {
        year,
        first_change: first.local.date(),
        base: UtcOffset::from_seconds(out.after.fix().local_minus_utc()),
        delta: into.after.dst_offset(),
        start: candidates(into.local),
        end: candidates(out.local),
        standard_name: out.after.abbreviation().map(str::to_string),
        daylight_name: into.after.abbreviation().map(str::to_string),
    })
}

/// Consecutive years sharing one pattern.
struct Run {
    first_year: i32,
    first_change: NaiveDate,
    last_year: i32,
    base: UtcOffset,
    delta: TimeDelta,
    start: Vec<TransitionTime>,
    end: Vec<TransitionTime>,
    standard_name: Option<String>,
    daylight_name: Option<String>,
}

impl From<ObservedYear> for Run {
    fn from(year: ObservedYear) -> Self {
        Self {
            first_year: year.year,
            first_change: year.first_change,
            last_year: year.year,
            base: year.base,
            delta: year.delta,
            start: year.start,
            end: year.end,
            standard_name: year.standard_name,
            daylight_name: year.daylight_name,
        }
    }
}

impl Run {
    fn try_extend(&mut self, next: &ObservedYear) -> bool {
        if next.year != self.last_year + 1
            || next.base != self.base
            || next.delta != self.delta
            || next.standard_name != self.standard_name
            || next.daylight_name != self.daylight_name
        {
            return false;
        }

        let shared = |ours: &[TransitionTime], theirs: &[TransitionTime]| -> Vec<TransitionTime> {
            ours.iter().filter(|p| theirs.contains(p)).copied().collect()
        };
        let start = shared(&self.start, &next.start);
        let end = shared(&self.end, &next.end);
        if start.is_empty() || end.is_empty() {
            return false;
        }

        self.start = start;
        self.end = end;
        self.last_year = next.year;
        true
    }

    fn into_rule(self, end: Option<NaiveDate>) -> Option<AdjustmentRule> {
        Some(AdjustmentRule {
            start: NaiveDate::from_ymd_opt(self.first_year, 1, 1)?,
            end,
            base_offset: self.base,
            daylight_delta: self.delta,
            daylight_start: *self.start.first()?,
            daylight_end: *self.end.first()?,
            standard_name: self.standard_name,
            daylight_name: self.daylight_name,
        })
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
