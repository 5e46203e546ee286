//! Tests for adjustment-rule derivation.

use almanac_rfc::rfc::ical::build::write;
use almanac_rfc::rfc::ical::timezone::translate;
use chrono::Weekday;

use super::*;

fn local(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN)
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

fn sunday(month: u32, week: u32, h: u32) -> TransitionTime {
    TransitionTime::Floating {
        month,
        week,
        weekday: Weekday::Sun,
        time: hour(h),
    }
}

#[test_log::test]
fn united_states_since_2007() {
    let rules = derive(chrono_tz::America::New_York, local(2024, 1, 1), local(2024, 12, 31));

    assert_eq!(rules.id, "America/New_York");
    assert_eq!(rules.base_offset.to_string(), "-0500");
    assert_eq!(rules.standard_name.as_deref(), Some("EST"));
    assert_eq!(rules.adjustment_rules.len(), 1);

    let rule = &rules.adjustment_rules[0];
    assert_eq!(rule.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    assert_eq!(rule.end, None);
    assert_eq!(rule.daylight_delta, TimeDelta::hours(1));
    assert_eq!(rule.daylight_start, sunday(3, 2, 2));
    assert_eq!(rule.daylight_end, sunday(11, 1, 2));
    assert_eq!(rule.standard_name.as_deref(), Some("EST"));
    assert_eq!(rule.daylight_name.as_deref(), Some("EDT"));
}

#[test]
fn rule_change_splits_runs() {
    let rules = derive(chrono_tz::America::New_York, local(2005, 6, 1), local(2008, 6, 1));
    assert_eq!(rules.adjustment_rules.len(), 2);

    let old = &rules.adjustment_rules[0];
    assert_eq!(old.start, NaiveDate::from_ymd_opt(2004, 1, 1).unwrap());
    // In force until the day before the first transition under the new rule.
    assert_eq!(old.end, NaiveDate::from_ymd_opt(2007, 3, 10));
    assert_eq!(old.daylight_start, sunday(4, 1, 2));
    assert_eq!(old.daylight_end, sunday(10, 5, 2));

    let new = &rules.adjustment_rules[1];
    assert_eq!(new.start, NaiveDate::from_ymd_opt(2007, 1, 1).unwrap());
    assert_eq!(new.end, None);
    assert_eq!(new.daylight_start, sunday(3, 2, 2));
}

#[test]
fn last_weekday_is_preferred_when_ambiguous() {
    // October 25, 2026 is both the fourth and the last Sunday.
    let rules = derive(chrono_tz::Europe::Berlin, local(2026, 1, 1), local(2026, 12, 31));
    let rule = &rules.adjustment_rules[0];
    assert_eq!(rule.daylight_start, sunday(3, 5, 2));
    assert_eq!(rule.daylight_end, sunday(10, 5, 3));
}

#[test]
fn southern_hemisphere() {
    let rules = derive(chrono_tz::Australia::Sydney, local(2025, 1, 1), local(2025, 12, 31));
    assert_eq!(rules.base_offset.to_string(), "+1000");
    assert_eq!(rules.standard_name.as_deref(), Some("AEST"));

    let rule = &rules.adjustment_rules[0];
    assert_eq!(rule.daylight_start, sunday(10, 1, 2));
    assert_eq!(rule.daylight_end, sunday(4, 1, 3));
    assert_eq!(rule.daylight_offset().to_string(), "+1100");
}

#[test]
fn zone_without_daylight_saving() {
    let rules = derive(chrono_tz::Asia::Kolkata, local(2024, 1, 1), local(2026, 1, 1));
    assert!(!rules.supports_daylight_saving_time());
    assert_eq!(rules.base_offset.to_string(), "+0530");
    assert_eq!(rules.standard_name.as_deref(), Some("IST"));
}

#[test]
fn derived_rules_translate_to_vtimezone() {
    let rules = derive(chrono_tz::Europe::Berlin, local(2026, 3, 1), local(2026, 11, 1));

    assert_eq!(
        write(&translate(&rules, local(2026, 3, 1), local(2026, 11, 1))),
        concat!(
            "BEGIN:VTIMEZONE\r\n",
            "TZID:Europe/Berlin\r\n",
            "BEGIN:STANDARD\r\n",
            "DTSTART:20251026T030000\r\n",
            "RRULE:FREQ=YEARLY;BYDAY=-1SU;BYMONTH=10\r\n",
            "TZOFFSETFROM:+0200\r\n",
            "TZOFFSETTO:+0100\r\n",
            "TZNAME:CET\r\n",
            "END:STANDARD\r\n",
            "BEGIN:DAYLIGHT\r\n",
            "DTSTART:20250330T020000\r\n",
            "RRULE:FREQ=YEARLY;BYDAY=-1SU;BYMONTH=3\r\n",
            "TZOFFSETFROM:+0100\r\n",
            "TZOFFSETTO:+0200\r\n",
            "TZNAME:CEST\r\n",
            "END:DAYLIGHT\r\n",
            "END:VTIMEZONE\r\n",
        )
    );
}

#[test]
fn transitions_are_found_to_the_second() {
    let found = transitions_in(chrono_tz::Europe::Berlin, 2026);
    assert_eq!(found.len(), 2);
    // 01:00 UTC, read as CET wall-clock time.
    assert_eq!(found[0].local, local(2026, 3, 29) + TimeDelta::hours(2));
    assert_eq!(found[1].local, local(2026, 10, 25) + TimeDelta::hours(3));
}

/// The latest STANDARD or DAYLIGHT onset at or before `at`, with its name.
fn observance_at(vtimezone: &almanac_rfc::rfc::ical::core::Component, at: NaiveDateTime) -> Option<(String, String)> {
    vtimezone
        .children
        .values()
        .filter_map(|observance| {
            let onset = NaiveDateTime::parse_from_str(observance.property_value("DTSTART")?, "%Y%m%dT%H%M%S").ok()?;
            (onset <= at).then(|| {
                let to = observance.property_value("TZOFFSETTO").unwrap_or_default().to_string();
                (onset, observance.name.clone(), to)
            })
        })
        .max_by_key(|(onset, _, _)| *onset)
        .map(|(_, name, to)| (name, to))
}

#[test_log::test]
fn window_before_first_change_of_year_is_covered() {
    let at = local(2026, 2, 3) + TimeDelta::hours(10);
    let rules = derive(chrono_tz::Europe::Berlin, at, at);
    let vtimezone = translate(&rules, at, at);

    assert_eq!(
        observance_at(&vtimezone, at),
        Some(("STANDARD".to_string(), "+0100".to_string()))
    );
}

#[test]
fn window_just_after_rule_change_is_covered() {
    // February 2007 falls under the old US rule's last standard period.
    let (min, max) = (local(2007, 2, 1), local(2007, 2, 28));
    let rules = derive(chrono_tz::America::New_York, min, max);
    let vtimezone = translate(&rules, min, max);

    assert_eq!(
        observance_at(&vtimezone, min),
        Some(("STANDARD".to_string(), "-0500".to_string()))
    );
    let daylight: Vec<_> = vtimezone.children_named("DAYLIGHT").iter().map(|d| d.property_value("DTSTART")).collect();
    assert!(daylight.contains(&Some("20070311T020000")), "{daylight:?}");
}
