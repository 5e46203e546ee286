//! Tests for VTIMEZONE generation.

use chrono::{Datelike, TimeDelta, Weekday};

use super::*;
use crate::rfc::ical::build::write;
use crate::rfc::ical::parse::values::parse_local_date_time;

fn time(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn local(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_time(NaiveTime::MIN)
}

fn floating(month: u32, week: u32, h: u32) -> TransitionTime {
    TransitionTime::Floating {
        month,
        week,
        weekday: Weekday::Sun,
        time: time(h),
    }
}

/// America/New_York, 1987-2006 and 2007 onwards.
fn new_york() -> TimeZoneRules {
    let est = UtcOffset::from_seconds(-5 * 3600);
    let rule = |start, end, daylight_start, daylight_end| AdjustmentRule {
        start,
        end,
        base_offset: est,
        daylight_delta: TimeDelta::hours(1),
        daylight_start,
        daylight_end,
        standard_name: Some("EST".to_string()),
        daylight_name: Some("EDT".to_string()),
    };

    TimeZoneRules {
        id: "America/New_York".to_string(),
        base_offset: est,
        standard_name: Some("EST".to_string()),
        adjustment_rules: vec![
            rule(date(2007, 1, 1), None, floating(3, 2, 2), floating(11, 1, 2)),
            rule(
                date(1987, 1, 1),
                Some(date(2006, 12, 31)),
                floating(4, 1, 2),
                floating(10, 5, 2),
            ),
        ],
    }
}

fn observances<'a>(vtimezone: &'a Component, name: &str) -> Vec<&'a Component> {
    vtimezone.children_named(name).iter().collect()
}

#[test_log::test]
fn open_ended_rule() {
    let vtimezone = translate(&new_york(), local(2024, 1, 1), local(2024, 12, 31));

    assert_eq!(
        write(&vtimezone),
        concat!(
            "BEGIN:VTIMEZONE\r\n",
            "TZID:America/New_York\r\n",
            "BEGIN:STANDARD\r\n",
            "DTSTART:20071104T020000\r\n",
            "RRULE:FREQ=YEARLY;BYDAY=1SU;BYMONTH=11\r\n",
            "TZOFFSETFROM:-0400\r\n",
            "TZOFFSETTO:-0500\r\n",
            "TZNAME:EST\r\n",
            "END:STANDARD\r\n",
            "BEGIN:DAYLIGHT\r\n",
            "DTSTART:20070311T020000\r\n",
            "RRULE:FREQ=YEARLY;BYDAY=2SU;BYMONTH=3\r\n",
            "TZOFFSETFROM:-0500\r\n",
            "TZOFFSETTO:-0400\r\n",
            "TZNAME:EDT\r\n",
            "END:DAYLIGHT\r\n",
            "END:VTIMEZONE\r\n",
        )
    );
}

#[test]
fn bounded_rule_gets_until_in_utc() {
    let vtimezone = translate(&new_york(), local(2005, 6, 1), local(2008, 1, 1));

    let standard = observances(&vtimezone, "STANDARD");
    let daylight = observances(&vtimezone, "DAYLIGHT");
    assert_eq!(standard.len(), 2);
    assert_eq!(daylight.len(), 2);

    // Ordered by rule start even though the rules were listed newest first.
    assert_eq!(standard[0].property_value("DTSTART"), Some("19871025T020000"));
    assert_eq!(
        standard[0].property_value("RRULE"),
        Some("FREQ=YEARLY;BYDAY=-1SU;BYMONTH=10;UNTIL=20061029T060000Z")
    );
    assert_eq!(daylight[0].property_value("DTSTART"), Some("19870405T020000"));
    assert_eq!(
        daylight[0].property_value("RRULE"),
        Some("FREQ=YEARLY;BYDAY=1SU;BYMONTH=4;UNTIL=20060402T070000Z")
    );
    assert_eq!(standard[1].property_value("DTSTART"), Some("20071104T020000"));
}

#[test]
fn rules_outside_window_are_skipped() {
    let vtimezone = translate(&new_york(), local(1990, 1, 1), local(1995, 1, 1));
    assert_eq!(observances(&vtimezone, "STANDARD").len(), 1);
    assert_eq!(
        observances(&vtimezone, "STANDARD")[0].property_value("DTSTART"),
        Some("19871025T020000")
    );
}

#[test]
fn single_occurrence_has_no_rrule() {
    let mut rules = new_york();
    rules.adjustment_rules = vec![AdjustmentRule {
        start: date(2010, 1, 1),
        end: Some(date(2010, 12, 31)),
        ..new_york().adjustment_rules[0].clone()
    }];

    let vtimezone = translate(&rules, local(2010, 5, 1), local(2010, 5, 2));
    for name in ["STANDARD", "DAYLIGHT"] {
        let observance = observances(&vtimezone, name)[0];
        assert!(observance.property("RRULE").is_none(), "{name}");
    }
    assert_eq!(
        observances(&vtimezone, "DAYLIGHT")[0].property_value("DTSTART"),
        Some("20100314T020000")
    );
}

#[test]
fn onset_after_rule_end_is_omitted() {
    let mut rules = new_york();
    rules.adjustment_rules = vec![AdjustmentRule {
        start: date(2010, 1, 1),
        end: Some(date(2010, 2, 1)),
        ..new_york().adjustment_rules[0].clone()
    }];

    let vtimezone = translate(&rules, local(2010, 1, 10), local(2010, 1, 20));

    // Neither transition happens in January, so only the base offset remains.
    assert!(vtimezone.children_named("DAYLIGHT").is_empty());
    let standard = observances(&vtimezone, "STANDARD");
    assert_eq!(standard.len(), 1);
    assert_eq!(standard[0].property_value("DTSTART"), Some("19700101T000000"));
    assert_eq!(standard[0].property_value("TZOFFSETFROM"), Some("-0500"));
    assert_eq!(standard[0].property_value("TZOFFSETTO"), Some("-0500"));
}

#[test]
fn fixed_offset_zone() {
    let rules = TimeZoneRules::fixed("Asia/Kolkata", UtcOffset::from_seconds(19800));
    assert!(!rules.supports_daylight_saving_time());

    let vtimezone = translate(&rules, local(2024, 1, 1), local(2024, 1, 2));
    assert_eq!(
        write(&vtimezone),
        concat!(
            "BEGIN:VTIMEZONE\r\n",
            "TZID:Asia/Kolkata\r\n",
            "BEGIN:STANDARD\r\n",
            "DTSTART:19700101T000000\r\n",
            "TZOFFSETFROM:+0530\r\n",
            "TZOFFSETTO:+0530\r\n",
            "END:STANDARD\r\n",
            "END:VTIMEZONE\r\n",
        )
    );
}

#[test]
fn southern_hemisphere() {
    let aest = UtcOffset::from_seconds(10 * 3600);
    let rules = TimeZoneRules {
        id: "Australia/Sydney".to_string(),
        base_offset: aest,
        standard_name: Some("AEST".to_string()),
        adjustment_rules: vec![AdjustmentRule {
            start: date(2008, 1, 1),
            end: None,
            base_offset: aest,
            daylight_delta: TimeDelta::hours(1),
            daylight_start: floating(10, 1, 2),
            daylight_end: floating(4, 1, 3),
            standard_name: Some("AEST".to_string()),
            daylight_name: Some("AEDT".to_string()),
        }],
    };

    let vtimezone = translate(&rules, local(2025, 1, 1), local(2025, 2, 1));
    let standard = observances(&vtimezone, "STANDARD")[0];
    assert_eq!(standard.property_value("DTSTART"), Some("20080406T030000"));
    assert_eq!(standard.property_value("TZOFFSETFROM"), Some("+1100"));
    assert_eq!(standard.property_value("TZOFFSETTO"), Some("+1000"));
    let daylight = observances(&vtimezone, "DAYLIGHT")[0];
    assert_eq!(daylight.property_value("DTSTART"), Some("20081005T020000"));
    assert_eq!(daylight.property_value("RRULE"), Some("FREQ=YEARLY;BYDAY=1SU;BYMONTH=10"));
}

#[test]
fn fixed_date_rule_uses_bymonthday() {
    let irst = UtcOffset::from_seconds(12600);
    let rules = TimeZoneRules {
        id: "Asia/Tehran".to_string(),
        base_offset: irst,
        standard_name: None,
        adjustment_rules: vec![AdjustmentRule {
            start: date(2017, 1, 1),
            end: Some(date(2022, 12, 31)),
            base_offset: irst,
            daylight_delta: TimeDelta::hours(1),
            daylight_start: TransitionTime::Fixed {
                month: 3,
                day: 22,
                time: time(0),
            },
            daylight_end: TransitionTime::Fixed {
                month: 9,
                day: 22,
                time: time(0),
            },
            standard_name: None,
            daylight_name: None,
        }],
    };

    let vtimezone = translate(&rules, local(2020, 1, 1), local(2020, 12, 31));
    let daylight = observances(&vtimezone, "DAYLIGHT")[0];
    assert_eq!(
        daylight.property_value("RRULE"),
        Some("FREQ=YEARLY;BYMONTHDAY=22;BYMONTH=3;UNTIL=20220321T203000Z")
    );
    assert!(daylight.property("TZNAME").is_none());
}

/// Every generated RRULE must be accepted by an independent RFC 5545
/// implementation and produce the same onsets as the transition pattern.
#[test]
fn generated_rules_agree_with_rrule_crate() {
    let rules = new_york();
    let vtimezone = translate(&rules, local(1990, 1, 1), local(2030, 1, 1));

    for observance in vtimezone.children.values() {
        let Some(text) = observance.property_value("RRULE") else {
            continue;
        };
        let dtstart = parse_local_date_time(observance.property_value("DTSTART").unwrap()).unwrap();
        let rule: rrule::RRule<rrule::Unvalidated> = text.parse().unwrap();
        let set = rule.build(dtstart.and_utc().with_timezone(&rrule::Tz::UTC)).unwrap();
        let occurrences = set.all(25).dates;
        assert!(!occurrences.is_empty(), "{text}");

        let pattern = rules
            .adjustment_rules
            .iter()
            .flat_map(|r| [r.daylight_start, r.daylight_end])
            .find(|p| p.recurrence_rule().to_string() == text.split(";UNTIL").next().unwrap())
            .unwrap();

        for occurrence in &occurrences {
            let naive = occurrence.naive_utc();
            assert_eq!(pattern.onset_in(naive.year()), Some(naive), "{text}");
        }

        if text.contains("UNTIL") {
            // 1987 through 2006 inclusive.
            assert_eq!(occurrences.len(), 20, "{text}");
        }
    }
}
