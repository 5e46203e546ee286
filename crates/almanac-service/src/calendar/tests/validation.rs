//! Documents and calendars the mapper must reject.

use almanac_model::model::Calendar;
use almanac_rfc::rfc::ical::core::Component;

use super::fixtures::*;
use crate::calendar::CalendarSerializer;
use crate::error::CalendarError;

fn document(header: &[&str], event: &[&str]) -> String {
    let mut lines = vec!["BEGIN:VCALENDAR"];
    lines.extend_from_slice(header);
    lines.push("BEGIN:VEVENT");
    lines.extend_from_slice(event);
    lines.extend(["END:VEVENT", "END:VCALENDAR", ""]);
    lines.join("\r\n")
}

const EVENT: &[&str] = &[
    "UID:event@example.com",
    "DTSTAMP:20260105T120000Z",
    "DTSTART:20260106T093000Z",
];

fn read(text: &str) -> Result<Vec<Calendar>, CalendarError> {
    CalendarSerializer::new().deserialize_str(text)
}

#[test]
fn accepts_supported_versions() {
    for version in ["VERSION:2.0", "VERSION:1.0;2.0", "VERSION:2.0;2.1"] {
        let text = document(&[version, "PRODID:-//Test//EN"], EVENT);
        assert!(read(&text).is_ok(), "{version}");
    }
}

#[test_log::test]
fn other_versions_are_unsupported() {
    for version in ["VERSION:1.0", "VERSION:3.0", "VERSION:2.1;3.0"] {
        let text = document(&[version, "PRODID:-//Test//EN"], EVENT);
        let err = read(&text).unwrap_err();
        assert!(err.is_unsupported(), "{version}: {err}");
    }
}

#[test]
fn header_properties_must_appear_once() {
    let cases: [&[&str]; 4] = [
        &["PRODID:-//Test//EN"],
        &["VERSION:2.0"],
        &["VERSION:2.0", "VERSION:2.0", "PRODID:-//Test//EN"],
        &["VERSION:2.0", "PRODID:-//A//EN", "PRODID:-//B//EN"],
    ];
    for header in cases {
        let err = read(&document(header, EVENT)).unwrap_err();
        assert!(matches!(err, CalendarError::Validation(_)), "{header:?}: {err}");
    }
}

#[test]
fn malformed_version_is_invalid() {
    let err = read(&document(&["VERSION:two", "PRODID:-//Test//EN"], EVENT)).unwrap_err();
    assert!(matches!(err, CalendarError::Validation(_)), "{err}");
}

#[test]
fn non_gregorian_scale_is_unsupported() {
    let header = ["VERSION:2.0", "PRODID:-//Test//EN", "CALSCALE:HEBREW"];
    assert!(read(&document(&header, EVENT)).unwrap_err().is_unsupported());

    let header = ["VERSION:2.0", "PRODID:-//Test//EN", "CALSCALE:gregorian"];
    assert!(read(&document(&header, EVENT)).is_ok());
}

#[test]
fn root_must_be_a_calendar() {
    let err = CalendarSerializer::new()
        .deserialize(&Component::event())
        .unwrap_err();
    assert!(matches!(err, CalendarError::Validation(_)));
}

#[test]
fn required_event_properties() {
    for (missing, expected) in [(0, "UID is required"), (1, "DTSTAMP is required"), (2, "DTSTART is required")] {
        let event: Vec<&str> = EVENT
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != missing)
            .map(|(_, line)| *line)
            .collect();
        let err = read(&calendar_with_event(&event)).unwrap_err();
        assert!(matches!(&err, CalendarError::Validation(m) if m == expected), "{err}");
    }
}

#[test]
fn rejects_bad_values() {
    for line in [
        "PRIORITY:10",
        "PRIORITY:high",
        "DTEND:not-a-date",
        "DURATION:1H",
        "ATTENDEE:tel:+1-555-0100",
        "SUMMARY:twice",
    ] {
        let mut event = EVENT.to_vec();
        event.push(line);
        if line.starts_with("SUMMARY") {
            event.push("SUMMARY:again");
        }
        let err = read(&calendar_with_event(&event)).unwrap_err();
        assert!(matches!(err, CalendarError::Validation(_)), "{line}: {err}");
    }
}

#[test_log::test]
fn rejects_end_outside_date_range() {
    for line in ["DURATION:P15000000W", "DURATION:-P15000000W"] {
        let mut event = EVENT.to_vec();
        event.push(line);
        let err = read(&calendar_with_event(&event)).unwrap_err();
        assert!(matches!(err, CalendarError::Validation(_)), "{line}: {err}");
    }
}

#[test]
fn rejects_bad_position() {
    let mut event = EVENT.to_vec();
    event.push("GEO:91;0");
    assert!(matches!(
        read(&calendar_with_event(&event)),
        Err(CalendarError::Model(_))
    ));
}

#[test]
fn serialize_requires_identity_and_times() {
    let serializer = CalendarSerializer::new();

    let mut no_id = review();
    no_id.id = String::new();
    let mut no_start = review();
    no_start.start = None;
    let mut no_end = review();
    no_end.end = None;

    for (event, expected) in [
        (no_id, "UID is required"),
        (no_start, "DTSTART is required"),
        (no_end, "DTEND is required"),
    ] {
        let err = serializer
            .serialize(&Calendar::new().with_event(event))
            .unwrap_err();
        assert!(matches!(&err, CalendarError::Validation(m) if m == expected), "{err}");
    }
}
