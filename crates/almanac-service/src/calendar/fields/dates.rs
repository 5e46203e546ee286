//! DATE-TIME fields.
//!
//! UTC values are written `yyyyMMddTHHmmssZ`. Zoned values are written as
//! local time with a `TZID` parameter. All-day values are written as
//! `VALUE=DATE`. On input, a value with neither `Z` nor `TZID` is read as UTC.

use almanac_model::model::{Event, ZoneRef, ZonedDateTime};
use almanac_rfc::rfc::ical::core::datetime::{format_date, format_local, format_utc};
use almanac_rfc::rfc::ical::core::names::{parameter, property};
use almanac_rfc::rfc::ical::core::{Component, Parameter, Property};
use almanac_rfc::rfc::ical::parse::values::{parse_date, parse_duration, parse_local_date_time, parse_utc_date_time};
use chrono::{DateTime, TimeDelta, Utc};

use super::{EventField, single};
use crate::calendar::session::Session;
use crate::error::{CalendarError, CalendarResult};

const VALUE_DATE: &str = "DATE";

fn date_time_property(name: &str, value: &ZonedDateTime, all_day: bool) -> Property {
    if all_day {
        return Property::new(name, format_date(value.local().date()))
            .with_parameter(Parameter::new(parameter::VALUE, VALUE_DATE));
    }
    match value.zone() {
        ZoneRef::Utc => Property::new(name, format_utc(value.local().and_utc())),
        ZoneRef::Zone(zone) => Property::new(name, format_local(value.local()))
            .with_parameter(Parameter::new(parameter::TZID, zone.id()).quoted()),
        ZoneRef::Unresolved(tzid) => Property::new(name, format_local(value.local()))
            .with_parameter(Parameter::new(parameter::TZID, tzid.as_str()).quoted()),
    }
}

fn utc_property(name: &str, instant: DateTime<Utc>) -> Property {
    Property::new(name, format_utc(instant))
}

/// A parsed DATE or DATE-TIME value; `bool` is true for a DATE.
fn parse_date_time(property: &Property, session: &Session) -> CalendarResult<(ZonedDateTime, bool)> {
    let name = property.name.as_str();
    let value = property.value.trim();

    let is_date = property
        .parameter_value(parameter::VALUE)
        .is_some_and(|v| v.eq_ignore_ascii_case(VALUE_DATE));
    if is_date {
        let date = parse_date(value).map_err(|e| CalendarError::invalid(name, e))?;
        return Ok((ZonedDateTime::date(date), true));
    }

    if value.ends_with(['Z', 'z']) {
        let instant = parse_utc_date_time(value).map_err(|e| CalendarError::invalid(name, e))?;
        return Ok((ZonedDateTime::utc(instant), false));
    }

    let local = parse_local_date_time(value).map_err(|e| CalendarError::invalid(name, e))?;
    let zoned = match property.parameter_value(parameter::TZID) {
        None => ZonedDateTime::utc(local.and_utc()),
        Some(tzid) => match session.zone(tzid) {
            Some(zone) => ZonedDateTime::new(local, zone),
            None => {
                tracing::debug!(property = name, tzid, "TZID not resolved, keeping local time");
                ZonedDateTime::unresolved(local, tzid)
            }
        },
    };
    Ok((zoned, false))
}

fn parse_utc(property: &Property) -> CalendarResult<DateTime<Utc>> {
    parse_utc_date_time(property.value.trim()).map_err(|e| CalendarError::invalid(&property.name, e))
}

/// `DTSTAMP`, required on input.
///
/// Written from the last modification time, or the creation time for an
/// unmodified event. On input it stands in for `CREATED` when that is absent.
#[derive(Debug, Clone, Copy)]
pub struct DateTimeStamp;

impl EventField for DateTimeStamp {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        let stamp = event.updated_at.unwrap_or(event.created_at);
        component.add_property(utc_property(property::DTSTAMP, stamp));
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        let stamp = single(component, property::DTSTAMP)?.ok_or_else(|| CalendarError::missing(property::DTSTAMP))?;
        event.created_at = parse_utc(stamp)?;
        Ok(())
    }
}

/// `CREATED`.
#[derive(Debug, Clone, Copy)]
pub struct Created;

impl EventField for Created {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        component.add_property(utc_property(property::CREATED, event.created_at));
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        if let Some(created) = single(component, property::CREATED)? {
            event.created_at = parse_utc(created)?;
        }
        Ok(())
    }
}

/// `LAST-MODIFIED`.
#[derive(Debug, Clone, Copy)]
pub struct LastModified;

impl EventField for LastModified {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        if let Some(updated_at) = event.updated_at {
            component.add_property(utc_property(property::LAST_MODIFIED, updated_at));
        }
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        if let Some(modified) = single(component, property::LAST_MODIFIED)? {
            event.updated_at = Some(parse_utc(modified)?);
        }
        Ok(())
    }
}

/// `DTSTART`, required.
#[derive(Debug, Clone, Copy)]
pub struct Start;

impl EventField for Start {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        let start = event.start.as_ref().ok_or_else(|| CalendarError::missing(property::DTSTART))?;
        component.add_property(date_time_property(property::DTSTART, start, event.all_day));
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, session: &Session) -> CalendarResult<()> {
        let start = single(component, property::DTSTART)?.ok_or_else(|| CalendarError::missing(property::DTSTART))?;
        let (start, is_date) = parse_date_time(start, session)?;
        event.start = Some(start);
        event.all_day = is_date;
        Ok(())
    }
}

/// `DTEND` on output; `DTEND` or `DURATION` on input.
///
/// An event with neither ends where it starts, or one day later for an
/// all-day event (RFC 5545 §3.6.1).
#[derive(Debug, Clone, Copy)]
pub struct End;

impl EventField for End {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        let end = event.end.as_ref().ok_or_else(|| CalendarError::missing(property::DTEND))?;
        component.add_property(date_time_property(property::DTEND, end, event.all_day));
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, session: &Session) -> CalendarResult<()> {
        let end = single(component, property::DTEND)?;
        let duration = single(component, property::DURATION)?;

        event.end = match (end, duration) {
            (Some(_), Some(_)) => {
                return Err(CalendarError::Validation(format!(
                    "{} and {} are mutually exclusive",
                    property::DTEND,
                    property::DURATION
                )));
            }
            (Some(end), None) => Some(parse_date_time(end, session)?.0),
            (None, Some(duration)) => {
                let delta =
                    parse_duration(duration.value.trim()).map_err(|e| CalendarError::invalid(property::DURATION, e))?;
                shift_start(event, delta, property::DURATION)?
            }
            (None, None) => {
                let delta = if event.all_day { TimeDelta::days(1) } else { TimeDelta::zero() };
                shift_start(event, delta, property::DTSTART)?
            }
        };
        Ok(())
    }
}

/// The event's start moved by `delta`; `None` when the start is unset.
fn shift_start(event: &Event, delta: TimeDelta, property: &str) -> CalendarResult<Option<ZonedDateTime>> {
    event
        .start
        .as_ref()
        .map(|start| {
            start
                .shifted(delta)
                .ok_or_else(|| CalendarError::invalid(property, "end lies outside the supported date range"))
        })
        .transpose()
}
