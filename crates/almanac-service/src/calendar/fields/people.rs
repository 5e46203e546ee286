//! `ORGANIZER` and `ATTENDEE` (RFC 5545 §3.8.4.1, §3.8.4.3).

use almanac_model::model::{Attendee, AttendeeRole, AttendeeType, Event, LocalizedString, ParticipationStatus};
use almanac_rfc::rfc::ical::build::encode_caret;
use almanac_rfc::rfc::ical::core::names::{parameter, property};
use almanac_rfc::rfc::ical::core::{Component, Parameter, Property};
use almanac_rfc::rfc::ical::parse::values::{decode_caret, parse_boolean};

use super::{EventField, single};
use crate::calendar::session::Session;
use crate::error::{CalendarError, CalendarResult};

const MAILTO: &str = "mailto:";

/// Builds a calendar-user property; participation parameters only when
/// `participant` is set.
fn user_property(name: &str, user: &Attendee, participant: bool) -> Property {
    let mut property = Property::new(name, format!("{MAILTO}{}", user.address));

    if let Some(display) = &user.name {
        property.add_parameter(Parameter::new(parameter::CN, encode_caret(&display.text)).quoted());
        if let Some(language) = &display.language {
            property.add_parameter(Parameter::new(parameter::LANGUAGE, language.as_str()));
        }
    }
    if !participant {
        return property;
    }

    if let Some(kind) = &user.kind {
        property.add_parameter(Parameter::new(parameter::CUTYPE, kind.as_str()));
    }
    if let Some(role) = user.effective_role() {
        property.add_parameter(Parameter::new(parameter::ROLE, role.as_str()));
    }
    if let Some(status) = &user.status {
        property.add_parameter(Parameter::new(parameter::PARTSTAT, status.as_str()));
    }
    if let Some(rsvp) = user.rsvp {
        property.add_parameter(Parameter::new(parameter::RSVP, if rsvp { "TRUE" } else { "FALSE" }));
    }
    property
}

fn parse_user(property: &Property) -> CalendarResult<Attendee> {
    let value = property.value.trim();
    let address = value
        .split_at_checked(MAILTO.len())
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(MAILTO))
        .map(|(_, address)| address)
        .ok_or_else(|| CalendarError::invalid(&property.name, format!("expected a mailto: URI, found {value:?}")))?;

    let mut user = Attendee::new(address);
    if let Some(cn) = property.parameter_value(parameter::CN) {
        let mut name = LocalizedString::new(decode_caret(cn));
        name.language = property.parameter_value(parameter::LANGUAGE).map(str::to_string);
        user.name = Some(name);
    }
    user.kind = property.parameter_value(parameter::CUTYPE).map(AttendeeType::parse);
    user.role = property.parameter_value(parameter::ROLE).map(AttendeeRole::parse);
    user.status = property
        .parameter_value(parameter::PARTSTAT)
        .map(ParticipationStatus::parse);
    user.rsvp = property
        .parameter_value(parameter::RSVP)
        .map(|rsvp| {
            parse_boolean(rsvp).ok_or_else(|| CalendarError::invalid(parameter::RSVP, format!("not a boolean: {rsvp:?}")))
        })
        .transpose()?;
    Ok(user)
}

/// `ORGANIZER`: address and display name.
#[derive(Debug, Clone, Copy)]
pub struct Organizer;

impl EventField for Organizer {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        if let Some(organizer) = &event.organizer {
            component.add_property(user_property(property::ORGANIZER, organizer, false));
        }
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        if let Some(organizer) = single(component, property::ORGANIZER)? {
            event.organizer = Some(parse_user(organizer)?);
        }
        Ok(())
    }
}

/// `ATTENDEE`, repeated once per attendee in order.
///
/// Rooms and resources are written with `ROLE=NON-PARTICIPANT` whatever
/// their configured role.
#[derive(Debug, Clone, Copy)]
pub struct Attendees;

impl EventField for Attendees {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        for attendee in &event.attendees {
            component.add_property(user_property(property::ATTENDEE, attendee, true));
        }
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        event.attendees = component
            .properties_named(property::ATTENDEE)
            .iter()
            .map(parse_user)
            .collect::<CalendarResult<_>>()?;
        Ok(())
    }
}
