//! Mapping between [`Calendar`] and the VCALENDAR block tree.

use std::io::{BufRead, Write};

use almanac_core::constants::{ICALENDAR_VERSION, PRODUCT_IDENTIFIER};
use almanac_model::model::{Calendar, Event, Method, ZoneRef};
use almanac_model::timezone::{SystemTimeZones, TimeZone, TimeZoneProvider};
use almanac_rfc::error::RfcError;
use almanac_rfc::rfc::ical::build::{write, write_to};
use almanac_rfc::rfc::ical::core::names::{component, property};
use almanac_rfc::rfc::ical::core::{Component, Property};
use almanac_rfc::rfc::ical::parse::{self, read_from};
use almanac_rfc::rfc::ical::timezone::translate;
use chrono::NaiveDateTime;

use super::fields::{EventField, default_fields};
use super::session::Session;
use super::version;
use crate::error::{CalendarError, CalendarResult};

const GREGORIAN: &str = "GREGORIAN";

/// Converts calendars to iCalendar and back.
///
/// Holds no per-document state, so one serializer can be shared between
/// threads as long as its provider can.
pub struct CalendarSerializer<P = SystemTimeZones> {
    provider: P,
    product_id: String,
    fields: Vec<Box<dyn EventField>>,
}

impl CalendarSerializer<SystemTimeZones> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_provider(SystemTimeZones::new())
    }
}

impl Default for CalendarSerializer<SystemTimeZones> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TimeZoneProvider> CalendarSerializer<P> {
    #[must_use]
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            product_id: PRODUCT_IDENTIFIER.to_string(),
            fields: default_fields(),
        }
    }

    /// Sets the `PRODID` written on every calendar.
    #[must_use]
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    /// Appends a field after the default ones.
    #[must_use]
    pub fn with_field(mut self, field: impl EventField + 'static) -> Self {
        self.fields.push(Box::new(field));
        self
    }

    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// ## Summary
    /// Builds the VCALENDAR block for `calendar`.
    ///
    /// Every zone used by an event gets one VTIMEZONE covering the earliest
    /// to latest local time that references it.
    ///
    /// ## Errors
    /// Returns a validation error if an event lacks its `UID`, start or end.
    #[tracing::instrument(skip(self, calendar), fields(events = calendar.events.len()))]
    pub fn serialize(&self, calendar: &Calendar) -> CalendarResult<Component> {
        tracing::debug!("Serializing calendar");

        let mut root = Component::calendar()
            .with_property(Property::new(property::PRODID, self.product_id.as_str()))
            .with_property(Property::new(property::VERSION, ICALENDAR_VERSION));
        if let Some(method) = &calendar.method {
            root.add_property(Property::new(property::METHOD, method.as_str()));
        }

        for (zone, min, max) in zone_windows(&calendar.events) {
            let rules = zone.rules(min, max);
            root.add_child(translate(&rules, min, max));
        }

        for event in &calendar.events {
            root.add_child(self.serialize_event(event)?);
        }

        Ok(root)
    }

    /// ## Errors
    /// See [`Self::serialize`].
    pub fn serialize_to_string(&self, calendar: &Calendar) -> CalendarResult<String> {
        Ok(write(&self.serialize(calendar)?))
    }

    /// Writes the calendars one after another.
    ///
    /// ## Errors
    /// See [`Self::serialize`].
    pub fn serialize_all(&self, calendars: &[Calendar]) -> CalendarResult<String> {
        calendars
            .iter()
            .map(|calendar| self.serialize_to_string(calendar))
            .collect()
    }

    /// ## Errors
    /// Returns a validation error as [`Self::serialize`] does, or an I/O
    /// error from `writer`.
    pub fn serialize_to<W: Write + ?Sized>(&self, calendar: &Calendar, writer: &mut W) -> CalendarResult<()> {
        let root = self.serialize(calendar)?;
        write_to(&root, writer).map_err(RfcError::from)?;
        Ok(())
    }

    fn serialize_event(&self, event: &Event) -> CalendarResult<Component> {
        let mut component = Component::event();
        for field in &self.fields {
            field.emit(event, &mut component)?;
        }
        Ok(component)
    }

    /// ## Summary
    /// Reads a calendar from a VCALENDAR block.
    ///
    /// ## Errors
    /// Returns [`CalendarError::Unsupported`] for a version other than 2.0
    /// or a non-Gregorian calendar scale, and a validation error for a
    /// missing or repeated `VERSION`/`PRODID` or an invalid event.
    #[tracing::instrument(skip(self, root), fields(name = %root.name))]
    pub fn deserialize(&self, root: &Component) -> CalendarResult<Calendar> {
        if !root.is(component::VCALENDAR) {
            return Err(CalendarError::Validation(format!(
                "expected {}, found {}",
                component::VCALENDAR,
                root.name
            )));
        }

        version::check(&exactly_one(root, property::VERSION)?.value)?;
        let product_id = exactly_one(root, property::PRODID)?.value.clone();

        if let Some(scale) = root
            .property_value(property::CALSCALE)
            .filter(|scale| !scale.eq_ignore_ascii_case(GREGORIAN))
        {
            return Err(CalendarError::Unsupported(format!("calendar scale {scale}")));
        }

        let mut calendar = Calendar::new();
        calendar.product_id = Some(product_id);
        calendar.method = root.property_value(property::METHOD).map(Method::parse);

        let session = Session::for_calendar(root, &self.provider);
        for child in root.children.values() {
            if child.is(component::VEVENT) {
                calendar.add_event(self.deserialize_event(child, &session)?);
            } else if !child.is(component::VTIMEZONE) {
                tracing::trace!(component = %child.name, "Skipping unsupported component");
            }
        }

        tracing::debug!(events = calendar.events.len(), "Deserialized calendar");
        Ok(calendar)
    }

    fn deserialize_event(&self, component: &Component, session: &Session) -> CalendarResult<Event> {
        let mut event = Event::with_id(String::new());
        for field in &self.fields {
            field.parse(component, &mut event, session)?;
        }
        Ok(event)
    }

    /// Reads every calendar in `input`.
    ///
    /// ## Errors
    /// Returns the first syntax or mapping error.
    pub fn deserialize_str(&self, input: &str) -> CalendarResult<Vec<Calendar>> {
        parse::parse(input)?
            .iter()
            .map(|root| self.deserialize(root))
            .collect()
    }

    /// Lazily reads calendars from `reader`, one per top-level block.
    ///
    /// A mapping error affects only its own calendar; iteration continues
    /// with the next. A syntax error ends the stream.
    pub fn deserialize_reader<'a, R: BufRead + 'a>(
        &'a self,
        reader: R,
    ) -> impl Iterator<Item = CalendarResult<Calendar>> + 'a {
        read_from(reader).map(move |root| self.deserialize(&root?))
    }
}

fn exactly_one<'a>(root: &'a Component, name: &str) -> CalendarResult<&'a Property> {
    match root.properties_named(name) {
        [property] => Ok(property),
        [] => Err(CalendarError::missing(name)),
        _ => Err(CalendarError::invalid(name, "must appear exactly once")),
    }
}

/// Each zone referenced by `events`, with the earliest and latest local
/// time that uses it, in order of first use.
fn zone_windows(events: &[Event]) -> Vec<(TimeZone, NaiveDateTime, NaiveDateTime)> {
    let mut windows: Vec<(TimeZone, NaiveDateTime, NaiveDateTime)> = Vec::new();

    let zoned = events
        .iter()
        .flat_map(|event| [event.start.as_ref(), event.end.as_ref()])
        .flatten()
        .filter_map(|value| match value.zone() {
            ZoneRef::Zone(zone) => Some((*zone, value.local())),
            ZoneRef::Utc | ZoneRef::Unresolved(_) => None,
        });

    for (zone, local) in zoned {
        match windows.iter_mut().find(|(known, _, _)| *known == zone) {
            Some((_, min, max)) => {
                *min = (*min).min(local);
                *max = (*max).max(local);
            }
            None => windows.push((zone, local, local)),
        }
    }
    windows
}
