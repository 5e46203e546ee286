use almanac_model::model::{self, Classification, Event, Position};
use almanac_rfc::rfc::ical::core::names::property;
use almanac_rfc::rfc::ical::core::{Component, Property};

use super::{EventField, single};
use crate::calendar::session::Session;
use crate::error::{CalendarError, CalendarResult};

/// `UID`, required.
#[derive(Debug, Clone, Copy)]
pub struct Uid;

impl EventField for Uid {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        if event.id.trim().is_empty() {
            return Err(CalendarError::missing(property::UID));
        }
        component.add_property(Property::new(property::UID, event.id.as_str()));
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        let uid = single(component, property::UID)?
            .map(|p| p.value.trim())
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| CalendarError::missing(property::UID))?;
        event.id = uid.to_string();
        Ok(())
    }
}

/// `CLASS`.
#[derive(Debug, Clone, Copy)]
pub struct Class;

impl EventField for Class {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        if let Some(classification) = &event.classification {
            component.add_property(Property::new(property::CLASS, classification.as_str()));
        }
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        if let Some(class) = single(component, property::CLASS)? {
            event.classification = Some(Classification::parse(&class.value));
        }
        Ok(())
    }
}

/// `PRIORITY`, an integer from 0 (undefined) to 9 (lowest).
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl EventField for Priority {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        if let Some(priority) = &event.priority {
            component.add_property(Property::new(property::PRIORITY, priority.as_str()));
        }
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        let Some(priority) = single(component, property::PRIORITY)? else {
            return Ok(());
        };
        let value = priority.value.trim();
        match value.parse::<u8>() {
            Ok(level) if level <= 9 => {
                event.priority = Some(model::Priority::parse(&level.to_string()));
                Ok(())
            }
            _ => Err(CalendarError::invalid(
                property::PRIORITY,
                format!("expected 0-9, found {value:?}"),
            )),
        }
    }
}

/// `GEO`, `latitude;longitude`.
#[derive(Debug, Clone, Copy)]
pub struct Geo;

impl EventField for Geo {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        if let Some(position) = &event.geo {
            component.add_property(Property::new(property::GEO, position.to_string()));
        }
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        if let Some(geo) = single(component, property::GEO)? {
            event.geo = Some(geo.value.parse::<Position>()?);
        }
        Ok(())
    }
}
