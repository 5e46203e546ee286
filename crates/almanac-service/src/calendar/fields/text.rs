use almanac_model::model::{Event, LocalizedString};
use almanac_rfc::rfc::ical::build::escape_text;
use almanac_rfc::rfc::ical::core::names::{parameter, property};
use almanac_rfc::rfc::ical::core::{Component, Parameter, Property};
use almanac_rfc::rfc::ical::parse::values::unescape_text;

use super::{EventField, single};
use crate::calendar::session::Session;
use crate::error::CalendarResult;

/// A language-tagged TEXT property such as `SUMMARY`.
///
/// The value is escaped on output and unescaped on input.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    name: &'static str,
    get: fn(&Event) -> Option<&LocalizedString>,
    set: fn(&mut Event, LocalizedString),
}

impl TextField {
    #[must_use]
    pub fn summary() -> Self {
        Self {
            name: property::SUMMARY,
            get: |event| event.summary.as_ref(),
            set: |event, text| event.summary = Some(text),
        }
    }

    #[must_use]
    pub fn description() -> Self {
        Self {
            name: property::DESCRIPTION,
            get: |event| event.description.as_ref(),
            set: |event, text| event.description = Some(text),
        }
    }

    #[must_use]
    pub fn location() -> Self {
        Self {
            name: property::LOCATION,
            get: |event| event.location.as_ref(),
            set: |event, text| event.location = Some(text),
        }
    }
}

impl EventField for TextField {
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()> {
        let Some(text) = (self.get)(event) else {
            return Ok(());
        };
        let mut property = Property::new(self.name, escape_text(&text.text));
        if let Some(language) = &text.language {
            property.add_parameter(Parameter::new(parameter::LANGUAGE, language.as_str()));
        }
        component.add_property(property);
        Ok(())
    }

    fn parse(&self, component: &Component, event: &mut Event, _session: &Session) -> CalendarResult<()> {
        if let Some(property) = single(component, self.name)? {
            let mut text = LocalizedString::new(unescape_text(&property.value));
            text.language = property.parameter_value(parameter::LANGUAGE).map(str::to_string);
            (self.set)(event, text);
        }
        Ok(())
    }
}
