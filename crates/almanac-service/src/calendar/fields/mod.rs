//! Per-property mapping between [`Event`] and VEVENT.
//!
//! Each field owns one or a few related properties and knows how to write
//! them and read them back. The serializer runs its fields in order, so the
//! field list fixes the property order of the output.

mod dates;
mod people;
mod simple;
mod text;

use almanac_model::model::Event;
use almanac_rfc::rfc::ical::core::{Component, Property};

pub use dates::{Created, DateTimeStamp, End, LastModified, Start};
pub use people::{Attendees, Organizer};
pub use simple::{Class, Geo, Priority, Uid};
pub use text::TextField;

use super::session::Session;
use crate::error::{CalendarError, CalendarResult};

/// One event field's mapping to and from VEVENT properties.
pub trait EventField: Send + Sync {
    /// Adds this field's properties to `component`.
    ///
    /// ## Errors
    /// Returns a validation error when the field is required but unset.
    fn emit(&self, event: &Event, component: &mut Component) -> CalendarResult<()>;

    /// Reads this field's properties from `component` into `event`.
    ///
    /// ## Errors
    /// Returns a validation error for a missing required property or a
    /// value that cannot be interpreted.
    fn parse(&self, component: &Component, event: &mut Event, session: &Session) -> CalendarResult<()>;
}

/// The fields every serializer starts with, in output order.
#[must_use]
pub fn default_fields() -> Vec<Box<dyn EventField>> {
    vec![
        Box::new(DateTimeStamp),
        Box::new(Uid),
        Box::new(Start),
        Box::new(Class),
        Box::new(Created),
        Box::new(TextField::description()),
        Box::new(Geo),
        Box::new(LastModified),
        Box::new(TextField::location()),
        Box::new(Organizer),
        Box::new(Priority),
        Box::new(TextField::summary()),
        Box::new(End),
        Box::new(Attendees),
    ]
}

/// The single instance of `name`, if present.
///
/// ## Errors
/// Returns a validation error if the property appears more than once.
fn single<'a>(component: &'a Component, name: &str) -> CalendarResult<Option<&'a Property>> {
    match component.properties_named(name) {
        [] => Ok(None),
        [property] => Ok(Some(property)),
        _ => Err(CalendarError::invalid(name, "must not appear more than once")),
    }
}
