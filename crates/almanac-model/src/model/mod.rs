//! Calendar object model.

mod attendee;
mod calendar;
mod event;
pub(crate) mod registry;
mod values;
mod zoned;

pub use attendee::Attendee;
pub use calendar::Calendar;
pub use event::Event;
pub use values::{
    AttendeeRole, AttendeeType, Classification, LocalizedString, Method, ParticipationStatus, Position, Priority,
};
pub use zoned::{ZoneRef, ZonedDateTime};
