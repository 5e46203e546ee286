//! Calendar mapping: [`Calendar`](almanac_model::model::Calendar) to and
//! from iCalendar text.

pub mod fields;
mod serializer;
mod session;
mod version;

pub use fields::{EventField, default_fields};
pub use serializer::CalendarSerializer;
pub use session::Session;

#[cfg(test)]
mod tests;
