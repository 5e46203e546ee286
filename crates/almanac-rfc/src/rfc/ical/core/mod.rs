//! iCalendar block model (RFC 5545).
//!
//! A generic tree of components, properties, and parameters. Values are kept
//! as raw strings; typed interpretation happens in the calendar mapper.

mod component;
pub mod datetime;
pub mod multimap;
pub mod names;
mod parameter;
mod property;
mod rrule;

pub use component::Component;
pub use datetime::UtcOffset;
pub use multimap::{Group, Keyed, OrderedMultimap};
pub use parameter::Parameter;
pub use property::Property;
pub use rrule::{Frequency, RecurrenceRule, WeekdayNum, parse_weekday_code, weekday_code};
