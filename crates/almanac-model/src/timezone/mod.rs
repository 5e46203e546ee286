//! Platform time zones backed by the tz database.

mod provider;
mod rules;
mod zone;

pub use provider::{SystemTimeZones, TimeZoneProvider, normalize_tzid};
pub use zone::TimeZone;
