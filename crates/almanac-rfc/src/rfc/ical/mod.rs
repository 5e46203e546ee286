//! iCalendar (RFC 5545) block codec and time-zone translation.

pub mod build;
pub mod core;
pub mod parse;
pub mod timezone;
