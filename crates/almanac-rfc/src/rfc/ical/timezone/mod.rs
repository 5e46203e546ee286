//! Time-zone definitions (VTIMEZONE) derived from daylight-saving rules.

mod transition;
mod translator;

pub use transition::{AdjustmentRule, TransitionTime, days_in_month};
pub use translator::{TimeZoneRules, translate};
