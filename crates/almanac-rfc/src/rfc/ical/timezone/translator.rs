//! VTIMEZONE generation from daylight-saving adjustment rules (RFC 5545 §3.6.5).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::transition::{AdjustmentRule, TransitionTime};
use crate::rfc::ical::core::datetime::format_local;
use crate::rfc::ical::core::names::{component, property};
use crate::rfc::ical::core::{Component, Property, UtcOffset};

/// DTSTART used for a zone without daylight saving.
const FIXED_OFFSET_EPOCH: &str = "19700101T000000";

/// Everything needed to describe a zone over a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZoneRules {
    /// Zone identifier written as TZID.
    pub id: String,
    /// Standard-time offset used when no adjustment rule applies.
    pub base_offset: UtcOffset,
    /// Standard-time abbreviation used when no adjustment rule applies.
    pub standard_name: Option<String>,
    /// Adjustment rules ordered by start date.
    pub adjustment_rules: Vec<AdjustmentRule>,
}

impl TimeZoneRules {
    /// A zone with a constant offset.
    #[must_use]
    pub fn fixed(id: impl Into<String>, offset: UtcOffset) -> Self {
        Self {
            id: id.into(),
            base_offset: offset,
            standard_name: None,
            adjustment_rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn supports_daylight_saving_time(&self) -> bool {
        !self.adjustment_rules.is_empty()
    }
}

/// Builds a VTIMEZONE for `rules` covering local times `min..=max`.
///
/// Every adjustment rule overlapping the window yields a STANDARD and a
/// DAYLIGHT observance with a yearly RRULE. A zone without daylight saving,
/// or whose rules all miss the window, yields a single STANDARD observance
/// at the base offset.
#[must_use]
#[tracing::instrument(skip(rules), fields(tzid = %rules.id, rules = rules.adjustment_rules.len()))]
pub fn translate(rules: &TimeZoneRules, min: NaiveDateTime, max: NaiveDateTime) -> Component {
    let mut vtimezone = Component::timezone();
    vtimezone.add_property(Property::new(property::TZID, rules.id.as_str()));

    let mut selected: Vec<&AdjustmentRule> = rules
        .adjustment_rules
        .iter()
        .filter(|rule| rule.intersects(min.date(), max.date()))
        .collect();
    selected.sort_by_key(|rule| rule.start);

    for rule in &selected {
        let standard = Observance {
            name: component::STANDARD,
            pattern: &rule.daylight_end,
            from: rule.daylight_offset(),
            to: rule.base_offset,
            abbreviation: rule.standard_name.as_deref(),
        };
        let daylight = Observance {
            name: component::DAYLIGHT,
            pattern: &rule.daylight_start,
            from: rule.base_offset,
            to: rule.daylight_offset(),
            abbreviation: rule.daylight_name.as_deref(),
        };

        for observance in [standard, daylight] {
            if let Some(child) = observance.build(rule.start, rule.end) {
                vtimezone.add_child(child);
            }
        }
    }

    if vtimezone.children.is_empty() {
        if rules.supports_daylight_saving_time() {
            tracing::debug!("No adjustment rule covers the window, writing base offset only");
        }
        vtimezone.add_child(fixed_offset(rules.base_offset, rules.standard_name.as_deref()));
    }

    tracing::debug!(observances = vtimezone.children.len(), "Built VTIMEZONE");
    vtimezone
}

fn fixed_offset(offset: UtcOffset, abbreviation: Option<&str>) -> Component {
    let mut standard = Component::new(component::STANDARD)
        .with_property(Property::new(property::DTSTART, FIXED_OFFSET_EPOCH))
        .with_property(Property::new(property::TZOFFSETFROM, offset.to_string()))
        .with_property(Property::new(property::TZOFFSETTO, offset.to_string()));
    if let Some(name) = abbreviation {
        standard.add_property(Property::new(property::TZNAME, name));
    }
    standard
}

/// One STANDARD or DAYLIGHT sub-block of a rule.
struct Observance<'a> {
    name: &'static str,
    pattern: &'a TransitionTime,
    from: UtcOffset,
    to: UtcOffset,
    abbreviation: Option<&'a str>,
}

impl Observance<'_> {
    /// Returns `None` when the pattern never occurs inside the rule's range.
    fn build(&self, start: NaiveDate, end: Option<NaiveDate>) -> Option<Component> {
        let onset = self.pattern.first_onset_on_or_after(start.and_time(NaiveTime::MIN))?;

        let mut rrule = Some(self.pattern.recurrence_rule());
        if let Some(end) = end {
            let range_end = end.and_time(NaiveTime::from_hms_opt(23, 59, 59)?);
            if onset > range_end {
                tracing::trace!(observance = self.name, %onset, %end, "Onset after rule end, skipped");
                return None;
            }

            match self.pattern.last_onset_on_or_before(range_end) {
                Some(last) if last > onset => {
                    let until = (last - self.from.as_delta()).and_utc();
                    rrule = rrule.map(|r| r.with_until(until));
                }
                // A single observance needs no recurrence.
                _ => rrule = None,
            }
        }

        let mut observance = Component::new(self.name)
            .with_property(Property::new(property::DTSTART, format_local(onset)));
        if let Some(rrule) = rrule {
            observance.add_property(Property::new(property::RRULE, rrule.to_string()));
        }
        observance.add_property(Property::new(property::TZOFFSETFROM, self.from.to_string()));
        observance.add_property(Property::new(property::TZOFFSETTO, self.to.to_string()));
        if let Some(name) = self.abbreviation {
            observance.add_property(Property::new(property::TZNAME, name));
        }
        Some(observance)
    }
}

#[cfg(test)]
#[path = "translator_tests.rs"]
mod tests;
