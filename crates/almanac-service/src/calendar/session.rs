use std::collections::HashMap;

use almanac_model::timezone::{TimeZone, TimeZoneProvider};
use almanac_rfc::rfc::ical::core::Component;
use almanac_rfc::rfc::ical::core::names::{component, property};

/// Per-document state shared by the field parsers.
///
/// Holds the zones declared by the document's VTIMEZONE blocks, keyed by
/// `TZID` exactly as written. Dropped when the document has been read.
#[derive(Debug, Default)]
pub struct Session {
    zones: HashMap<String, TimeZone>,
}

impl Session {
    /// Resolves every VTIMEZONE in `calendar` through `provider`.
    ///
    /// Zones the provider does not know are logged and left out; date-times
    /// that reference them keep their `TZID` unresolved.
    pub(crate) fn for_calendar<P: TimeZoneProvider>(calendar: &Component, provider: &P) -> Self {
        let mut zones = HashMap::new();

        for vtimezone in calendar.children_named(component::VTIMEZONE) {
            let Some(tzid) = vtimezone.property_value(property::TZID) else {
                tracing::warn!("VTIMEZONE without TZID ignored");
                continue;
            };
            match provider.resolve(tzid) {
                Ok(zone) => {
                    zones.insert(tzid.to_string(), zone);
                }
                Err(error) => tracing::warn!(tzid, %error, "Time zone not available, TZID left unresolved"),
            }
        }

        tracing::trace!(zones = zones.len(), "Resolved session time zones");
        Self { zones }
    }

    #[must_use]
    pub fn zone(&self, tzid: &str) -> Option<TimeZone> {
        self.zones.get(tzid).copied()
    }
}
