//! Time-zone lookup by `TZID`.
//!
//! Uses ICU4X to map Windows zone names and IANA aliases to canonical IANA
//! identifiers before looking them up in chrono-tz.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

use super::zone::TimeZone;
use crate::error::{ModelError, ModelResult};

/// Resolves `TZID` values to time zones.
pub trait TimeZoneProvider {
    /// ## Errors
    /// Returns [`ModelError::TimeZoneNotFound`] if `tzid` names no known zone.
    fn resolve(&self, tzid: &str) -> ModelResult<TimeZone>;
}

/// The tz database bundled with chrono-tz.
///
/// Resolutions are cached by the identifier as written, so repeated
/// lookups of the same `TZID` skip normalisation.
#[derive(Debug, Default)]
pub struct SystemTimeZones {
    cache: RwLock<HashMap<String, TimeZone>>,
}

impl SystemTimeZones {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeZoneProvider for SystemTimeZones {
    fn resolve(&self, tzid: &str) -> ModelResult<TimeZone> {
        if let Some(zone) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tzid)
        {
            return Ok(*zone);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(&normalized).map_err(|_e| ModelError::TimeZoneNotFound(tzid.to_string()))?;
        let zone = TimeZone::from_tz(tz);
        tracing::trace!(tzid, resolved = zone.id(), "Resolved time zone");

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tzid.to_string(), zone);
        Ok(zone)
    }
}

/// Maps a `TZID` as found in the wild to a canonical IANA name.
///
/// Handles the `/mozilla.org/` and `/softwarestudio.org/` prefixes, Windows
/// zone names, and IANA aliases. Unrecognised input is returned with the
/// prefix stripped.
#[must_use]
pub fn normalize_tzid(tzid: &str) -> String {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    let iana_parser = IanaParserExtended::new();

    let windows = WindowsParser::new()
        .parse(stripped, None)
        .and_then(|zone| iana_parser.iter().find(|entry| entry.time_zone == zone));
    if let Some(entry) = windows {
        return entry.canonical.to_string();
    }

    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone == icu::time::TimeZone::UNKNOWN {
        return stripped.to_string();
    }
    parsed.canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_iana_names() {
        let zones = SystemTimeZones::new();
        assert_eq!(zones.resolve("America/New_York").unwrap().id(), "America/New_York");
    }

    #[test]
    fn resolves_windows_and_prefixed_names() {
        let zones = SystemTimeZones::new();
        assert_eq!(zones.resolve("W. Europe Standard Time").unwrap().id(), "Europe/Berlin");
        assert_eq!(
            zones.resolve("/mozilla.org/America/New_York").unwrap().id(),
            "America/New_York"
        );
    }

    #[test]
    fn unknown_zone_is_not_found() {
        let zones = SystemTimeZones::new();
        let err = zones.resolve("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, ModelError::TimeZoneNotFound(ref id) if id == "Mars/Olympus_Mons"));
    }

    #[test]
    fn lookups_are_cached() {
        let zones = SystemTimeZones::new();
        zones.resolve("Europe/Paris").unwrap();
        assert!(zones.cache.read().unwrap().contains_key("Europe/Paris"));
    }

    #[test]
    fn normalizes_windows_names() {
        assert_eq!(normalize_tzid("Eastern Standard Time"), "America/New_York");
        assert_eq!(normalize_tzid("GMT Standard Time"), "Europe/London");
    }

    #[test]
    fn normalizes_aliases() {
        assert_eq!(normalize_tzid("US/Eastern"), "America/New_York");
        assert_eq!(normalize_tzid("Europe/Kiev"), "Europe/Kyiv");
        assert_eq!(normalize_tzid("/softwarestudio.org/Custom/Zone"), "Custom/Zone");
    }
}
