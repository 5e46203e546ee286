//! Well-known component, property, and parameter names.

/// Component names (RFC 5545 §3.6).
pub mod component {
    pub const VCALENDAR: &str = "VCALENDAR";
    pub const VEVENT: &str = "VEVENT";
    pub const VTIMEZONE: &str = "VTIMEZONE";
    /// Standard-time observance inside a VTIMEZONE.
    pub const STANDARD: &str = "STANDARD";
    /// Daylight-saving observance inside a VTIMEZONE.
    pub const DAYLIGHT: &str = "DAYLIGHT";
}

/// Property names (RFC 5545 §3.7-3.8).
pub mod property {
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";

    pub const PRODID: &str = "PRODID";
    pub const VERSION: &str = "VERSION";
    pub const METHOD: &str = "METHOD";
    pub const CALSCALE: &str = "CALSCALE";

    pub const UID: &str = "UID";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const DTSTART: &str = "DTSTART";
    pub const DTEND: &str = "DTEND";
    pub const DURATION: &str = "DURATION";
    pub const SUMMARY: &str = "SUMMARY";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const LOCATION: &str = "LOCATION";
    pub const GEO: &str = "GEO";
    pub const CLASS: &str = "CLASS";
    pub const PRIORITY: &str = "PRIORITY";
    pub const ORGANIZER: &str = "ORGANIZER";
    pub const ATTENDEE: &str = "ATTENDEE";
    pub const CREATED: &str = "CREATED";
    pub const LAST_MODIFIED: &str = "LAST-MODIFIED";

    pub const TZID: &str = "TZID";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";
    pub const TZNAME: &str = "TZNAME";
    pub const RRULE: &str = "RRULE";
}

/// Parameter names (RFC 5545 §3.2).
pub mod parameter {
    pub const TZID: &str = "TZID";
    pub const LANGUAGE: &str = "LANGUAGE";
    /// Common name.
    pub const CN: &str = "CN";
    /// Calendar user type.
    pub const CUTYPE: &str = "CUTYPE";
    pub const ROLE: &str = "ROLE";
    /// Participation status.
    pub const PARTSTAT: &str = "PARTSTAT";
    pub const RSVP: &str = "RSVP";
    /// Value data type.
    pub const VALUE: &str = "VALUE";
}
