//! Property and parameter value types used by events.

use std::fmt;
use std::str::FromStr;

use super::registry::open_enumeration;
use crate::error::ModelError;

open_enumeration! {
    /// Access classification of an event (`CLASS`, RFC 5545 §3.8.1.3).
    Classification {
        fn public => "PUBLIC";
        fn private => "PRIVATE";
        fn confidential => "CONFIDENTIAL";
    }
}

open_enumeration! {
    /// Relative priority (`PRIORITY`, RFC 5545 §3.8.1.9), 0 to 9.
    Priority {
        fn undefined => "0";
        fn high => "1";
        fn medium => "5";
        fn low => "9";
    }
}

open_enumeration! {
    /// Participation role of a calendar user (`ROLE`, RFC 5545 §3.2.16).
    AttendeeRole {
        fn chair => "CHAIR";
        fn required => "REQ-PARTICIPANT";
        fn optional => "OPT-PARTICIPANT";
        fn non_participant => "NON-PARTICIPANT";
    }
}

open_enumeration! {
    /// Calendar user type (`CUTYPE`, RFC 5545 §3.2.3).
    AttendeeType {
        fn unknown => "UNKNOWN";
        fn individual => "INDIVIDUAL";
        fn group => "GROUP";
        fn resource => "RESOURCE";
        fn room => "ROOM";
    }
}

open_enumeration! {
    /// Participation status of an attendee (`PARTSTAT`, RFC 5545 §3.2.12).
    ParticipationStatus {
        fn needs_action => "NEEDS-ACTION";
        fn accepted => "ACCEPTED";
        fn declined => "DECLINED";
        fn tentative => "TENTATIVE";
        fn delegated => "DELEGATED";
        fn completed => "COMPLETED";
        fn in_process => "IN-PROCESS";
    }
}

open_enumeration! {
    /// iTIP method of a calendar object (`METHOD`, RFC 5546 §1.4).
    Method {
        fn publish => "PUBLISH";
        fn request => "REQUEST";
        fn reply => "REPLY";
        fn add => "ADD";
        fn cancel => "CANCEL";
        fn refresh => "REFRESH";
        fn counter => "COUNTER";
        fn decline_counter => "DECLINECOUNTER";
    }
}

impl AttendeeType {
    /// Rooms and resources never take part in a meeting themselves.
    #[must_use]
    pub fn is_facility(&self) -> bool {
        *self == Self::room() || *self == Self::resource()
    }
}

/// Text with an optional RFC 5646 language tag (`LANGUAGE` parameter).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalizedString {
    pub text: String,
    pub language: Option<String>,
}

impl LocalizedString {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl From<&str> for LocalizedString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for LocalizedString {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for LocalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Geographic position in decimal degrees (`GEO`, RFC 5545 §3.8.1.6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.latitude, self.longitude)
    }
}

impl FromStr for Position {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidValue(format!("GEO {s:?}"));
        let (latitude, longitude) = s.split_once(';').ok_or_else(invalid)?;
        let latitude: f64 = latitude.trim().parse().map_err(|_e| invalid())?;
        let longitude: f64 = longitude.trim().parse().map_err(|_e| invalid())?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid());
        }
        Ok(Self::new(latitude, longitude))
    }
}
