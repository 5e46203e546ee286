use chrono::{DateTime, SubsecRound, Utc};

use super::attendee::Attendee;
use super::values::{Classification, LocalizedString, Position, Priority};
use super::zoned::ZonedDateTime;

/// A calendar event (`VEVENT`).
///
/// `id`, `start` and `end` must be set before the event is serialised.
/// Equality ignores `created_at` and `updated_at`.
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique identifier (`UID`).
    pub id: String,
    pub start: Option<ZonedDateTime>,
    pub end: Option<ZonedDateTime>,
    /// Start and end are dates; their time of day is ignored.
    pub all_day: bool,
    pub classification: Option<Classification>,
    pub priority: Option<Priority>,
    pub summary: Option<LocalizedString>,
    pub description: Option<LocalizedString>,
    pub location: Option<LocalizedString>,
    pub organizer: Option<Attendee>,
    pub attendees: Vec<Attendee>,
    pub geo: Option<Position>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Creates an event with a random UUID identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: None,
            end: None,
            all_day: false,
            classification: None,
            priority: None,
            summary: None,
            description: None,
            location: None,
            organizer: None,
            attendees: Vec::new(),
            geo: None,
            // iCalendar timestamps have second precision.
            created_at: Utc::now().trunc_subsecs(0),
            updated_at: None,
        }
    }

    pub fn add_attendee(&mut self, attendee: Attendee) {
        self.attendees.push(attendee);
    }

    /// Records a modification time, truncated to whole seconds.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at.trunc_subsecs(0));
    }

    /// Time between start and end, if both resolve to UTC.
    #[must_use]
    pub fn duration(&self) -> Option<chrono::TimeDelta> {
        let start = self.start.as_ref()?.to_utc()?;
        let end = self.end.as_ref()?.to_utc()?;
        Some(end - start)
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.start == other.start
            && self.end == other.end
            && self.all_day == other.all_day
            && self.classification == other.classification
            && self.priority == other.priority
            && self.summary == other.summary
            && self.description == other.description
            && self.location == other.location
            && self.organizer == other.organizer
            && self.attendees == other.attendees
            && self.geo == other.geo
    }
}
