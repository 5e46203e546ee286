use super::values::{AttendeeRole, AttendeeType, LocalizedString, ParticipationStatus};

/// A calendar user taking part in an event, either as organizer or attendee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    /// Email address without the `mailto:` scheme.
    pub address: String,
    /// Display name (`CN`).
    pub name: Option<LocalizedString>,
    pub kind: Option<AttendeeType>,
    pub role: Option<AttendeeRole>,
    pub status: Option<ParticipationStatus>,
    /// Whether a reply is expected (`RSVP`).
    pub rsvp: Option<bool>,
}

impl Attendee {
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            kind: None,
            role: None,
            status: None,
            rsvp: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<LocalizedString>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: AttendeeType) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: AttendeeRole) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ParticipationStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_rsvp(mut self, rsvp: bool) -> Self {
        self.rsvp = Some(rsvp);
        self
    }

    /// The role written on the wire.
    ///
    /// Rooms and resources are always `NON-PARTICIPANT`, whatever role was
    /// configured.
    #[must_use]
    pub fn effective_role(&self) -> Option<AttendeeRole> {
        if self.kind.as_ref().is_some_and(AttendeeType::is_facility) {
            return Some(AttendeeRole::non_participant());
        }
        self.role.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_is_never_a_participant() {
        let room = Attendee::new("room-4@example.com")
            .with_kind(AttendeeType::room())
            .with_role(AttendeeRole::chair());
        assert_eq!(room.effective_role(), Some(AttendeeRole::non_participant()));

        let resource = Attendee::new("projector@example.com").with_kind(AttendeeType::resource());
        assert_eq!(resource.effective_role(), Some(AttendeeRole::non_participant()));
    }

    #[test]
    fn individual_keeps_role() {
        let person = Attendee::new("jo@example.com")
            .with_kind(AttendeeType::individual())
            .with_role(AttendeeRole::chair());
        assert_eq!(person.effective_role(), Some(AttendeeRole::chair()));
        assert_eq!(Attendee::new("jo@example.com").effective_role(), None);
    }
}
