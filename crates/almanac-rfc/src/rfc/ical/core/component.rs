//! iCalendar component type (RFC 5545 §3.4-3.6).

use super::Property;
use super::multimap::{Keyed, OrderedMultimap};
use super::names::component as names;

/// A named block holding properties and nested components.
///
/// For example a VCALENDAR contains VTIMEZONEs and VEVENTs, and a VTIMEZONE
/// contains STANDARD and DAYLIGHT observances.
#[derive(Debug, Clone, Eq)]
pub struct Component {
    /// Component name, case preserved. Never empty.
    pub name: String,
    /// Properties grouped by name in order of appearance.
    pub properties: OrderedMultimap<Property>,
    /// Child components grouped by name in order of appearance.
    pub children: OrderedMultimap<Component>,
}

impl Component {
    /// Creates an empty component.
    ///
    /// `name` must not be empty; debug builds panic otherwise.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "component name must not be empty");
        Self {
            name,
            properties: OrderedMultimap::new(),
            children: OrderedMultimap::new(),
        }
    }

    /// Creates a VCALENDAR component.
    #[must_use]
    pub fn calendar() -> Self {
        Self::new(names::VCALENDAR)
    }

    /// Creates a VEVENT component.
    #[must_use]
    pub fn event() -> Self {
        Self::new(names::VEVENT)
    }

    /// Creates a VTIMEZONE component.
    #[must_use]
    pub fn timezone() -> Self {
        Self::new(names::VTIMEZONE)
    }

    /// Returns whether the component has the given name (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.add(property);
    }

    /// Adds a property and returns the component (builder form).
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.add(property);
        self
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.add(child);
    }

    /// Adds a child component and returns the component (builder form).
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.add(child);
        self
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.first(name)
    }

    /// Returns the raw value of the first property with the given name.
    #[must_use]
    pub fn property_value(&self, name: &str) -> Option<&str> {
        self.property(name).map(|p| p.value.as_str())
    }

    /// Returns all properties with the given name, in order.
    #[must_use]
    pub fn properties_named(&self, name: &str) -> &[Property] {
        self.properties.get(name)
    }

    /// Returns all child components with the given name, in order.
    #[must_use]
    pub fn children_named(&self, name: &str) -> &[Component] {
        self.children.get(name)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.properties == other.properties
            && self.children == other.children
    }
}

impl Keyed for Component {
    fn key(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree() {
        let calendar = Component::calendar()
            .with_property(Property::new("VERSION", "2.0"))
            .with_child(Component::event().with_property(Property::new("UID", "1")))
            .with_child(Component::event().with_property(Property::new("UID", "2")));

        assert!(calendar.is("vcalendar"));
        assert_eq!(calendar.property_value("version"), Some("2.0"));
        let events = calendar.children_named("VEVENT");
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].property_value("UID"), Some("2"));
        assert!(calendar.children_named("VTODO").is_empty());
    }

    #[test]
    fn equality_is_structural() {
        let a = Component::new("vevent").with_property(Property::new("UID", "1"));
        let b = Component::event().with_property(Property::new("uid", "1"));
        assert_eq!(a, b);

        let c = Component::event().with_property(Property::new("UID", "2"));
        assert_ne!(a, c);
    }

    #[test]
    fn equality_respects_group_order() {
        let a = Component::event()
            .with_property(Property::new("SUMMARY", "x"))
            .with_property(Property::new("UID", "1"));
        let b = Component::event()
            .with_property(Property::new("UID", "1"))
            .with_property(Property::new("SUMMARY", "x"));
        assert_ne!(a, b);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "component name must not be empty")]
    fn empty_name_panics_in_debug_builds() {
        let _component = Component::new("");
    }
}
