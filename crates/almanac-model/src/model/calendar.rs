use super::event::Event;
use super::values::Method;

/// A calendar object (`VCALENDAR`) holding events.
///
/// Equality ignores `product_id`: the producer of a document is not part
/// of its content.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    pub method: Option<Method>,
    /// `PRODID` as read from input; output always carries the writer's own.
    pub product_id: Option<String>,
    pub events: Vec<Event>,
}

impl Calendar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }

    #[must_use]
    pub fn with_event(mut self, event: Event) -> Self {
        self.add_event(event);
        self
    }

    /// Finds an event by `UID`.
    #[must_use]
    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method && self.events == other.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_product_id() {
        let event = Event::with_id("a");
        let mut left = Calendar::new().with_method(Method::publish()).with_event(event.clone());
        let right = Calendar::new().with_method(Method::publish()).with_event(event);
        left.product_id = Some("-//Other//EN".to_string());
        assert_eq!(left, right);
    }

    #[test]
    fn event_order_matters() {
        let a = Calendar::new().with_event(Event::with_id("a")).with_event(Event::with_id("b"));
        let b = Calendar::new().with_event(Event::with_id("b")).with_event(Event::with_id("a"));
        assert_ne!(a, b);
        assert_eq!(a.event("b").map(|e| e.id.as_str()), Some("b"));
    }
}
