//! iCalendar property type (RFC 5545 §3.1).

use std::fmt;

use super::Parameter;
use super::multimap::{Keyed, OrderedMultimap};

/// A single content line: a named value with optional parameters.
///
/// The value is kept exactly as it appears on the wire. Escaping of TEXT
/// values is the caller's concern.
#[derive(Debug, Clone, Eq)]
pub struct Property {
    /// Property name, case preserved.
    pub name: String,
    /// Raw value.
    pub value: String,
    /// Parameters grouped by name in order of appearance.
    pub parameters: OrderedMultimap<Parameter>,
}

impl Property {
    /// Creates a property without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            parameters: OrderedMultimap::new(),
        }
    }

    /// Adds a parameter and returns the property (builder form).
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.add(parameter);
        self
    }

    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.add(parameter);
    }

    /// Returns the first parameter with the given name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.first(name)
    }

    /// Returns the first value of the first parameter with the given name.
    #[must_use]
    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameter(name)?.value()
    }

    /// Returns whether this property has a parameter with the given name.
    #[must_use]
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains(name)
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.value == other.value
            && self.parameters == other.parameters
    }
}

impl Keyed for Property {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Renders the unfolded content line without a line terminator.
impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for parameter in self.parameters.values() {
            write!(f, ";{parameter}")?;
        }
        write!(f, ":{}", self.value)
    }
}
