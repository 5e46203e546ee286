//! iCalendar parameter type (RFC 5545 §3.2).

use std::fmt;

use super::multimap::Keyed;

/// A single property parameter.
///
/// For `DTSTART;TZID=Europe/Berlin:20260123T120000` the parameter has name
/// `TZID` and the single value `Europe/Berlin`. Some parameters (e.g.
/// `DELEGATED-TO`) carry several comma-separated values.
///
/// Equality ignores [`Parameter::quoted`]; it only affects output. An empty
/// value list equals a single empty value, since both are written `NAME=`.
#[derive(Debug, Clone, Eq)]
pub struct Parameter {
    /// Parameter name, case preserved.
    pub name: String,
    /// Values in order of appearance, unquoted.
    pub values: Vec<String>,
    /// Forces quoting of every value on output.
    pub quoted: bool,
}

impl Parameter {
    /// Creates a parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
            quoted: false,
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
            quoted: false,
        }
    }

    /// Marks the parameter so that every value is written in double quotes.
    #[must_use]
    pub fn quoted(mut self) -> Self {
        self.quoted = true;
        self
    }

    /// Returns the first (and usually only) value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Returns whether `value` would be quoted on output.
    #[must_use]
    pub fn needs_quoting(&self, value: &str) -> bool {
        self.quoted || value.contains([';', ':', ','])
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name) && self.written_values() == other.written_values()
    }
}

impl Parameter {
    fn written_values(&self) -> &[String] {
        const EMPTY: &[String] = &[String::new()];
        if self.values.is_empty() { EMPTY } else { &self.values }
    }
}

impl Keyed for Parameter {
    fn key(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.name)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if self.needs_quoting(value) {
                write!(f, "\"{value}\"")?;
            } else {
                f.write_str(value)?;
            }
        }
        Ok(())
    }
}
